//! Menu button presses.

use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::InputFile;

use crate::bot::dialogue::{start_date_input, DateDialogue, DATE_PROMPT};
use crate::bot::handlers::HandlerResult;
use crate::bot::keyboard::MenuAction;
use crate::config::Config;
use crate::services::sheets::CellStore;
use crate::utils::logging::{log_callback, log_command_success};

/// Caption of the picture.
pub const IMAGE_CAPTION: &str = "Вот ваша картинка";

/// Reply text for a cell read; an empty cell still gets a reply.
pub fn cell_value_reply(cell: &str, value: &str) -> String {
    format!("Значение {cell}: {value}")
}

/// Answers the query first, then runs the pressed action. Unknown data is
/// only answered.
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: DateDialogue,
    config: Arc<Config>,
    store: Arc<dyn CellStore>,
) -> HandlerResult {
    let user = q.from.username.clone().unwrap_or_else(|| "unknown".to_string());
    let user_id = q.from.id.0;
    let chat_id = dialogue.chat_id();
    let data = q.data.clone().unwrap_or_default();

    log_callback(&data, &user, user_id, chat_id.0);
    bot.answer_callback_query(q.id).await?;

    let Some(action) = MenuAction::from_callback_data(&data) else {
        tracing::warn!("Unknown callback data '{}' in chat {}", data, chat_id.0);
        return Ok(());
    };

    match action {
        MenuAction::ShowImage => {
            // A missing file fails the send; the dispatcher logs it.
            bot.send_photo(chat_id, InputFile::file(config.image_path.clone()))
                .caption(IMAGE_CAPTION)
                .await?;
        }
        MenuAction::GetValue => {
            let value = store.read_cell(&config.value_cell).await?;
            bot.send_message(chat_id, cell_value_reply(&config.value_cell, &value))
                .await?;
        }
        MenuAction::InputDate => {
            bot.send_message(chat_id, DATE_PROMPT).await?;
            start_date_input(&dialogue).await?;
        }
    }

    log_command_success(action.callback_data(), &user, user_id, chat_id.0, None);
    Ok(())
}
