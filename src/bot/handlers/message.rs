//! Commands and free text.

use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::Command;
use crate::bot::dialogue::{
    cancel_date_input, submit_date, DateDialogue, DateOutcome, DATE_CANCELLED, DATE_INVALID,
    DATE_SAVED,
};
use crate::bot::handlers::HandlerResult;
use crate::bot::keyboard::{main_menu, MENU_PROMPT};
use crate::config::Config;
use crate::services::sheets::CellStore;
use crate::utils::logging::{log_command_start, log_command_success, log_validation_error};

fn sender(msg: &Message) -> (String, u64) {
    msg.from()
        .map(|u| {
            (
                u.username.clone().unwrap_or_else(|| "unknown".to_string()),
                u.id.0,
            )
        })
        .unwrap_or_else(|| ("unknown".to_string(), 0))
}

/// Handles `/start`, `/help` and `/cancel`.
pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: DateDialogue,
    config: Arc<Config>,
) -> HandlerResult {
    let (user, user_id) = sender(&msg);
    let chat_id = msg.chat.id;
    log_command_start(&format!("{cmd:?}"), &user, user_id, chat_id.0);

    match cmd {
        Command::Start => {
            bot.send_message(chat_id, MENU_PROMPT)
                .reply_markup(main_menu(&config))
                .await?;
        }
        Command::Help => {
            bot.send_message(chat_id, Command::descriptions().to_string()).await?;
        }
        Command::Cancel => {
            if cancel_date_input(&dialogue).await? {
                bot.send_message(chat_id, DATE_CANCELLED).await?;
                log_command_success(
                    "Cancel",
                    &user,
                    user_id,
                    chat_id.0,
                    Some("date input dropped"),
                );
            } else {
                tracing::debug!("Nothing to cancel in chat {}", chat_id.0);
            }
        }
    }
    Ok(())
}

/// Feeds plain text into the date flow. Text in chats that are not waiting
/// for a date is dropped without a reply.
pub async fn text_handler(
    bot: Bot,
    msg: Message,
    dialogue: DateDialogue,
    config: Arc<Config>,
    store: Arc<dyn CellStore>,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    match submit_date(&dialogue, store.as_ref(), &config.date_cell, text).await? {
        DateOutcome::Saved(value) => {
            let (user, user_id) = sender(&msg);
            bot.send_message(chat_id, DATE_SAVED).await?;
            log_command_success(
                "InputDate",
                &user,
                user_id,
                chat_id.0,
                Some(&format!("{} = {}", config.date_cell, value)),
            );
        }
        DateOutcome::Rejected(reason) => {
            let (user, user_id) = sender(&msg);
            log_validation_error("date", text, &reason, &user, user_id, chat_id.0);
            bot.send_message(chat_id, DATE_INVALID).await?;
        }
        DateOutcome::Ignored => {}
    }
    Ok(())
}
