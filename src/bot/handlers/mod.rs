//! Update routing.
//!
//! Commands are matched first, then plain text, then callback queries. The
//! date dialogue is entered for every update so each endpoint gets its chat's
//! state.

/// Menu button presses
pub mod callback;
/// Commands and free text
pub mod message;

use std::sync::Arc;
use teloxide::{
    dispatching::{dialogue, dialogue::InMemStorage, UpdateHandler},
    prelude::*,
};

use crate::bot::commands::Command;
use crate::bot::dialogue::{DateDialogue, DateInputState};
use crate::config::Config;
use crate::services::sheets::CellStore;

/// Error type every endpoint returns.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
/// Result of one endpoint.
pub type HandlerResult = Result<(), HandlerError>;

/// Shared state the endpoints need.
pub struct BotHandler {
    /// Bot settings.
    pub config: Arc<Config>,
    /// Spreadsheet the cell actions go to.
    pub store: Arc<dyn CellStore>,
}

impl BotHandler {
    /// Bundles the configuration and the cell store.
    pub fn new(config: Arc<Config>, store: Arc<dyn CellStore>) -> Self {
        Self { config, store }
    }

    /// Handler tree for the dispatcher. Needs `Me` and the dialogue storage
    /// among the dependencies.
    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        let config_cmd = self.config.clone();
        let config_text = self.config.clone();
        let store_text = self.store.clone();
        let config_callback = self.config.clone();
        let store_callback = self.store.clone();

        dialogue::enter::<Update, InMemStorage<DateInputState>, DateInputState, _>()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(
                        move |bot: Bot, msg: Message, cmd: Command, dialogue: DateDialogue| {
                            let config = config_cmd.clone();
                            async move {
                                message::command_handler(bot, msg, cmd, dialogue, config).await
                            }
                        },
                    ),
            )
            .branch(Update::filter_message().endpoint(
                move |bot: Bot, msg: Message, dialogue: DateDialogue| {
                    let config = config_text.clone();
                    let store = store_text.clone();
                    async move { message::text_handler(bot, msg, dialogue, config, store).await }
                },
            ))
            .branch(Update::filter_callback_query().endpoint(
                move |bot: Bot, q: CallbackQuery, dialogue: DateDialogue| {
                    let config = config_callback.clone();
                    let store = store_callback.clone();
                    async move { callback::callback_handler(bot, q, dialogue, config, store).await }
                },
            ))
    }
}
