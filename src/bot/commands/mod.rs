//! Slash commands.

use teloxide::utils::command::BotCommands;

/// Commands the bot answers to.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    /// Sends the main menu.
    #[command(description = "Показать меню действий")]
    Start,
    /// Lists the commands.
    #[command(description = "Показать эту справку")]
    Help,
    /// Drops a pending date entry.
    #[command(description = "Отменить ввод даты")]
    Cancel,
}
