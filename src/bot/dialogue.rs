//! Per-chat date entry: the menu button switches the chat into
//! `AwaitingDate`, a valid date or `/cancel` switches it back.

use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::bot::handlers::HandlerError;
use crate::services::sheets::{CellStore, SheetsError};
use crate::utils::validation::validate_date;

/// Sent when the date button is pressed.
pub const DATE_PROMPT: &str = "Введите дату в формате ДД.ММ.ГГГГ (например, 01.01.2024):";
/// Sent after the date was written to the sheet.
pub const DATE_SAVED: &str = "Дата верна и записана в Google Sheets.";
/// Sent for text that is not a valid `DD.MM.YYYY` date.
pub const DATE_INVALID: &str = "Дата неверна. Пожалуйста, введите дату в формате ДД.ММ.ГГГГ.";
/// Sent after `/cancel` dropped a pending date entry.
pub const DATE_CANCELLED: &str = "Ввод даты отменён.";

/// Whether a chat's next text message is read as a date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateInputState {
    /// Text messages are not interpreted.
    #[default]
    Idle,
    /// The next valid date is written to the sheet.
    AwaitingDate,
}

/// Dialogue handle for one chat, kept in memory.
pub type DateDialogue = Dialogue<DateInputState, InMemStorage<DateInputState>>;

/// What happened to one message received while a date was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateOutcome {
    /// Written to the sheet as typed (after trimming).
    Saved(String),
    /// Not a `DD.MM.YYYY` date; carries the reason.
    Rejected(String),
    /// Not looked at: empty text, a command, or a chat that is not waiting
    /// for a date. The chat state stays as it was.
    Ignored,
}

impl DateOutcome {
    /// State the chat ends up in when it was in `current` before the message.
    pub fn next_state(&self, current: DateInputState) -> DateInputState {
        match self {
            DateOutcome::Saved(_) => DateInputState::Idle,
            DateOutcome::Rejected(_) => DateInputState::AwaitingDate,
            DateOutcome::Ignored => current,
        }
    }
}

/// Validates `text` and, when it is a date, writes it to `cell`.
pub async fn receive_date(
    store: &dyn CellStore,
    cell: &str,
    text: &str,
) -> Result<DateOutcome, SheetsError> {
    let input = text.trim();
    if input.is_empty() || input.starts_with('/') {
        return Ok(DateOutcome::Ignored);
    }

    match validate_date(input) {
        Ok(_) => {
            store.write_cell(cell, input).await?;
            Ok(DateOutcome::Saved(input.to_string()))
        }
        Err(e) => Ok(DateOutcome::Rejected(e.to_string())),
    }
}

/// Puts the chat into `AwaitingDate`.
pub async fn start_date_input(dialogue: &DateDialogue) -> Result<(), HandlerError> {
    dialogue.update(DateInputState::AwaitingDate).await?;
    Ok(())
}

/// Feeds a text message into the flow. Chats that are not waiting for a
/// date get `Ignored` without touching the sheet.
pub async fn submit_date(
    dialogue: &DateDialogue,
    store: &dyn CellStore,
    cell: &str,
    text: &str,
) -> Result<DateOutcome, HandlerError> {
    let current = dialogue.get_or_default().await?;
    if current != DateInputState::AwaitingDate {
        return Ok(DateOutcome::Ignored);
    }

    let outcome = receive_date(store, cell, text).await?;
    if outcome.next_state(current) == DateInputState::Idle {
        dialogue.exit().await?;
    }
    Ok(outcome)
}

/// Returns `true` if a pending date entry was dropped.
pub async fn cancel_date_input(dialogue: &DateDialogue) -> Result<bool, HandlerError> {
    if dialogue.get_or_default().await? != DateInputState::AwaitingDate {
        return Ok(false);
    }
    dialogue.exit().await?;
    Ok(true)
}
