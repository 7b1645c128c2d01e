//! Log lines with a fixed prefix per event kind, on top of `tracing`.

use tracing::{debug, error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, user_id: u64, chat_id: i64) {
    info!(
        "CMD_START: {} by {}({}) in chat {}",
        command, user, user_id, chat_id
    );
}

/// Logs command completion with consistent format
pub fn log_command_success(
    command: &str,
    user: &str,
    user_id: u64,
    chat_id: i64,
    details: Option<&str>,
) {
    match details {
        Some(d) => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs an inline button press
pub fn log_callback(data: &str, user: &str, user_id: u64, chat_id: i64) {
    info!(
        "CALLBACK: '{}' from {}({}) in chat {}",
        data, user, user_id, chat_id
    );
}

/// Logs validation errors with consistent format
pub fn log_validation_error(
    field: &str,
    value: &str,
    error: &str,
    user: &str,
    user_id: u64,
    chat_id: i64,
) {
    warn!(
        "VALIDATION_ERROR: field '{}' value '{}' invalid: {} - user {}({}) in chat {}",
        field, value, error, user, user_id, chat_id
    );
}

/// Logs spreadsheet operations with consistent format
pub fn log_sheet_operation(operation: &str, cell: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("SHEET_OP: {} on {} - {}", operation, cell, d),
        None => debug!("SHEET_OP: {} on {}", operation, cell),
    }
}

/// Logs spreadsheet errors with consistent format
pub fn log_sheet_error(operation: &str, cell: &str, error: &str) {
    error!("SHEET_ERROR: {} on {} failed: {}", operation, cell, error);
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
