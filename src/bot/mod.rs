//! Telegram side of the bot.

/// Slash commands
pub mod commands;
/// Per-chat date entry state
pub mod dialogue;
/// Update routing and handler endpoints
pub mod handlers;
/// Inline menu layout
pub mod keyboard;
