//! # Sheets Menu Bot
//!
//! A Telegram bot that shows an inline menu of small actions.
//!
//! ## Features
//! - Map and YooMoney payment links
//! - Sends a fixed picture on request
//! - Reads a Google Sheets cell and reports its value
//! - Asks for a `DD.MM.YYYY` date and writes it to the sheet

/// Bot commands, menu, date dialogue and update handlers
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Google Sheets, YooMoney and health-check services
pub mod services;
/// Logging helpers and input validation
pub mod utils;
