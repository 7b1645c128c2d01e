//! # Sheets Menu Bot Main Entry Point
//!
//! Initializes logging, loads configuration, authorizes against Google
//! Sheets, and runs the Telegram bot next to the health-check server.

use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheets_menu_bot::bot::commands::Command;
use sheets_menu_bot::bot::dialogue::DateInputState;
use sheets_menu_bot::bot::handlers::BotHandler;
use sheets_menu_bot::config::Config;
use sheets_menu_bot::services::google_auth::{ServiceAccountKey, ServiceAccountTokenSource};
use sheets_menu_bot::services::health::HealthService;
use sheets_menu_bot::services::sheets::{CellStore, SheetsClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheets_menu_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    info!("Starting Sheets Menu Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Spreadsheet: {}, HTTP Port: {}",
        config.spreadsheet_id, config.http_port
    );

    // Google Sheets access
    info!("Loading service account from {}...", config.credentials_path.display());
    let http = reqwest::Client::new();
    let key = ServiceAccountKey::from_file(&config.credentials_path)?;
    let tokens = Arc::new(ServiceAccountTokenSource::new(key, http.clone())?);
    let store: Arc<dyn CellStore> = Arc::new(SheetsClient::new(
        http,
        tokens,
        config.spreadsheet_id.clone(),
    )?);
    info!("Spreadsheet client initialized");

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_token);
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!("Failed to register bot commands: {}", e);
    }
    let handler = BotHandler::new(config.clone(), store.clone());
    info!("Telegram bot initialized successfully");

    // Initialize health service
    let health_service = HealthService::new(store);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        let storage: Arc<InMemStorage<DateInputState>> = InMemStorage::new();
        Dispatcher::builder(bot, handler.schema())
            .dependencies(dptree::deps![storage])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    info!("Application stopped");
    Ok(())
}
