//! One-off YooMoney authorization.
//!
//! Prints the page to open, reads back the URL YooMoney redirected to, and
//! prints the resulting access token.

use anyhow::{anyhow, Result};
use std::io::{self, BufRead, Write};

use sheets_menu_bot::config::YooMoneyConfig;
use sheets_menu_bot::services::yoomoney::{extract_code, YooMoneyAuthorizer};
use sheets_menu_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheets_menu_bot=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = YooMoneyConfig::from_env()?;
    let authorizer = YooMoneyAuthorizer::new(reqwest::Client::new(), config)?;

    println!("💳 YooMoney authorization");
    println!("=========================");

    let page = authorizer.start().await?;
    println!("Open this page and grant access:");
    println!("{page}");
    println!();
    print!("Paste the URL you were redirected to: ");
    io::stdout().flush()?;

    let mut redirected = String::new();
    io::stdin().lock().read_line(&mut redirected)?;
    if redirected.trim().is_empty() {
        return Err(anyhow!("No redirect URL given"));
    }

    let code = extract_code(&redirected)?;
    let token = authorizer.exchange_code(&code).await?;
    log_system_event("YooMoney authorization complete", None);

    println!();
    println!("✅ Access token:");
    println!("{token}");
    println!("Keep it secret; it grants access to the wallet.");
    Ok(())
}
