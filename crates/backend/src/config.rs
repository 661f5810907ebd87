use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub service_account_email: String,
    pub private_key: String,
    pub spreadsheet_id: String,
    pub sheet_tab: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            service_account_email: env::var("GOOGLE_SERVICE_ACCOUNT_EMAIL")
                .context("GOOGLE_SERVICE_ACCOUNT_EMAIL must be set")?,
            private_key: restore_newlines(
                &env::var("GOOGLE_PRIVATE_KEY").context("GOOGLE_PRIVATE_KEY must be set")?,
            ),
            spreadsheet_id: env::var("GOOGLE_SHEET_ID")
                .context("GOOGLE_SHEET_ID must be set")?,
            sheet_tab: env::var("SHEET_TAB").unwrap_or_else(|_| "API Form".to_string()),
        })
    }
}

/// Env files store the PEM key with literal `\n` sequences.
fn restore_newlines(key: &str) -> String {
    key.replace("\\n", "\n")
}
