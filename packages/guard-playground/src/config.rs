use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Playground configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Caller identity; `None` runs the query anonymously
    pub user_id: Option<i64>,
    pub role: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            user_id: env::var("PLAYGROUND_USER_ID")
                .ok()
                .map(|id| id.parse::<i64>())
                .transpose()
                .context("PLAYGROUND_USER_ID must be a valid number")?,
            role: env::var("PLAYGROUND_ROLE").unwrap_or_else(|_| "user".to_string()),
        })
    }
}
