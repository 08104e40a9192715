use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub arxiv_base_url: Option<String>,
    pub max_results: usize,
    pub fetch_keyword: String,
    pub fetch_interval: Duration,
    pub inference_timeout: Duration,
    pub allowed_origin: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            arxiv_base_url: env::var("ARXIV_BASE_URL").ok(),
            max_results: env::var("MAX_RESULTS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("MAX_RESULTS must be a valid number")?,
            fetch_keyword: env::var("FETCH_KEYWORD")
                .unwrap_or_else(|_| "machine learning".to_string()),
            // Short demo default; production deployments set this to a day
            fetch_interval: Duration::from_secs(
                env::var("FETCH_INTERVAL_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("FETCH_INTERVAL_SECS must be a valid number")?,
            ),
            inference_timeout: Duration::from_secs(
                env::var("INFERENCE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .context("INFERENCE_TIMEOUT_SECS must be a valid number")?,
            ),
            allowed_origin: env::var("CORS_ORIGIN").ok(),
        })
    }
}
