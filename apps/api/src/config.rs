use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::sync::Semaphore;

use crate::llm_client::ANTHROPIC_API_URL;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub llm_api_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on in-flight model calls per bulk request. Unset = unbounded.
    pub bulk_max_concurrency: Option<usize>,
    /// Per-resume deadline in bulk mode. Unset = only the transport timeout applies.
    pub bulk_item_timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_api_url: std::env::var("LLM_API_URL")
                .unwrap_or_else(|_| ANTHROPIC_API_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            bulk_max_concurrency: concurrency_env("BULK_MAX_CONCURRENCY")?,
            bulk_item_timeout_secs: optional_env::<u64>("BULK_ITEM_TIMEOUT_SECS")?
                .filter(|n| *n > 0),
        })
    }

    pub fn bulk_item_timeout(&self) -> Option<Duration> {
        self.bulk_item_timeout_secs.map(Duration::from_secs)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        _ => Ok(None),
    }
}

/// A semaphore permit count: zero means unbounded, anything above
/// `Semaphore::MAX_PERMITS` is rejected at startup.
fn concurrency_env(key: &str) -> Result<Option<usize>> {
    match optional_env::<usize>(key)? {
        Some(n) if n > Semaphore::MAX_PERMITS => bail!(
            "Environment variable '{key}' must be at most {}, got {n}",
            Semaphore::MAX_PERMITS
        ),
        value => Ok(value.filter(|n| *n > 0)),
    }
}
