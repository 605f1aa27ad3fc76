//! Runtime settings.
//!
//! Resolution order: CLI flag, then environment (a `.env` file is loaded
//! first), then the defaults below.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, EXIT_USAGE};

pub const DEFAULT_DATA_FILE: &str = "tracked_products.json";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const ENV_USER_AGENT: &str = "PRICE_TRACKER_USER_AGENT";
const ENV_TIMEOUT: &str = "PRICE_TRACKER_TIMEOUT_SECS";
const ENV_NO_COLOR: &str = "NO_COLOR";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_file: PathBuf,
    pub user_agent: String,
    pub timeout: Duration,
    pub color: bool,
}

impl Settings {
    /// Build settings from parsed CLI values plus the environment.
    ///
    /// `data_file` already reflects `PRICE_TRACKER_DATA_FILE` (clap reads it).
    pub fn resolve(data_file: PathBuf, no_color: bool) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(data_file, no_color, |key| std::env::var(key).ok())
    }

    fn from_lookup(
        data_file: PathBuf,
        no_color: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let user_agent = lookup(ENV_USER_AGENT)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let timeout_secs = match lookup(ENV_TIMEOUT) {
            Some(raw) => raw.trim().parse::<u64>().ok().filter(|&s| s > 0).ok_or_else(|| {
                AppError::new(
                    EXIT_USAGE,
                    format!("{ENV_TIMEOUT} must be a positive number of seconds, got '{raw}'."),
                )
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        // Any non-empty NO_COLOR disables colour (https://no-color.org).
        let env_no_color = lookup(ENV_NO_COLOR).is_some_and(|v| !v.is_empty());

        Ok(Self {
            data_file,
            user_agent,
            timeout: Duration::from_secs(timeout_secs),
            color: !(no_color || env_no_color),
        })
    }
}
