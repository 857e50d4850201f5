//! Runtime configuration loaded from the environment.
//!
//! All knobs use the `MOODCHAT_` prefix and have sensible defaults so the
//! server boots with no configuration at all (fallback training included).

use std::env;
use std::path::PathBuf;
use validator::Validate;

use crate::error::AppError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_MESSAGE_LEN: usize = 2000;
const DEFAULT_RATE_LIMIT: usize = 30;
const DEFAULT_RATE_WINDOW_SECS: u64 = 60;

/// Server configuration, validated at startup.
#[derive(Debug, Clone, Validate)]
pub struct Config {
    /// Interface to bind the HTTP server to.
    #[validate(length(min = 1))]
    pub host: String,
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Root directory for data/, models/ and the feedback log.
    pub data_dir: PathBuf,
    /// Train from the dataset (or built-in samples) when no artifacts exist.
    pub train_if_missing: bool,
    /// Training dataset path override. Defaults to `<data_dir>/data/emotion.csv`.
    pub dataset_path: Option<PathBuf>,
    /// Upper bound on accepted message length, in characters.
    #[validate(range(min = 1, max = 8192))]
    pub max_message_len: usize,
    /// Requests allowed per client within `rate_window_secs`.
    #[validate(range(min = 1))]
    pub rate_limit: usize,
    /// Sliding-window length for the rate limiter, in seconds.
    #[validate(range(min = 1))]
    pub rate_window_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from("."),
            train_if_missing: true,
            dataset_path: None,
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
            rate_limit: DEFAULT_RATE_LIMIT,
            rate_window_secs: DEFAULT_RATE_WINDOW_SECS,
        }
    }
}

impl Config {
    /// Build the configuration from `MOODCHAT_*` environment variables.
    /// Callers run `dotenv().ok()` first so a local `.env` is honored.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Config::default();

        if let Ok(host) = env::var("MOODCHAT_HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("MOODCHAT_PORT") {
            config.port = port
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid MOODCHAT_PORT: {}", port)))?;
        }
        if let Ok(dir) = env::var("MOODCHAT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(flag) = env::var("MOODCHAT_TRAIN_IF_MISSING") {
            config.train_if_missing = parse_bool(&flag)
                .ok_or_else(|| AppError::Config(format!("Invalid MOODCHAT_TRAIN_IF_MISSING: {}", flag)))?;
        }
        if let Ok(path) = env::var("MOODCHAT_DATASET") {
            config.dataset_path = Some(PathBuf::from(path));
        }
        if let Ok(len) = env::var("MOODCHAT_MAX_MESSAGE_LEN") {
            config.max_message_len = len
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid MOODCHAT_MAX_MESSAGE_LEN: {}", len)))?;
        }
        if let Ok(limit) = env::var("MOODCHAT_RATE_LIMIT") {
            config.rate_limit = limit
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid MOODCHAT_RATE_LIMIT: {}", limit)))?;
        }
        if let Ok(window) = env::var("MOODCHAT_RATE_WINDOW_SECS") {
            config.rate_window_secs = window
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid MOODCHAT_RATE_WINDOW_SECS: {}", window)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Socket address string for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
