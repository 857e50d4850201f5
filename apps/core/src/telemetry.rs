//! Tracing subscriber setup shared by the serve and train binaries.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::error::AppError;

/// Install the global subscriber: `RUST_LOG`-style filtering plus bunyan JSON
/// output on stdout. Calling this twice returns an error, so binaries call it
/// exactly once at startup.
pub fn init(name: &str, default_filter: &str) -> Result<(), AppError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let formatting_layer = BunyanFormattingLayer::new(name.to_string(), std::io::stdout);

    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::Config(format!("Failed to install tracing subscriber: {}", e)))
}
