//! # Observability Module
//!
//! Tracing subscriber setup for the `cookify` binary.
//!
//! Log output goes to stderr so stdout carries only the JSON response.
//! `RUST_LOG` selects levels; `COOKIFY_LOG_FORMAT=json` switches to structured
//! JSON lines.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_FORMAT_VAR: &str = "COOKIFY_LOG_FORMAT";

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Parse a format name; anything other than `json` is the console format
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }

    /// Format selected by `COOKIFY_LOG_FORMAT`
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_VAR)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// Install the global tracing subscriber
///
/// `default_level` applies when `RUST_LOG` is unset or invalid.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(default_level: &str, format: LogFormat) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let layer = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::debug!(?format, "Tracing initialized");
    Ok(())
}
