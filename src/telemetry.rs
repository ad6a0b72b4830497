//! Tracing subscriber setup.
//!
//! The subscriber is installed once by the binary. Library code only emits
//! events and spans.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Installs the global subscriber using the level and format from `config`.
///
/// # Errors
///
/// Returns an error if the log filter does not parse or a subscriber is
/// already installed.
pub fn init(config: &Config) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("Invalid log filter '{}'", config.log_level))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init()
            .context("Failed to install tracing subscriber")?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_level(true)
                    .with_target(false),
            )
            .try_init()
            .context("Failed to install tracing subscriber")?;
    }

    Ok(())
}
