// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Log setup. Everything goes to stderr so exports on stdout stay clean.

use anyhow::{anyhow, Result};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `warn` or `callroute=debug`.
    pub log_level: String,
    /// One JSON object per event instead of human-readable lines.
    pub json_logs: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `config.log_level`.
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| anyhow!("invalid log level '{}': {}", config.log_level, e))?,
    };

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let installed = if config.json_logs {
        let layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true);
        subscriber.with(layer).try_init()
    } else {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);
        subscriber.with(layer).try_init()
    };
    installed.map_err(|e| anyhow!("tracing already initialized: {}", e))?;

    debug!(
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "tracing initialized"
    );
    Ok(())
}
