//! Subscriber setup
//!
//! `RUST_LOG`, when set, replaces the configured filter entirely.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::Environment;

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level for our own crates when `RUST_LOG` is unset
    pub level: Level,
    pub format: LogFormat,
    /// Log span open and close, useful for seeing request latency locally
    pub span_events: bool,
}

impl TracingConfig {
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: Level::DEBUG,
                format: LogFormat::Pretty,
                span_events: true,
            },
            Environment::Staging | Environment::Production => Self {
                level: Level::INFO,
                format: LogFormat::Json,
                span_events: false,
            },
        }
    }

    /// Directives used when `RUST_LOG` is unset
    ///
    /// sqlx and hyper stay one step quieter: at debug they log every query
    /// and frame.
    pub fn default_directives(&self) -> String {
        let dependencies = if self.level >= Level::DEBUG {
            Level::INFO
        } else {
            Level::WARN
        };
        format!(
            "{level},sqlx={dependencies},hyper={dependencies},tower_http={level}",
            level = self.level
        )
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directives()))
    }
}

/// Install the global subscriber
///
/// Fails with [`TracingError::AlreadyInitialized`] on a second call.
pub fn init_tracing(config: &TracingConfig) -> Result<(), TracingError> {
    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let (json, pretty) = match config.format {
        LogFormat::Json => (
            Some(fmt::layer().json().with_current_span(true).with_span_events(span_events)),
            None,
        ),
        LogFormat::Pretty => (
            None,
            Some(fmt::layer().with_file(true).with_line_number(true).with_span_events(span_events)),
        ),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(json)
        .with(pretty)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)?;

    tracing::debug!(level = %config.level, format = ?config.format, "Tracing initialized");
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
