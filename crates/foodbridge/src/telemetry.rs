//! Tracing bootstrap for the matching service.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to
//! the matching crates while hyper/tower internals stay at `warn`, so
//! ranking and dispatch logs are not drowned in connection chatter.

use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    Filter { directives: String, source: ParseError },
    Init(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter { directives, .. } => {
                write!(f, "invalid log filter directives '{directives}'")
            }
            TelemetryError::Init(err) => write!(f, "telemetry init failed: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Init(err) => Some(&**err),
        }
    }
}

fn default_directives(level: &str) -> String {
    format!("{level},hyper=warn,tower=warn")
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = default_directives(&config.log_level);
            EnvFilter::try_new(&directives)
                .map_err(|source| TelemetryError::Filter { directives, source })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Init)
}
