//! Tracing and logging setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Environment;

/// Telemetry initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("tracing subscriber already installed")]
    AlreadyInstalled,
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` overrides the default `info` filter. Production gets JSON
/// lines for the log pipeline; everything else gets the human-readable
/// format with file and line locations.
pub fn init_telemetry(env: Environment) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if env.is_production() {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry
            .with(fmt::layer().with_file(true).with_line_number(true))
            .try_init()
    };

    result.map_err(|_| TelemetryError::AlreadyInstalled)
}
