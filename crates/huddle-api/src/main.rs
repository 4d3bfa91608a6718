//! huddle server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p huddle-api
//! ```
//!
//! Configuration is loaded from environment variables (see AppConfig).

use huddle_common::{init_telemetry, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Config decides the log format, so it loads before telemetry
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_telemetry(config.app.env) {
        eprintln!("Warning: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.server.port,
        "Starting huddle server"
    );

    if let Err(e) = huddle_api::run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
