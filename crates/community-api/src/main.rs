//! Community moderation API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p community-api
//! ```
//!
//! Configuration is read from environment variables (and `.env` if present).

use community_common::{init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    let env = config.as_ref().map(|c| c.app.env).unwrap_or_default();
    if let Err(e) = init_tracing(&TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        "Starting community moderation API"
    );

    if let Err(e) = community_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
