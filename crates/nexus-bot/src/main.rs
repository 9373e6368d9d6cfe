//! Nexus bot entry point
//!
//! Run with:
//! ```bash
//! cargo run -p nexus-bot
//! ```
//!
//! Configuration is loaded from environment variables.

use nexus_common::{try_init_tracing_with_config, AppConfig, AppError, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first so the log format follows APP_ENV
    let config = AppConfig::from_env();
    let tracing_config = config
        .as_ref()
        .map_or_else(|_| TracingConfig::default(), |c| TracingConfig::for_environment(c.app.env));

    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let result = match config {
        Ok(config) => run(config).await,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            Err(e.into())
        }
    };

    if let Err(e) = result {
        error!(error = %e, code = e.error_code(), "Fatal startup error");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    info!(
        app = %config.app.name,
        env = ?config.app.env,
        database = %config.database.path,
        "Starting Nexus bot..."
    );

    nexus_bot::run(config).await
}
