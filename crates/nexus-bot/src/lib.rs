//! # nexus-bot
//!
//! Chat bot runtime: gateway session, text command dispatch and heartbeat
//! telemetry, on top of the settings and audit services.

pub mod commands;
pub mod heartbeat;
pub mod platform;
pub mod state;

pub use commands::{CommandDispatcher, DispatchOutcome};
pub use state::{BotState, BuildInfo};

use std::sync::Arc;

use nexus_common::{AppConfig, AppError};
use nexus_db::repositories::error::map_db_error;
use nexus_service::ServiceContext;
use tracing::info;
use twilight_gateway::CloseFrame;

use crate::platform::discord::{run_gateway, DiscordPlatform};
use crate::platform::ChatPlatform;

/// Open the store and make sure the schema exists
///
/// Any failure here is fatal: the bot must not run on an unconfirmed schema.
pub async fn create_service_context(config: &AppConfig) -> Result<ServiceContext, AppError> {
    info!(path = %config.database.path, "Opening registry database...");
    let pool = nexus_db::create_pool(&nexus_db::DatabaseConfig::from(&config.database))
        .await
        .map_err(map_db_error)?;

    nexus_db::ensure_schema(&pool).await?;
    info!("Registry schema confirmed");

    Ok(ServiceContext::sqlite(pool))
}

/// Run the bot until the gateway closes or Ctrl-C is received
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let services = create_service_context(&config).await?;

    let (platform, shard) = DiscordPlatform::new(&config.bot.token);
    let platform = Arc::new(platform);
    let sender = shard.sender();

    let build = BuildInfo::from(&config.bot);
    info!(version = %build.version, build = %build.build_hash, "Subsystems initialized");

    let state = BotState::new(
        services,
        Arc::clone(&platform) as Arc<dyn ChatPlatform>,
        build,
        config.node_test.clone(),
    );
    let dispatcher = Arc::new(CommandDispatcher::new(state));

    let heartbeat = heartbeat::spawn_heartbeat(
        Arc::clone(&platform) as Arc<dyn ChatPlatform>,
        config.bot.telemetry_interval(),
    );

    tokio::select! {
        () = run_gateway(shard, platform, dispatcher) => {
            info!("Gateway closed");
        }
        signal = tokio::signal::ctrl_c() => {
            signal.map_err(AppError::internal)?;
            info!("Shutdown signal received, closing gateway session");
            // The shard is dropped with the select, so a failed close is moot
            let _ = sender.close(CloseFrame::NORMAL);
        }
    }

    heartbeat.abort();
    Ok(())
}
