//! Heartbeat telemetry
//!
//! Logs session health on a fixed interval once the gateway session is ready.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use crate::platform::ChatPlatform;

/// One telemetry sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryPulse {
    pub latency_ms: Option<f64>,
    pub guilds: usize,
    pub users: u64,
}

/// Sample the platform; `None` until the session is ready
pub fn sample(platform: &dyn ChatPlatform) -> Option<TelemetryPulse> {
    if !platform.is_ready() {
        return None;
    }
    let stats = platform.guild_stats();

    Some(TelemetryPulse {
        latency_ms: platform.latency().map(|l| l.as_secs_f64() * 1000.0),
        guilds: stats.guilds,
        users: stats.users,
    })
}

/// Spawn the heartbeat loop; abort the handle to stop it
pub fn spawn_heartbeat(platform: Arc<dyn ChatPlatform>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match sample(platform.as_ref()) {
                Some(pulse) => debug!(
                    latency_ms = ?pulse.latency_ms,
                    guilds = pulse.guilds,
                    users = pulse.users,
                    "Telemetry pulse"
                ),
                None => trace!("Telemetry skipped, session not ready"),
            }
        }
    })
}
