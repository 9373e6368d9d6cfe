//! Bot state
//!
//! Shared dependencies handed to every command handler.

use std::sync::Arc;
use std::time::{Duration, Instant};

use nexus_common::{BotConfig, NodeTestConfig};
use nexus_service::ServiceContext;
use uuid::Uuid;

use crate::platform::ChatPlatform;

/// Identity shown by the `system` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    /// Random per process, 8 hex characters
    pub build_hash: String,
    pub embed_color: u32,
}

impl BuildInfo {
    pub fn new(version: impl Into<String>, embed_color: u32) -> Self {
        Self {
            version: version.into(),
            build_hash: generate_build_hash(),
            embed_color,
        }
    }
}

impl From<&BotConfig> for BuildInfo {
    fn from(config: &BotConfig) -> Self {
        Self::new(config.version.clone(), config.embed_color)
    }
}

/// 8 lowercase hex characters from a random UUID
pub fn generate_build_hash() -> String {
    let mut hash = Uuid::new_v4().simple().to_string();
    hash.truncate(8);
    hash
}

/// Bot application state
///
/// Holds all shared dependencies for command handlers.
#[derive(Clone)]
pub struct BotState {
    services: ServiceContext,
    platform: Arc<dyn ChatPlatform>,
    build: Arc<BuildInfo>,
    node_test: Arc<NodeTestConfig>,
    http: reqwest::Client,
    booted_at: Instant,
}

impl BotState {
    /// Create a new bot state
    pub fn new(
        services: ServiceContext,
        platform: Arc<dyn ChatPlatform>,
        build: BuildInfo,
        node_test: NodeTestConfig,
    ) -> Self {
        Self {
            services,
            platform,
            build: Arc::new(build),
            node_test: Arc::new(node_test),
            http: reqwest::Client::new(),
            booted_at: Instant::now(),
        }
    }

    /// Get the service context
    pub fn services(&self) -> &ServiceContext {
        &self.services
    }

    /// Get the chat platform
    pub fn platform(&self) -> &dyn ChatPlatform {
        self.platform.as_ref()
    }

    pub fn build(&self) -> &BuildInfo {
        &self.build
    }

    pub fn node_test(&self) -> &NodeTestConfig {
        &self.node_test
    }

    /// Client for outbound probes
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn uptime(&self) -> Duration {
        self.booted_at.elapsed()
    }
}

impl std::fmt::Debug for BotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotState")
            .field("services", &self.services)
            .field("build", &self.build)
            .field("platform", &"dyn ChatPlatform")
            .finish_non_exhaustive()
    }
}
