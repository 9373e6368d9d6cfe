//! Test fixtures and data generators
//!
//! Provides reusable identifiers and messages for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use nexus_bot::platform::IncomingMessage;
use nexus_common::{BotConfig, NodeTestConfig};
use nexus_core::Snowflake;

/// Counter for unique test ids
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique snowflake for test data
pub fn unique_id() -> Snowflake {
    Snowflake::new(900_000_000_000_000_000 + COUNTER.fetch_add(1, Ordering::SeqCst))
}

pub const GUILD: Snowflake = Snowflake::new(42);
pub const OTHER_GUILD: Snowflake = Snowflake::new(43);
pub const CHANNEL: Snowflake = Snowflake::new(500);
pub const LOG_CHANNEL: Snowflake = Snowflake::new(501);
pub const ADMIN: Snowflake = Snowflake::new(1_001);
pub const MODERATOR: Snowflake = Snowflake::new(1_002);
pub const MEMBER: Snowflake = Snowflake::new(1_003);
pub const TRUSTED_ROLE: Snowflake = Snowflake::new(7_001);

/// Bot settings used by every test bot
pub fn test_bot_config() -> BotConfig {
    BotConfig {
        token: "test-token".to_string(),
        version: "4.2.0-stable".to_string(),
        embed_color: 0x002b_2d31,
        telemetry_interval_secs: 60,
    }
}

pub fn test_node_test_config() -> NodeTestConfig {
    NodeTestConfig {
        default_host: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
    }
}

/// Builder for incoming messages
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    message: IncomingMessage,
}

impl MessageBuilder {
    /// Guild message in [`CHANNEL`] of [`GUILD`]
    pub fn new(author_id: Snowflake, content: impl Into<String>) -> Self {
        Self {
            message: IncomingMessage {
                id: unique_id(),
                channel_id: CHANNEL,
                guild_id: Some(GUILD),
                author_id,
                author_is_bot: false,
                content: content.into(),
            },
        }
    }

    pub fn in_guild(mut self, guild_id: Snowflake) -> Self {
        self.message.guild_id = Some(guild_id);
        self
    }

    pub fn direct(mut self) -> Self {
        self.message.guild_id = None;
        self
    }

    pub fn from_bot(mut self) -> Self {
        self.message.author_is_bot = true;
        self
    }

    pub fn build(self) -> IncomingMessage {
        self.message
    }
}

/// Shorthand for a guild message
pub fn message(author_id: Snowflake, content: &str) -> IncomingMessage {
    MessageBuilder::new(author_id, content).build()
}
