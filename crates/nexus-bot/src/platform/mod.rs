//! Chat platform port
//!
//! Commands talk to the platform only through [`ChatPlatform`]. The twilight
//! adapter in [`discord`] is the production implementation.

pub mod discord;

use std::time::Duration;

use async_trait::async_trait;
use nexus_core::Snowflake;
use thiserror::Error;

// ============================================================================
// Messages
// ============================================================================

/// A message received from a guild or direct channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    /// `None` for direct messages
    pub guild_id: Option<Snowflake>,
    pub author_id: Snowflake,
    pub author_is_bot: bool,
    pub content: String,
}

/// One embed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Embed author line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: Option<String>,
}

/// Platform-neutral rich embed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub author: Option<EmbedAuthor>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Add an inline field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: true,
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    pub fn author(mut self, name: impl Into<String>, icon_url: Option<String>) -> Self {
        self.author = Some(EmbedAuthor {
            name: name.into(),
            icon_url,
        });
        self
    }

    /// Value of the first field with this name
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Reply payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBody {
    Text(String),
    Embed(Embed),
}

/// An outgoing message, optionally deleted again after a delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub body: ReplyBody,
    pub delete_after: Option<Duration>,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            body: ReplyBody::Text(content.into()),
            delete_after: None,
        }
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            body: ReplyBody::Embed(embed),
            delete_after: None,
        }
    }

    pub fn delete_after(mut self, delay: Duration) -> Self {
        self.delete_after = Some(delay);
        self
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            ReplyBody::Text(text) => Some(text),
            ReplyBody::Embed(_) => None,
        }
    }

    pub fn as_embed(&self) -> Option<&Embed> {
        match &self.body {
            ReplyBody::Embed(embed) => Some(embed),
            ReplyBody::Text(_) => None,
        }
    }
}

/// `<#id>`
pub fn channel_mention(channel_id: Snowflake) -> String {
    format!("<#{channel_id}>")
}

/// `<@id>`
pub fn user_mention(user_id: Snowflake) -> String {
    format!("<@{user_id}>")
}

/// `<@&id>`
pub fn role_mention(role_id: Snowflake) -> String {
    format!("<@&{role_id}>")
}

// ============================================================================
// Members and stats
// ============================================================================

/// Guild-level permissions of a member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberAccess {
    pub administrator: bool,
    pub manage_messages: bool,
    pub role_ids: Vec<Snowflake>,
}

impl MemberAccess {
    pub fn administrator() -> Self {
        Self {
            administrator: true,
            manage_messages: true,
            role_ids: Vec::new(),
        }
    }

    pub fn with_roles(role_ids: Vec<Snowflake>) -> Self {
        Self {
            role_ids,
            ..Self::default()
        }
    }

    /// Administrators implicitly hold every permission
    pub fn can_manage_messages(&self) -> bool {
        self.administrator || self.manage_messages
    }
}

/// Session-wide counters for telemetry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuildStats {
    pub guilds: usize,
    pub users: u64,
}

// ============================================================================
// Port
// ============================================================================

/// Platform errors
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Request rejected before it was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP call to the platform failed
    #[error("Platform request failed: {0}")]
    Http(String),

    /// Response body could not be decoded
    #[error("Malformed platform response: {0}")]
    Decode(String),

    /// Gateway session is not usable
    #[error("Gateway error: {0}")]
    Gateway(String),
}

/// Result type for platform calls
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Capabilities the bot needs from the chat platform
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Send a reply and return the new message id
    async fn send(&self, channel_id: Snowflake, reply: Reply) -> PlatformResult<Snowflake>;

    async fn delete_message(&self, channel_id: Snowflake, message_id: Snowflake)
        -> PlatformResult<()>;

    /// Delete up to `limit` of the newest messages; returns how many went
    async fn purge(&self, channel_id: Snowflake, limit: usize) -> PlatformResult<usize>;

    async fn member_access(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> PlatformResult<MemberAccess>;

    /// Average gateway heartbeat round trip, if one was measured
    fn latency(&self) -> Option<Duration>;

    fn guild_stats(&self) -> GuildStats;

    /// Avatar of the bot account
    fn avatar_url(&self) -> Option<String>;

    /// Whether the session finished its initial handshake
    fn is_ready(&self) -> bool;
}
