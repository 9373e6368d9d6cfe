//! Discord adapter over twilight
//!
//! One gateway shard feeds the in-memory cache and the command dispatcher;
//! every outgoing call goes through the twilight HTTP client.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use nexus_core::Snowflake;
use tracing::{debug, error, info, trace, warn};

use twilight_cache_inmemory::{InMemoryCache, ResourceType};
use twilight_gateway::{Event, EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client as HttpClient;
use twilight_model::channel::message::Embed as DiscordEmbed;
use twilight_model::channel::Message;
use twilight_model::guild::Permissions;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, MessageMarker, UserMarker};
use twilight_model::id::Id;
use twilight_util::builder::embed::{
    EmbedAuthorBuilder, EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder, ImageSource,
};

use super::{
    ChatPlatform, Embed, GuildStats, IncomingMessage, MemberAccess, PlatformError,
    PlatformResult, Reply, ReplyBody,
};
use crate::commands::CommandDispatcher;

/// Discord epoch (2015-01-01) in unix milliseconds
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Bulk delete only accepts messages younger than two weeks
const BULK_DELETE_MAX_AGE: Duration = Duration::from_secs(14 * 24 * 60 * 60 - 60);

/// Bulk delete and history pages are capped at 100 messages
const PAGE_SIZE: usize = 100;

const CDN: &str = "https://cdn.discordapp.com";

/// Twilight-backed [`ChatPlatform`]
pub struct DiscordPlatform {
    http: Arc<HttpClient>,
    cache: Arc<InMemoryCache>,
    ready: AtomicBool,
    /// Average heartbeat round trip in microseconds, 0 until measured
    latency_micros: AtomicU64,
}

impl DiscordPlatform {
    /// Build the HTTP client, cache and the single gateway shard
    pub fn new(token: &str) -> (Self, Shard) {
        let http = Arc::new(HttpClient::new(token.to_string()));

        let cache: InMemoryCache = InMemoryCache::builder()
            .resource_types(
                ResourceType::GUILD
                    | ResourceType::CHANNEL
                    | ResourceType::ROLE
                    | ResourceType::USER_CURRENT,
            )
            .build();

        let intents = Intents::GUILDS
            | Intents::GUILD_MEMBERS
            | Intents::GUILD_MESSAGES
            | Intents::MESSAGE_CONTENT;
        let shard = Shard::new(ShardId::ONE, token.to_string(), intents);

        let platform = Self {
            http,
            cache: Arc::new(cache),
            ready: AtomicBool::new(false),
            latency_micros: AtomicU64::new(0),
        };

        (platform, shard)
    }

    /// Update the cache and session state from one gateway event
    fn observe(&self, event: &Event, shard: &Shard) {
        self.cache.update(event);

        if let Some(average) = shard.latency().average() {
            let micros = u64::try_from(average.as_micros()).unwrap_or(u64::MAX).max(1);
            self.latency_micros.store(micros, Ordering::Relaxed);
        }

        match event {
            Event::Ready(ready) => {
                self.ready.store(true, Ordering::SeqCst);
                info!(
                    user = %ready.user.name,
                    user_id = %ready.user.id,
                    guilds = ready.guilds.len(),
                    "Gateway session ready"
                );
            }
            Event::Resumed => {
                self.ready.store(true, Ordering::SeqCst);
                debug!("Gateway session resumed");
            }
            Event::GatewayReconnect | Event::GatewayInvalidateSession(_) => {
                self.ready.store(false, Ordering::SeqCst);
                warn!("Gateway session interrupted");
            }
            _ => {}
        }
    }

    async fn delete_batch(
        &self,
        channel: Id<ChannelMarker>,
        ids: &[Id<MessageMarker>],
    ) -> PlatformResult<()> {
        match ids {
            [] => Ok(()),
            [single] => self
                .http
                .delete_message(channel, *single)
                .await
                .map(|_| ())
                .map_err(http_error),
            many => self
                .http
                .delete_messages(channel, many)
                .await
                .map(|_| ())
                .map_err(http_error),
        }
    }

    async fn fetch_page(
        &self,
        channel: Id<ChannelMarker>,
        limit: usize,
        before: Option<Id<MessageMarker>>,
    ) -> PlatformResult<Vec<Message>> {
        let request = self.http.channel_messages(channel).limit(limit as u16);
        let response = match before {
            Some(id) => request.before(id).await,
            None => request.await,
        }
        .map_err(http_error)?;

        response.models().await.map_err(decode_error)
    }
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    async fn send(&self, channel_id: Snowflake, reply: Reply) -> PlatformResult<Snowflake> {
        let channel = to_id::<ChannelMarker>(channel_id)?;

        let embeds: Vec<DiscordEmbed> = match &reply.body {
            ReplyBody::Embed(embed) => vec![build_embed(embed)?],
            ReplyBody::Text(_) => Vec::new(),
        };
        let request = self.http.create_message(channel);
        let request = match &reply.body {
            ReplyBody::Text(text) => request.content(text),
            ReplyBody::Embed(_) => request.embeds(&embeds),
        };

        let message = request
            .await
            .map_err(http_error)?
            .model()
            .await
            .map_err(decode_error)?;

        if let Some(delay) = reply.delete_after {
            let http = Arc::clone(&self.http);
            let message_id = message.id;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if let Err(e) = http.delete_message(channel, message_id).await {
                    warn!(error = %e, message_id = %message_id, "Failed to delete expired reply");
                }
            });
        }

        Ok(Snowflake::new(message.id.get()))
    }

    async fn delete_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> PlatformResult<()> {
        self.http
            .delete_message(to_id(channel_id)?, to_id(message_id)?)
            .await
            .map_err(http_error)?;
        Ok(())
    }

    async fn purge(&self, channel_id: Snowflake, limit: usize) -> PlatformResult<usize> {
        let channel = to_id::<ChannelMarker>(channel_id)?;
        let now_ms = unix_millis();

        let mut remaining = limit;
        let mut before = None;
        let mut deleted = 0;

        while remaining > 0 {
            let page_limit = remaining.min(PAGE_SIZE);
            let page = self.fetch_page(channel, page_limit, before).await?;
            let Some(oldest) = page.last() else {
                break;
            };
            before = Some(oldest.id);

            let (fresh, stale): (Vec<_>, Vec<_>) = page
                .iter()
                .map(|m| m.id)
                .partition(|id| is_bulk_deletable(*id, now_ms));

            self.delete_batch(channel, &fresh).await?;
            for id in &stale {
                self.http
                    .delete_message(channel, *id)
                    .await
                    .map_err(http_error)?;
            }

            deleted += page.len();
            remaining -= page.len();
            if page.len() < page_limit {
                break;
            }
        }

        debug!(channel_id = %channel_id, deleted, "Purge complete");
        Ok(deleted)
    }

    async fn member_access(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> PlatformResult<MemberAccess> {
        let guild_id = to_id::<GuildMarker>(guild_id)?;
        let user_id = to_id::<UserMarker>(user_id)?;

        let guild = self
            .http
            .guild(guild_id)
            .await
            .map_err(http_error)?
            .model()
            .await
            .map_err(decode_error)?;
        let member = self
            .http
            .guild_member(guild_id, user_id)
            .await
            .map_err(http_error)?
            .model()
            .await
            .map_err(decode_error)?;

        // The @everyone role shares the guild's id
        let permissions = guild
            .roles
            .iter()
            .filter(|role| role.id.get() == guild_id.get() || member.roles.contains(&role.id))
            .fold(Permissions::empty(), |acc, role| acc | role.permissions);

        let administrator =
            guild.owner_id == user_id || permissions.contains(Permissions::ADMINISTRATOR);

        Ok(MemberAccess {
            administrator,
            manage_messages: administrator || permissions.contains(Permissions::MANAGE_MESSAGES),
            role_ids: member
                .roles
                .iter()
                .map(|id| Snowflake::new(id.get()))
                .collect(),
        })
    }

    fn latency(&self) -> Option<Duration> {
        match self.latency_micros.load(Ordering::Relaxed) {
            0 => None,
            micros => Some(Duration::from_micros(micros)),
        }
    }

    fn guild_stats(&self) -> GuildStats {
        let guilds = self.cache.stats().guilds();
        let users = self
            .cache
            .iter()
            .guilds()
            .filter_map(|guild| guild.value().member_count())
            .sum();

        GuildStats { guilds, users }
    }

    fn avatar_url(&self) -> Option<String> {
        self.cache.current_user().map(|user| match user.avatar {
            Some(hash) => format!("{CDN}/avatars/{}/{hash}.png", user.id),
            None => default_avatar_url(user.id.get()),
        })
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

/// Drive the shard until the gateway closes, handing each guild message to
/// the dispatcher on its own task
pub async fn run_gateway(
    mut shard: Shard,
    platform: Arc<DiscordPlatform>,
    dispatcher: Arc<CommandDispatcher>,
) {
    let shard_id = shard.id().number();
    info!(shard_id, "Shard started, listening for events");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(e) => {
                error!(shard_id, error = ?e, "Error receiving gateway event");
                continue;
            }
        };

        platform.observe(&event, &shard);

        match event {
            Event::MessageCreate(message) => {
                let incoming = incoming_message(&message.0);
                let dispatcher = Arc::clone(&dispatcher);
                tokio::spawn(async move {
                    dispatcher.dispatch(&incoming).await;
                });
            }
            other => trace!(shard_id, kind = ?other.kind(), "Unhandled event"),
        }
    }

    warn!(shard_id, "Shard event loop ended");
}

fn incoming_message(message: &Message) -> IncomingMessage {
    IncomingMessage {
        id: Snowflake::new(message.id.get()),
        channel_id: Snowflake::new(message.channel_id.get()),
        guild_id: message.guild_id.map(|id| Snowflake::new(id.get())),
        author_id: Snowflake::new(message.author.id.get()),
        author_is_bot: message.author.bot,
        content: message.content.clone(),
    }
}

fn build_embed(embed: &Embed) -> PlatformResult<DiscordEmbed> {
    let mut builder = EmbedBuilder::new();

    if let Some(title) = &embed.title {
        builder = builder.title(title.clone());
    }
    if let Some(description) = &embed.description {
        builder = builder.description(description.clone());
    }
    if let Some(color) = embed.color {
        builder = builder.color(color);
    }
    for field in &embed.fields {
        let mut field_builder = EmbedFieldBuilder::new(field.name.clone(), field.value.clone());
        if field.inline {
            field_builder = field_builder.inline();
        }
        builder = builder.field(field_builder);
    }
    if let Some(footer) = &embed.footer {
        builder = builder.footer(EmbedFooterBuilder::new(footer.clone()));
    }
    if let Some(author) = &embed.author {
        let mut author_builder = EmbedAuthorBuilder::new(author.name.clone());
        if let Some(url) = &author.icon_url {
            let source = ImageSource::url(url.clone())
                .map_err(|e| PlatformError::InvalidRequest(e.to_string()))?;
            author_builder = author_builder.icon_url(source);
        }
        builder = builder.author(author_builder);
    }

    Ok(builder
        .validate()
        .map_err(|e| PlatformError::InvalidRequest(e.to_string()))?
        .build())
}

fn to_id<T>(id: Snowflake) -> PlatformResult<Id<T>> {
    Id::new_checked(id.into_inner())
        .ok_or_else(|| PlatformError::InvalidRequest("id must be non-zero".to_string()))
}

fn http_error(err: twilight_http::Error) -> PlatformError {
    PlatformError::Http(err.to_string())
}

fn decode_error(err: twilight_http::response::DeserializeBodyError) -> PlatformError {
    PlatformError::Decode(err.to_string())
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// Snowflakes carry their creation time in the upper 42 bits
fn is_bulk_deletable(id: Id<MessageMarker>, now_ms: u64) -> bool {
    let created_ms = (id.get() >> 22) + DISCORD_EPOCH_MS;
    now_ms.saturating_sub(created_ms) < BULK_DELETE_MAX_AGE.as_millis() as u64
}

fn default_avatar_url(user_id: u64) -> String {
    format!("{CDN}/embed/avatars/{}.png", (user_id >> 22) % 6)
}
