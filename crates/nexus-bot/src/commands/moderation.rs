//! `secure_clear` command
//!
//! Purges recent messages, announces the purge for ten seconds, records it in
//! the security log and mirrors the announcement to the logging channel.

use std::time::Duration;

use nexus_service::{AuditService, PurgeRequest};
use tracing::warn;

use super::{CommandContext, CommandError, CommandResult};
use crate::platform::{channel_mention, user_mention, Embed, Reply};

/// Colour of security event embeds
pub(crate) const SECURITY_EVENT_COLOR: u32 = 0x00ff_4747;

/// How long the purge announcement stays in the channel
const ANNOUNCEMENT_TTL: Duration = Duration::from_secs(10);

pub(super) async fn secure_clear(ctx: &CommandContext<'_>) -> CommandResult {
    if !ctx.access().await?.can_manage_messages() {
        return Err(CommandError::missing_permission("Manage Messages"));
    }
    let request = PurgeRequest::from_arg(ctx.arg(0))?;

    let platform = ctx.state.platform();
    let channel_id = ctx.message.channel_id;

    platform.delete_message(channel_id, ctx.message.id).await?;
    let purged = platform.purge(channel_id, request.count()).await?;

    let embed = Embed::new()
        .title("Security Event: Purge")
        .color(SECURITY_EVENT_COLOR)
        .field("Vector", channel_mention(channel_id))
        .field("Quantity", purged.to_string())
        .field("Authorized by", user_mention(ctx.message.author_id));

    ctx.reply(Reply::embed(embed.clone()).delete_after(ANNOUNCEMENT_TTL))
        .await?;

    AuditService::new(ctx.state.services())
        .record(channel_id, ctx.message.author_id, format!("purge:{purged}"))
        .await?;

    let logging_channel = ctx
        .settings()
        .settings(ctx.guild_id)
        .await?
        .logging_channel_id;
    if let Some(log_channel) = logging_channel {
        if let Err(e) = platform.send(log_channel, Reply::embed(embed)).await {
            warn!(error = %e, channel_id = %log_channel, "Failed to mirror security event");
        }
    }

    Ok(())
}
