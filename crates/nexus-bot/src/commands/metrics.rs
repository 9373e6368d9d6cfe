//! `metrics` command

use std::time::Duration;

use super::{CommandContext, CommandResult};
use crate::platform::{Embed, Reply};

pub(super) async fn run(ctx: &CommandContext<'_>) -> CommandResult {
    let platform = ctx.state.platform();
    let cached = ctx.state.services().prefix_cache().len();

    let description = format!(
        "**Uptime:** `{}`\n**Websocket:** `{}`\n**Memory Mapping:** `{cached} cached objects`",
        format_uptime(ctx.state.uptime()),
        format_latency(platform.latency()),
    );

    let embed = Embed::new()
        .description(description)
        .color(ctx.state.build().embed_color)
        .author("Operational Metrics", platform.avatar_url());

    ctx.reply(Reply::embed(embed)).await?;
    Ok(())
}

/// `Hh Mm Ss`, hours unbounded
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    let (hours, remainder) = (total / 3600, total % 3600);
    let (minutes, seconds) = (remainder / 60, remainder % 60);
    format!("{hours}h {minutes}m {seconds}s")
}

/// Milliseconds with two decimals, or `n/a` before the first heartbeat
pub(crate) fn format_latency(latency: Option<Duration>) -> String {
    latency.map_or_else(
        || "n/a".to_string(),
        |l| format!("{:.2}ms", l.as_secs_f64() * 1000.0),
    )
}
