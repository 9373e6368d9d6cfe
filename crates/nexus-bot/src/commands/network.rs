//! `node_test` command

use std::time::Instant;

use super::{CommandContext, CommandError, CommandResult};
use crate::platform::Reply;

pub(super) async fn node_test(ctx: &CommandContext<'_>) -> CommandResult {
    let config = ctx.state.node_test();
    let host = ctx.arg(0).unwrap_or(config.default_host.as_str());

    let url = reqwest::Url::parse(host)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .ok_or_else(|| CommandError::usage(format!("`{host}` is not an http(s) URL.")))?;

    let started = Instant::now();
    let response = ctx
        .state
        .http()
        .get(url)
        .timeout(config.timeout())
        .send()
        .await
        .map_err(|e| {
            CommandError::Upstream(format!("Node `{host}` unreachable: {}", probe_failure(&e)))
        })?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    ctx.reply(Reply::text(format!(
        "Node response from `{host}`: `{}` in `{elapsed_ms:.2}ms`",
        response.status().as_u16()
    )))
    .await?;
    Ok(())
}

fn probe_failure(err: &reqwest::Error) -> &'static str {
    if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    }
}
