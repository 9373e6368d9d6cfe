//! `system` command group
//!
//! Open to administrators and members holding an authorized role. Without a
//! known subcommand it shows the system information embed.

use nexus_core::Snowflake;

use super::{CommandContext, CommandError, CommandResult};
use crate::platform::{channel_mention, role_mention, Embed, Reply};

const PREFIX_USAGE: &str = "Usage: system prefix <new_prefix>";
const LOGCHANNEL_USAGE: &str = "Usage: system logchannel <#channel|none>";
const ROLE_USAGE: &str = "Usage: system role <add|remove> <@role>";

pub(super) async fn run(ctx: &CommandContext<'_>) -> CommandResult {
    require_system_access(ctx).await?;

    let subcommand = ctx.arg(0).unwrap_or_default().to_ascii_lowercase();
    match subcommand.as_str() {
        "prefix" => set_prefix(ctx).await,
        "logchannel" => set_logging_channel(ctx).await,
        "role" => edit_role(ctx).await,
        _ => show_info(ctx).await,
    }
}

async fn require_system_access(ctx: &CommandContext<'_>) -> CommandResult {
    let access = ctx.access().await?;
    if access.administrator {
        return Ok(());
    }
    if ctx
        .settings()
        .is_authorized(ctx.guild_id, &access.role_ids)
        .await?
    {
        return Ok(());
    }
    Err(CommandError::missing_permission("Administrator"))
}

async fn show_info(ctx: &CommandContext<'_>) -> CommandResult {
    let build = ctx.state.build();
    let embed = Embed::new()
        .title("System Management Interface")
        .color(build.embed_color)
        .field("Kernel", format!("v{}", build.version))
        .field("Build Hash", format!("`{}`", build.build_hash))
        .footer("Access Level: Administrator");

    ctx.reply(Reply::embed(embed)).await?;
    Ok(())
}

async fn set_prefix(ctx: &CommandContext<'_>) -> CommandResult {
    let raw = ctx.arg(1).ok_or_else(|| CommandError::usage(PREFIX_USAGE))?;
    let prefix = ctx.settings().update_prefix(ctx.guild_id, raw).await?;

    ctx.reply(Reply::text(format!("Dynamic prefix updated to: `{prefix}`")))
        .await?;
    Ok(())
}

async fn set_logging_channel(ctx: &CommandContext<'_>) -> CommandResult {
    let raw = ctx
        .arg(1)
        .ok_or_else(|| CommandError::usage(LOGCHANNEL_USAGE))?;

    let channel_id = if raw.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(parse_mention(raw, "<#").ok_or_else(|| CommandError::usage(LOGCHANNEL_USAGE))?)
    };

    ctx.settings()
        .set_logging_channel(ctx.guild_id, channel_id)
        .await?;

    let text = match channel_id {
        Some(id) => format!("Security events will be mirrored to {}.", channel_mention(id)),
        None => "Security event mirroring disabled.".to_string(),
    };
    ctx.reply(Reply::text(text)).await?;
    Ok(())
}

async fn edit_role(ctx: &CommandContext<'_>) -> CommandResult {
    let action = ctx.arg(1).unwrap_or_default().to_ascii_lowercase();
    let role_id = ctx
        .arg(2)
        .and_then(|raw| parse_mention(raw, "<@&"))
        .ok_or_else(|| CommandError::usage(ROLE_USAGE))?;
    let role = role_mention(role_id);
    let settings = ctx.settings();

    let text = match action.as_str() {
        "add" => {
            if settings.add_authorized_role(ctx.guild_id, role_id).await? {
                format!("Role {role} authorized for system access.")
            } else {
                format!("Role {role} is already authorized.")
            }
        }
        "remove" => {
            if settings
                .remove_authorized_role(ctx.guild_id, role_id)
                .await?
            {
                format!("Role {role} no longer has system access.")
            } else {
                format!("Role {role} was not authorized.")
            }
        }
        _ => return Err(CommandError::usage(ROLE_USAGE)),
    };

    ctx.reply(Reply::text(text)).await?;
    Ok(())
}

/// Accept a raw id or a mention such as `<#123>` / `<@&123>`
fn parse_mention(raw: &str, open: &str) -> Option<Snowflake> {
    let inner = raw
        .strip_prefix(open)
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(raw);

    Snowflake::parse(inner).ok().filter(|id| !id.is_zero())
}
