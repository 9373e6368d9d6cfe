//! End-to-end command tests
//!
//! Every test drives the real dispatcher against SQLite and a recording
//! platform; nothing talks to Discord.

use std::time::Duration;

use futures::future::join_all;
use integration_tests::*;
use nexus_bot::commands::Command;
use nexus_bot::platform::{GuildStats, MemberAccess};
use nexus_bot::DispatchOutcome;
use nexus_service::{AuditService, SettingsService, GENERIC_FAILURE};

// ============================================================================
// Dispatch Tests
// ============================================================================

#[tokio::test]
async fn test_plain_chatter_is_ignored() {
    let bot = TestBot::start().await.unwrap();

    assert_eq!(bot.say(MEMBER, "hello there").await, DispatchOutcome::Ignored);
    assert_eq!(bot.say(MEMBER, "!unknown").await, DispatchOutcome::Ignored);
    assert_eq!(bot.say(MEMBER, "! metrics").await, DispatchOutcome::Ignored);
    assert!(bot.platform.sent().is_empty());
}

#[tokio::test]
async fn test_bots_and_direct_messages_are_ignored() {
    let bot = TestBot::start().await.unwrap();

    let from_bot = MessageBuilder::new(MEMBER, "!metrics").from_bot().build();
    assert_eq!(bot.dispatcher.dispatch(&from_bot).await, DispatchOutcome::Ignored);

    let direct = MessageBuilder::new(MEMBER, "!metrics").direct().build();
    assert_eq!(bot.dispatcher.dispatch(&direct).await, DispatchOutcome::Ignored);

    assert!(bot.platform.sent().is_empty());
}

#[tokio::test]
async fn test_command_names_are_case_insensitive() {
    let bot = TestBot::start().await.unwrap();

    assert_eq!(
        bot.say(MEMBER, "!METRICS").await,
        DispatchOutcome::Completed(Command::Metrics)
    );
    assert!(bot.last_embed().is_some());
}

// ============================================================================
// Prefix Tests
// ============================================================================

#[tokio::test]
async fn test_prefix_lifecycle() {
    let bot = TestBot::start().await.unwrap();
    bot.grant(ADMIN, MemberAccess::administrator());

    assert_eq!(
        bot.say(ADMIN, "!system prefix ?!").await,
        DispatchOutcome::Completed(Command::System)
    );
    assert_eq!(
        bot.last_text().as_deref(),
        Some("Dynamic prefix updated to: `?!`")
    );

    // The old prefix no longer triggers anything
    let sent_before = bot.platform.sent().len();
    assert_eq!(bot.say(ADMIN, "!metrics").await, DispatchOutcome::Ignored);
    assert_eq!(bot.platform.sent().len(), sent_before);

    assert_eq!(
        bot.say(ADMIN, "?!metrics").await,
        DispatchOutcome::Completed(Command::Metrics)
    );

    // Too long: rejected and the prefix stays
    assert_eq!(
        bot.say(ADMIN, "?!system prefix toolong").await,
        DispatchOutcome::Failed(Command::System)
    );
    assert_eq!(bot.last_text().as_deref(), Some("Prefix too long."));

    let prefix = SettingsService::new(bot.services())
        .resolve_prefix(GUILD)
        .await
        .unwrap();
    assert_eq!(prefix.as_str(), "?!");
}

#[tokio::test]
async fn test_prefix_is_scoped_to_guild() {
    let bot = TestBot::start().await.unwrap();
    bot.grant(ADMIN, MemberAccess::administrator());

    bot.say(ADMIN, "!system prefix $").await;

    let elsewhere = MessageBuilder::new(MEMBER, "!metrics")
        .in_guild(OTHER_GUILD)
        .build();
    assert_eq!(
        bot.dispatcher.dispatch(&elsewhere).await,
        DispatchOutcome::Completed(Command::Metrics)
    );
}

#[tokio::test]
async fn test_prefix_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.db");

    {
        let bot = TestBot::open(&path).await.unwrap();
        bot.grant(ADMIN, MemberAccess::administrator());
        bot.say(ADMIN, "!system prefix >>").await;
        assert_eq!(
            bot.last_text().as_deref(),
            Some("Dynamic prefix updated to: `>>`")
        );
    }

    let bot = TestBot::open(&path).await.unwrap();
    assert_eq!(
        bot.say(MEMBER, ">>metrics").await,
        DispatchOutcome::Completed(Command::Metrics)
    );
    assert_eq!(bot.say(MEMBER, "!metrics").await, DispatchOutcome::Ignored);
}

#[tokio::test]
async fn test_store_failure_reports_generic_message() {
    let bot = TestBot::start().await.unwrap();
    bot.grant(ADMIN, MemberAccess::administrator());

    // Warm the cache so dispatch still recognises the command
    bot.say(ADMIN, "!metrics").await;
    bot.break_store().await;

    assert_eq!(
        bot.say(ADMIN, "!system prefix ?").await,
        DispatchOutcome::Failed(Command::System)
    );
    assert_eq!(bot.last_text().as_deref(), Some(GENERIC_FAILURE));

    // The cached prefix is still served
    assert_eq!(
        bot.say(ADMIN, "!metrics").await,
        DispatchOutcome::Completed(Command::Metrics)
    );
}

#[tokio::test]
async fn test_concurrent_guilds_resolve_default_prefix() {
    let bot = TestBot::start().await.unwrap();

    let messages: Vec<_> = (0..20)
        .map(|_| {
            MessageBuilder::new(MEMBER, "!metrics")
                .in_guild(unique_id())
                .build()
        })
        .collect();
    let outcomes = join_all(messages.iter().map(|m| bot.dispatcher.dispatch(m))).await;

    assert!(outcomes
        .iter()
        .all(|o| *o == DispatchOutcome::Completed(Command::Metrics)));
    assert_eq!(bot.services().prefix_cache().len(), 20);
}

// ============================================================================
// System Tests
// ============================================================================

#[tokio::test]
async fn test_system_requires_administrator() {
    let bot = TestBot::start().await.unwrap();

    assert_eq!(
        bot.say(MEMBER, "!system").await,
        DispatchOutcome::Failed(Command::System)
    );
    assert_eq!(
        bot.last_text().as_deref(),
        Some("Missing permissions: Administrator")
    );

    // Nothing changed
    assert_eq!(
        bot.say(MEMBER, "!system prefix ?").await,
        DispatchOutcome::Failed(Command::System)
    );
    assert_eq!(bot.say(MEMBER, "?metrics").await, DispatchOutcome::Ignored);
}

#[tokio::test]
async fn test_system_info_embed() {
    let bot = TestBot::start().await.unwrap();
    bot.grant(ADMIN, MemberAccess::administrator());

    bot.say(ADMIN, "!system").await;
    let embed = bot.last_embed().unwrap();

    assert_eq!(embed.title.as_deref(), Some("System Management Interface"));
    assert_eq!(embed.field_value("Kernel"), Some("v4.2.0-stable"));
    let hash = format!("`{}`", bot.build().build_hash);
    assert_eq!(embed.field_value("Build Hash"), Some(hash.as_str()));
    assert_eq!(embed.footer.as_deref(), Some("Access Level: Administrator"));
    assert_eq!(embed.color, Some(0x002b_2d31));
}

#[tokio::test]
async fn test_authorized_role_grants_system_access() {
    let bot = TestBot::start().await.unwrap();
    bot.grant(ADMIN, MemberAccess::administrator());
    bot.grant(MODERATOR, MemberAccess::with_roles(vec![TRUSTED_ROLE]));

    assert_eq!(
        bot.say(MODERATOR, "!system").await,
        DispatchOutcome::Failed(Command::System)
    );

    bot.say(ADMIN, &format!("!system role add <@&{TRUSTED_ROLE}>"))
        .await;
    assert_eq!(
        bot.last_text(),
        Some(format!("Role <@&{TRUSTED_ROLE}> authorized for system access."))
    );

    bot.say(ADMIN, &format!("!system role add {TRUSTED_ROLE}")).await;
    assert_eq!(
        bot.last_text(),
        Some(format!("Role <@&{TRUSTED_ROLE}> is already authorized."))
    );

    assert_eq!(
        bot.say(MODERATOR, "!system prefix %").await,
        DispatchOutcome::Completed(Command::System)
    );

    bot.say(ADMIN, &format!("%system role remove <@&{TRUSTED_ROLE}>"))
        .await;
    assert_eq!(
        bot.last_text(),
        Some(format!("Role <@&{TRUSTED_ROLE}> no longer has system access."))
    );
    assert_eq!(
        bot.say(MODERATOR, "%system").await,
        DispatchOutcome::Failed(Command::System)
    );
}

#[tokio::test]
async fn test_system_usage_errors() {
    let bot = TestBot::start().await.unwrap();
    bot.grant(ADMIN, MemberAccess::administrator());

    bot.say(ADMIN, "!system prefix").await;
    assert_eq!(
        bot.last_text().as_deref(),
        Some("Usage: system prefix <new_prefix>")
    );

    bot.say(ADMIN, "!system role grant <@&5>").await;
    assert_eq!(
        bot.last_text().as_deref(),
        Some("Usage: system role <add|remove> <@role>")
    );

    bot.say(ADMIN, "!system logchannel general").await;
    assert_eq!(
        bot.last_text().as_deref(),
        Some("Usage: system logchannel <#channel|none>")
    );
}

// ============================================================================
// Moderation Tests
// ============================================================================

#[tokio::test]
async fn test_secure_clear_purges_and_audits() {
    let bot = TestBot::start().await.unwrap();
    bot.grant(ADMIN, MemberAccess::administrator());
    bot.platform.seed_channel(CHANNEL, 50);

    bot.say(ADMIN, &format!("!system logchannel <#{LOG_CHANNEL}>"))
        .await;
    assert_eq!(
        bot.last_text(),
        Some(format!("Security events will be mirrored to <#{LOG_CHANNEL}>."))
    );

    let invoking = message(ADMIN, "!secure_clear 5");
    assert_eq!(
        bot.dispatcher.dispatch(&invoking).await,
        DispatchOutcome::Completed(Command::SecureClear)
    );

    assert!(bot.platform.deleted().contains(&(CHANNEL, invoking.id)));
    assert_eq!(bot.platform.backlog(CHANNEL), 45);

    let announcement = bot
        .platform
        .sent_to(CHANNEL)
        .into_iter()
        .find(|m| m.reply.as_embed().is_some())
        .unwrap();
    assert_eq!(announcement.reply.delete_after, Some(Duration::from_secs(10)));
    let embed = announcement.reply.as_embed().unwrap();
    assert_eq!(embed.title.as_deref(), Some("Security Event: Purge"));
    assert_eq!(embed.field_value("Quantity"), Some("5"));
    let vector = format!("<#{CHANNEL}>");
    assert_eq!(embed.field_value("Vector"), Some(vector.as_str()));
    let executor = format!("<@{ADMIN}>");
    assert_eq!(embed.field_value("Authorized by"), Some(executor.as_str()));

    let mirrored = bot.platform.sent_to(LOG_CHANNEL);
    assert_eq!(mirrored.len(), 1);
    assert_eq!(mirrored[0].reply.as_embed(), Some(embed));
    assert_eq!(mirrored[0].reply.delete_after, None);

    let entries = AuditService::new(bot.services())
        .recent(CHANNEL, 10)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, "purge:5");
    assert_eq!(entries[0].executor_id, ADMIN);
}

#[tokio::test]
async fn test_secure_clear_default_amount() {
    let bot = TestBot::start().await.unwrap();
    bot.grant(
        MODERATOR,
        MemberAccess {
            manage_messages: true,
            ..MemberAccess::default()
        },
    );
    bot.platform.seed_channel(CHANNEL, 30);

    assert_eq!(
        bot.say(MODERATOR, "!secure_clear").await,
        DispatchOutcome::Completed(Command::SecureClear)
    );
    assert_eq!(bot.platform.backlog(CHANNEL), 20);
    // No logging channel configured
    assert_eq!(bot.platform.sent().len(), 1);
}

#[tokio::test]
async fn test_secure_clear_requires_manage_messages() {
    let bot = TestBot::start().await.unwrap();
    bot.platform.seed_channel(CHANNEL, 10);

    assert_eq!(
        bot.say(MEMBER, "!secure_clear 3").await,
        DispatchOutcome::Failed(Command::SecureClear)
    );
    assert_eq!(
        bot.last_text().as_deref(),
        Some("Missing permissions: Manage Messages")
    );
    assert_eq!(bot.platform.backlog(CHANNEL), 10);
    assert!(bot.platform.deleted().is_empty());

    let entries = AuditService::new(bot.services())
        .recent(CHANNEL, 10)
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_secure_clear_rejects_bad_amounts() {
    let bot = TestBot::start().await.unwrap();
    bot.grant(ADMIN, MemberAccess::administrator());
    bot.platform.seed_channel(CHANNEL, 10);

    bot.say(ADMIN, "!secure_clear 0").await;
    assert_eq!(
        bot.last_text().as_deref(),
        Some("Amount must be between 1 and 1000.")
    );

    bot.say(ADMIN, "!secure_clear lots").await;
    assert_eq!(
        bot.last_text().as_deref(),
        Some("Amount must be a whole number.")
    );

    assert_eq!(
        bot.say(ADMIN, "!secure_clear 1001").await,
        DispatchOutcome::Failed(Command::SecureClear)
    );
    assert_eq!(
        bot.last_text().as_deref(),
        Some("Amount must be between 1 and 1000.")
    );

    assert_eq!(bot.platform.backlog(CHANNEL), 10);
}

#[tokio::test]
async fn test_secure_clear_survives_unreachable_log_channel() {
    let bot = TestBot::start().await.unwrap();
    bot.grant(ADMIN, MemberAccess::administrator());
    bot.platform.seed_channel(CHANNEL, 5);
    bot.platform.block_channel(LOG_CHANNEL);

    bot.say(ADMIN, &format!("!system logchannel {LOG_CHANNEL}"))
        .await;
    assert_eq!(
        bot.say(ADMIN, "!secure_clear 2").await,
        DispatchOutcome::Completed(Command::SecureClear)
    );
    assert!(bot.platform.sent_to(LOG_CHANNEL).is_empty());

    bot.say(ADMIN, "!system logchannel none").await;
    assert_eq!(
        bot.last_text().as_deref(),
        Some("Security event mirroring disabled.")
    );
}

// ============================================================================
// Metrics Tests
// ============================================================================

#[tokio::test]
async fn test_metrics_embed() {
    let bot = TestBot::start().await.unwrap();
    bot.platform.set_latency(Some(Duration::from_micros(38_500)));
    bot.platform.set_stats(GuildStats {
        guilds: 3,
        users: 120,
    });

    bot.say(MEMBER, "!metrics").await;
    let embed = bot.last_embed().unwrap();

    let author = embed.author.as_ref().unwrap();
    assert_eq!(author.name, "Operational Metrics");
    assert!(author.icon_url.is_some());

    let description = embed.description.unwrap();
    assert!(description.starts_with("**Uptime:** `0h 0m "));
    assert!(description.contains("**Websocket:** `38.50ms`"));
    assert!(description.ends_with("**Memory Mapping:** `1 cached objects`"));
}

// ============================================================================
// Network Tests
// ============================================================================

#[tokio::test]
async fn test_node_test_reports_status() {
    let bot = TestBot::start().await.unwrap();
    let addr = spawn_http_stub(204).await.unwrap();
    let host = format!("http://{addr}/");

    assert_eq!(
        bot.say(MEMBER, &format!("!node_test {host}")).await,
        DispatchOutcome::Completed(Command::NodeTest)
    );

    let text = bot.last_text().unwrap();
    assert!(text.starts_with(&format!("Node response from `{host}`: `204` in `")));
    assert!(text.ends_with("ms`"));
}

#[tokio::test]
async fn test_node_test_rejects_non_http_hosts() {
    let bot = TestBot::start().await.unwrap();

    assert_eq!(
        bot.say(MEMBER, "!node_test ftp://example.com").await,
        DispatchOutcome::Failed(Command::NodeTest)
    );
    assert_eq!(
        bot.last_text().as_deref(),
        Some("`ftp://example.com` is not an http(s) URL.")
    );
}

#[tokio::test]
async fn test_node_test_unreachable_host() {
    let bot = TestBot::start().await.unwrap();

    // Nothing listens on the discard port
    assert_eq!(
        bot.say(MEMBER, "!node_test").await,
        DispatchOutcome::Failed(Command::NodeTest)
    );
    let text = bot.last_text().unwrap();
    assert!(text.starts_with("Node `http://127.0.0.1:9` unreachable: "));
}
