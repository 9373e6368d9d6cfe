//! Text command dispatch
//!
//! A message is a command when it starts with the guild's prefix followed
//! directly by a known command name. Names are matched case-insensitively
//! against a flat table; anything else is ignored.

mod error;
mod metrics;
mod moderation;
mod network;
mod system;

pub use error::{CommandError, CommandResult};
pub use metrics::format_uptime;

use nexus_core::Snowflake;
use nexus_service::SettingsService;
use tracing::{debug, error, info, instrument, warn};

use crate::platform::{IncomingMessage, MemberAccess, Reply};
use crate::state::BotState;

/// Known commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    System,
    Metrics,
    SecureClear,
    NodeTest,
}

const COMMANDS: &[(&str, Command)] = &[
    ("system", Command::System),
    ("metrics", Command::Metrics),
    ("secure_clear", Command::SecureClear),
    ("node_test", Command::NodeTest),
];

impl Command {
    /// Case-insensitive lookup
    pub fn lookup(name: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, command)| *command)
    }

    pub fn name(self) -> &'static str {
        COMMANDS
            .iter()
            .find(|(_, command)| *command == self)
            .map_or("unknown", |(name, _)| name)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub command: Command,
    pub args: Vec<&'a str>,
}

/// Split `content` into a known command and its arguments
pub fn parse_invocation<'a>(content: &'a str, prefix: &str) -> Option<Invocation<'a>> {
    let rest = content.strip_prefix(prefix)?;
    if rest.starts_with(char::is_whitespace) {
        return None;
    }

    let mut words = rest.split_whitespace();
    let command = Command::lookup(words.next()?)?;

    Some(Invocation {
        command,
        args: words.collect(),
    })
}

/// What happened to an incoming message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not a command, or not for us
    Ignored,
    Completed(Command),
    /// The handler failed and the caller was told why
    Failed(Command),
}

/// Everything a handler needs for one invocation
pub struct CommandContext<'a> {
    pub state: &'a BotState,
    pub message: &'a IncomingMessage,
    pub guild_id: Snowflake,
    pub args: &'a [&'a str],
}

impl CommandContext<'_> {
    pub fn settings(&self) -> SettingsService<'_> {
        SettingsService::new(self.state.services())
    }

    /// Reply in the invoking channel
    pub async fn reply(&self, reply: Reply) -> CommandResult<Snowflake> {
        Ok(self
            .state
            .platform()
            .send(self.message.channel_id, reply)
            .await?)
    }

    /// Guild permissions of the invoking member
    pub async fn access(&self) -> CommandResult<MemberAccess> {
        Ok(self
            .state
            .platform()
            .member_access(self.guild_id, self.message.author_id)
            .await?)
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).copied()
    }
}

/// Routes guild messages to command handlers
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    state: BotState,
}

impl CommandDispatcher {
    pub fn new(state: BotState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    /// Handle one incoming message
    #[instrument(skip_all, fields(message_id = %message.id, guild_id = ?message.guild_id))]
    pub async fn dispatch(&self, message: &IncomingMessage) -> DispatchOutcome {
        if message.author_is_bot {
            return DispatchOutcome::Ignored;
        }
        let Some(guild_id) = message.guild_id else {
            return DispatchOutcome::Ignored;
        };

        let prefix = match SettingsService::new(self.state.services())
            .resolve_prefix(guild_id)
            .await
        {
            Ok(prefix) => prefix,
            Err(e) => {
                error!(error = %e, "Failed to resolve prefix");
                return DispatchOutcome::Ignored;
            }
        };

        let Some(invocation) = parse_invocation(&message.content, prefix.as_str()) else {
            return DispatchOutcome::Ignored;
        };
        let command = invocation.command;

        let ctx = CommandContext {
            state: &self.state,
            message,
            guild_id,
            args: &invocation.args,
        };

        debug!(command = %command, args = invocation.args.len(), "Dispatching command");

        let result = match command {
            Command::System => system::run(&ctx).await,
            Command::Metrics => metrics::run(&ctx).await,
            Command::SecureClear => moderation::secure_clear(&ctx).await,
            Command::NodeTest => network::node_test(&ctx).await,
        };

        match result {
            Ok(()) => DispatchOutcome::Completed(command),
            Err(e) => {
                if e.is_expected() {
                    info!(command = %command, reason = %e, "Command rejected");
                } else {
                    error!(command = %command, error = %e, "Command failed");
                }

                if let Err(send_err) = ctx.reply(Reply::text(e.user_message())).await {
                    warn!(error = %send_err, "Failed to report command failure");
                }
                DispatchOutcome::Failed(command)
            }
        }
    }
}
