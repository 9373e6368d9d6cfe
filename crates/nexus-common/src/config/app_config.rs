//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub bot: BotConfig,
    pub node_test: NodeTestConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Embedded store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite file, created on first run
    #[serde(default = "default_database_path")]
    pub path: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

/// Chat bot configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    pub token: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_embed_color")]
    pub embed_color: u32,
    #[serde(default = "default_telemetry_interval_secs")]
    pub telemetry_interval_secs: u64,
}

impl BotConfig {
    #[must_use]
    pub fn telemetry_interval(&self) -> Duration {
        Duration::from_secs(self.telemetry_interval_secs)
    }
}

/// Settings for the `node_test` latency probe
#[derive(Debug, Clone, Deserialize)]
pub struct NodeTestConfig {
    #[serde(default = "default_node_test_host")]
    pub default_host: String,
    #[serde(default = "default_node_test_timeout_secs")]
    pub timeout_secs: u64,
}

impl NodeTestConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for NodeTestConfig {
    fn default() -> Self {
        Self {
            default_host: default_node_test_host(),
            timeout_secs: default_node_test_timeout_secs(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "nexus".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_database_path() -> String {
    "internal_registry.db".to_string()
}

fn default_max_connections() -> u32 {
    1
}

fn default_busy_timeout_secs() -> u64 {
    5
}

fn default_version() -> String {
    "4.2.0-stable".to_string()
}

fn default_embed_color() -> u32 {
    0x002b_2d31
}

fn default_telemetry_interval_secs() -> u64 {
    60
}

fn default_node_test_host() -> String {
    "https://discord.com".to_string()
}

fn default_node_test_timeout_secs() -> u64 {
    10
}

/// Parse `0x2b2d31`, `#2b2d31` or `2b2d31`
fn parse_color(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .or_else(|| trimmed.strip_prefix('#'))
        .unwrap_or(trimmed);
    u32::from_str_radix(hex, 16).ok().filter(|c| *c <= 0x00FF_FFFF)
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            lookup(key)
                .map(|raw| {
                    raw.trim()
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidValue(key, raw))
                })
                .transpose()
        };

        let telemetry_interval_secs =
            parsed("TELEMETRY_INTERVAL_SECS")?.unwrap_or_else(default_telemetry_interval_secs);
        if telemetry_interval_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "TELEMETRY_INTERVAL_SECS",
                "0".to_string(),
            ));
        }

        let embed_color = match lookup("BOT_EMBED_COLOR") {
            Some(raw) => {
                parse_color(&raw).ok_or(ConfigError::InvalidValue("BOT_EMBED_COLOR", raw))?
            }
            None => default_embed_color(),
        };

        let max_connections = match parsed("DATABASE_MAX_CONNECTIONS")? {
            Some(0) => {
                return Err(ConfigError::InvalidValue(
                    "DATABASE_MAX_CONNECTIONS",
                    "0".to_string(),
                ))
            }
            Some(n) => u32::try_from(n)
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS", n.to_string()))?,
            None => default_max_connections(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                path: lookup("DATABASE_PATH").unwrap_or_else(default_database_path),
                max_connections,
                busy_timeout_secs: parsed("DATABASE_BUSY_TIMEOUT_SECS")?
                    .unwrap_or_else(default_busy_timeout_secs),
            },
            bot: BotConfig {
                token: lookup("DISCORD_TOKEN")
                    .filter(|t| !t.trim().is_empty())
                    .ok_or(ConfigError::MissingVar("DISCORD_TOKEN"))?,
                version: lookup("BOT_VERSION").unwrap_or_else(default_version),
                embed_color,
                telemetry_interval_secs,
            },
            node_test: NodeTestConfig {
                default_host: lookup("NODE_TEST_DEFAULT_HOST")
                    .unwrap_or_else(default_node_test_host),
                timeout_secs: parsed("NODE_TEST_TIMEOUT_SECS")?
                    .unwrap_or_else(default_node_test_timeout_secs),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
