//! Test helpers
//!
//! [`TestBot`] assembles the real dispatcher, services and SQLite store
//! around a [`RecordingPlatform`].

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use nexus_bot::platform::{ChatPlatform, Embed, MemberAccess};
use nexus_bot::{BotState, BuildInfo, CommandDispatcher, DispatchOutcome};
use nexus_core::Snowflake;
use nexus_db::{create_memory_pool, create_pool, ensure_schema, DatabaseConfig, SqlitePool};
use nexus_service::ServiceContext;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::fixtures::{message, test_bot_config, test_node_test_config, GUILD};
use crate::platform::{RecordingPlatform, SentMessage};

/// A bot wired to an in-process platform
pub struct TestBot {
    pub platform: Arc<RecordingPlatform>,
    pub dispatcher: CommandDispatcher,
    pool: SqlitePool,
}

impl TestBot {
    /// Bot over a private in-memory database
    pub async fn start() -> anyhow::Result<Self> {
        let pool = create_memory_pool().await?;
        ensure_schema(&pool).await?;
        Ok(Self::assemble(pool))
    }

    /// Bot over a database file, as a restarted process would see it
    pub async fn open(path: &Path) -> anyhow::Result<Self> {
        let config = DatabaseConfig {
            path: path.to_path_buf(),
            ..DatabaseConfig::default()
        };
        let pool = create_pool(&config).await?;
        ensure_schema(&pool).await?;
        Ok(Self::assemble(pool))
    }

    fn assemble(pool: SqlitePool) -> Self {
        let platform = Arc::new(RecordingPlatform::new());
        platform.set_ready(true);

        let state = BotState::new(
            ServiceContext::sqlite(pool.clone()),
            Arc::clone(&platform) as Arc<dyn ChatPlatform>,
            BuildInfo::from(&test_bot_config()),
            test_node_test_config(),
        );

        Self {
            platform,
            dispatcher: CommandDispatcher::new(state),
            pool,
        }
    }

    pub fn services(&self) -> &ServiceContext {
        self.dispatcher.state().services()
    }

    pub fn build(&self) -> &BuildInfo {
        self.dispatcher.state().build()
    }

    /// Give a member guild-level access in [`GUILD`]
    pub fn grant(&self, user_id: Snowflake, access: MemberAccess) {
        self.platform.set_access(GUILD, user_id, access);
    }

    /// Close the store so every later query fails
    pub async fn break_store(&self) {
        self.pool.close().await;
    }

    /// Send a guild message from `author_id` and dispatch it
    pub async fn say(&self, author_id: Snowflake, content: &str) -> DispatchOutcome {
        self.dispatcher.dispatch(&message(author_id, content)).await
    }

    pub fn last_reply(&self) -> Option<SentMessage> {
        self.platform.last_sent()
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_reply()
            .and_then(|m| m.reply.as_text().map(str::to_string))
    }

    pub fn last_embed(&self) -> Option<Embed> {
        self.last_reply().and_then(|m| m.reply.as_embed().cloned())
    }
}

/// Minimal HTTP endpoint answering every request with `status`
///
/// Serves until the runtime shuts down.
pub async fn spawn_http_stub(status: u16) -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    Ok(addr)
}
