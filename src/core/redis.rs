use std::sync::Arc;

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use tokio::sync::RwLock;

/// Lazily connected Redis handle. Every operation degrades to a no-op while disconnected,
/// so the API keeps serving when Redis is down.
#[derive(Clone)]
pub(crate) struct RedisHandle {
    url: Arc<str>,
    connection: Arc<RwLock<Option<ConnectionManager>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RedisHealth {
    Healthy,
    Disconnected,
    Unhealthy(String),
}

impl RedisHealth {
    pub(crate) fn label(&self) -> String {
        match self {
            Self::Healthy => "healthy".to_string(),
            Self::Disconnected => "disconnected".to_string(),
            Self::Unhealthy(error) => format!("unhealthy: {error}"),
        }
    }
}

impl RedisHandle {
    pub(crate) fn new(url: String) -> Self {
        Self { url: url.into(), connection: Arc::new(RwLock::new(None)) }
    }

    pub(crate) async fn connect(&self) -> Result<(), RedisError> {
        let manager = ConnectionManager::new(Client::open(self.url.as_ref())?).await?;
        self.connection.write().await.replace(manager);
        Ok(())
    }

    pub(crate) async fn disconnect(&self) {
        self.connection.write().await.take();
    }

    async fn current(&self) -> Option<ConnectionManager> {
        self.connection.read().await.clone()
    }

    pub(crate) async fn health(&self) -> RedisHealth {
        let Some(mut connection) = self.current().await else {
            return RedisHealth::Disconnected;
        };

        match redis::cmd("PING").query_async::<_, String>(&mut connection).await {
            Ok(_) => RedisHealth::Healthy,
            Err(err) => RedisHealth::Unhealthy(err.to_string()),
        }
    }

    /// Returns `Ok(false)` without sending anything when no connection is open.
    pub(crate) async fn publish(&self, channel: &str, message: &str) -> Result<bool, RedisError> {
        let Some(mut connection) = self.current().await else {
            return Ok(false);
        };

        let _receivers: i64 = connection.publish(channel, message).await?;
        Ok(true)
    }
}
