use crate::core::redis::RedisHandle;

/// Read views that depend on mutated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResourcePath {
    Profile,
    Accounts,
    Submissions,
    Notifications,
    Statistics,
    Rooms,
}

impl ResourcePath {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "/profile",
            Self::Accounts => "/accounts",
            Self::Submissions => "/submissions",
            Self::Notifications => "/notifications",
            Self::Statistics => "/statistics",
            Self::Rooms => "/rooms",
        }
    }
}

/// Emits one revalidation signal per mutated resource path.
#[derive(Clone)]
pub(crate) struct Revalidator {
    redis: RedisHandle,
    channel: String,
}

impl Revalidator {
    pub(crate) fn new(redis: RedisHandle, channel: String) -> Self {
        Self { redis, channel }
    }

    pub(crate) async fn revalidate(&self, paths: &[ResourcePath]) {
        for path in paths {
            match self.redis.publish(&self.channel, path.as_str()).await {
                Ok(true) => tracing::debug!(path = path.as_str(), "Revalidation signal published"),
                Ok(false) => tracing::debug!(
                    path = path.as_str(),
                    "Redis disconnected; revalidation skipped"
                ),
                Err(err) => tracing::warn!(
                    error = %err,
                    path = path.as_str(),
                    "Failed to publish revalidation signal"
                ),
            }
        }
    }
}
