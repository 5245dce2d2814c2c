use std::sync::Arc;

use sqlx::PgPool;

use crate::core::config::{ListingSettings, Settings};
use crate::core::redis::RedisHandle;
use crate::core::revalidate::Revalidator;

/// Cheap to clone; shared by every request.
#[derive(Clone)]
pub(crate) struct AppState(Arc<Shared>);

struct Shared {
    settings: Settings,
    db: PgPool,
    redis: RedisHandle,
    revalidator: Revalidator,
}

impl AppState {
    pub(crate) fn new(settings: Settings, db: PgPool, redis: RedisHandle) -> Self {
        let channel = settings.redis().revalidate_channel.clone();
        let revalidator = Revalidator::new(redis.clone(), channel);
        Self(Arc::new(Shared { settings, db, redis, revalidator }))
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.0.settings
    }

    pub(crate) fn listing(&self) -> &ListingSettings {
        self.0.settings.listing()
    }

    pub(crate) fn db(&self) -> &PgPool {
        &self.0.db
    }

    pub(crate) fn redis(&self) -> &RedisHandle {
        &self.0.redis
    }

    pub(crate) fn revalidator(&self) -> &Revalidator {
        &self.0.revalidator
    }
}
