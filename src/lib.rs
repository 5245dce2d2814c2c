pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod repositories;
pub(crate) mod schemas;
pub(crate) mod services;

#[cfg(test)]
mod test_support;

use tokio::net::TcpListener;

use crate::core::{bootstrap, config::Settings, redis::RedisHandle, shutdown, state::AppState};

/// Redis only carries revalidation signals, so the service starts without it.
async fn connect_redis(settings: &Settings) -> RedisHandle {
    let redis = RedisHandle::new(settings.redis().redis_url());
    match redis.connect().await {
        Ok(()) => tracing::info!("Redis connected"),
        Err(err) => tracing::error!(
            error = %err,
            "Redis unavailable; revalidation signals will be dropped"
        ),
    }
    redis
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    core::telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let pool = db::connect(&settings).await?;
    db::run_migrations(&pool).await?;
    let redis = connect_redis(&settings).await;

    let state = AppState::new(settings, pool, redis.clone());
    if let Err(err) = bootstrap::ensure_first_admin(&state).await {
        tracing::error!(error = %err, "First admin bootstrap failed");
    }

    let listener = TcpListener::bind(state.settings().server_addr()).await?;
    tracing::info!(
        addr = %state.settings().server_addr(),
        environment = state.settings().runtime().environment.as_str(),
        "Sidang API listening"
    );

    let served = axum::serve(listener, api::router::router(state))
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await;

    redis.disconnect().await;
    served?;
    Ok(())
}
