use std::collections::HashMap;

use axum::{extract::State, http::header, http::StatusCode, response::IntoResponse, Json};

use crate::core::metrics;
use crate::core::redis::RedisHealth;
use crate::core::state::AppState;
use crate::db;
use crate::schemas::{HealthResponse, RootResponse};

const SERVICE_NAME: &str = "sidang-api";

pub(crate) async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let api = state.settings().api();
    Json(RootResponse { message: api.project_name.clone(), version: api.version.clone() })
}

/// Redis being unreachable only degrades the service; the database being unreachable breaks it.
pub(crate) async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let redis = state.redis().health().await;
    let database = db::ping(state.db()).await;

    let status = match (&database, &redis) {
        (Err(_), _) => "unhealthy",
        (Ok(()), RedisHealth::Unhealthy(_)) => "degraded",
        (Ok(()), _) => "healthy",
    };

    let components = HashMap::from([
        ("redis".to_string(), redis.label()),
        (
            "database".to_string(),
            database.map_or_else(|err| format!("unhealthy: {err}"), |()| "healthy".to_string()),
        ),
    ]);

    Json(HealthResponse {
        service: SERVICE_NAME.to_string(),
        status: status.to_string(),
        components,
    })
}

pub(crate) async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    if !state.settings().telemetry().prometheus_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    let Some(body) = metrics::render() else {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response()
}
