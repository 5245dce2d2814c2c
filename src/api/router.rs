use std::time::Duration;

use axum::{
    body::Body,
    http::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
    http::{HeaderName, Method, Request, Response},
    routing::get,
    Router,
};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{AllowOrigin, Any, CorsLayer},
    normalize_path::NormalizePathLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnRequest, MakeSpan, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::api::{accounts, handlers, notifications, rooms, statistics, submissions};
use crate::core::{config::Settings, metrics, state::AppState};

const REQUEST_ID: &str = "x-request-id";

/// Resource routers mounted under the versioned prefix.
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/profile", accounts::profile_router())
        .nest("/accounts", accounts::router())
        .nest("/submissions", submissions::router())
        .nest("/rooms", rooms::router())
        .nest("/notifications", notifications::router())
        .nest("/statistics", statistics::router())
}

pub(crate) fn router(state: AppState) -> Router {
    let settings = state.settings();
    let request_id = HeaderName::from_static(REQUEST_ID);

    let mut app = Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz).head(handlers::healthz))
        .nest(&settings.api().api_v1_str, api_routes());

    if settings.telemetry().prometheus_enabled {
        app = app.route("/metrics", get(handlers::metrics));
    }

    app.layer(NormalizePathLayer::trim_trailing_slash())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(request_trace())
        .layer(cors_layer(settings))
        .with_state(state)
}

#[derive(Clone)]
struct RequestSpan;

impl MakeSpan<Body> for RequestSpan {
    fn make_span(&mut self, request: &Request<Body>) -> Span {
        let request_id =
            request.headers().get(REQUEST_ID).and_then(|value| value.to_str().ok()).unwrap_or("-");
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id
        )
    }
}

#[derive(Clone)]
struct RecordResponse;

impl OnResponse<Body> for RecordResponse {
    fn on_response(self, response: &Response<Body>, latency: Duration, _span: &Span) {
        metrics::record_http_response(response.status().as_u16(), latency.as_secs_f64());
    }
}

type RequestTrace = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestSpan,
    DefaultOnRequest,
    RecordResponse,
>;

fn request_trace() -> RequestTrace {
    TraceLayer::new_for_http().make_span_with(RequestSpan).on_response(RecordResponse)
}

fn cors_layer(settings: &Settings) -> CorsLayer {
    let request_id = HeaderName::from_static(REQUEST_ID);
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT, ORIGIN, request_id.clone()])
        .expose_headers([request_id])
        .max_age(Duration::from_secs(3600));

    let origins: Vec<HeaderValue> = settings
        .cors()
        .origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    // Credentials are only allowed with an explicit origin list.
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_credentials(true).allow_origin(AllowOrigin::list(origins))
    }
}
