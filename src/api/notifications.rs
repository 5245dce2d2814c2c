use axum::{extract::State, routing::get, Router};

use crate::api::errors::{ApiOk, ApiResult};
use crate::api::extract::QueryParams;
use crate::api::guards::CurrentCaller;
use crate::api::pagination::PageQuery;
use crate::core::state::AppState;
use crate::schemas::notification::NotificationResponse;
use crate::schemas::page::Paginated;
use crate::services::notifications;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(feed)).route("/preview", get(preview))
}

async fn feed(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    QueryParams(page): QueryParams<PageQuery>,
) -> ApiResult<Paginated<NotificationResponse>> {
    let page = page.resolve(state.listing());
    Ok(ApiOk::ok(notifications::feed(state.db(), &caller, page).await?))
}

async fn preview(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
) -> ApiResult<Vec<NotificationResponse>> {
    let size = state.listing().notification_preview_size;
    Ok(ApiOk::ok(notifications::preview(state.db(), &caller, size).await?))
}
