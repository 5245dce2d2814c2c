use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::api::errors::{ApiOk, ApiResult};
use crate::api::extract::{Payload, QueryParams};
use crate::api::guards::CurrentCaller;
use crate::api::pagination::PageQuery;
use crate::core::revalidate::ResourcePath;
use crate::core::state::AppState;
use crate::schemas::page::Paginated;
use crate::schemas::submission::{
    AdminSubmissionView, ReviewRequest, ScheduleRequest, StudentSubmissionView, SubmissionCreate,
    SubmissionView,
};
use crate::services::listings::{self, HistoryFilter, RelationFilter, StatusFilter};
use crate::services::submissions;

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryQuery {
    #[serde(default)]
    status: Option<StatusFilter>,
    #[serde(default)]
    relation: Option<RelationFilter>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CalendarQuery {
    year: i32,
    month: u8,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_submission))
        .route("/current", get(current_submission))
        .route("/dashboard", get(dashboard))
        .route("/history", get(history))
        .route("/calendar", get(calendar))
        .route("/:submission_id", get(get_submission))
        .route("/:submission_id/review", post(review_submission))
        .route("/:submission_id/schedule", post(schedule_submission))
}

const MUTATED: [ResourcePath; 3] =
    [ResourcePath::Submissions, ResourcePath::Notifications, ResourcePath::Statistics];

async fn create_submission(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Payload(payload): Payload<SubmissionCreate>,
) -> ApiResult<SubmissionView> {
    let submission = submissions::create(state.db(), &caller, payload).await?;
    state.revalidator().revalidate(&MUTATED).await;
    Ok(ApiOk::created(submission))
}

async fn review_submission(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
    Payload(payload): Payload<ReviewRequest>,
) -> ApiResult<SubmissionView> {
    let submission = submissions::review(state.db(), &caller, &submission_id, payload).await?;
    state.revalidator().revalidate(&MUTATED).await;
    Ok(ApiOk::ok(submission))
}

async fn schedule_submission(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
    Payload(payload): Payload<ScheduleRequest>,
) -> ApiResult<SubmissionView> {
    let submission = submissions::schedule(state.db(), &caller, &submission_id, payload).await?;
    state.revalidator().revalidate(&MUTATED).await;
    Ok(ApiOk::ok(submission))
}

async fn get_submission(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> ApiResult<SubmissionView> {
    Ok(ApiOk::ok(submissions::get(state.db(), &caller, &submission_id).await?))
}

async fn current_submission(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
) -> ApiResult<Option<StudentSubmissionView>> {
    Ok(ApiOk::ok(submissions::current(state.db(), &caller).await?))
}

async fn dashboard(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
) -> ApiResult<Vec<SubmissionView>> {
    let items = listings::dashboard(state.db(), &caller, state.listing()).await?;
    Ok(ApiOk::ok(items))
}

async fn history(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<HistoryQuery>,
    QueryParams(page): QueryParams<PageQuery>,
) -> ApiResult<Paginated<SubmissionView>> {
    let filter =
        HistoryFilter { status: query.status, relation: query.relation.unwrap_or_default() };
    let page = page.resolve(state.listing());
    Ok(ApiOk::ok(listings::history(state.db(), &caller, filter, page).await?))
}

async fn calendar(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CalendarQuery>,
) -> ApiResult<Vec<AdminSubmissionView>> {
    Ok(ApiOk::ok(listings::calendar(state.db(), &caller, query.year, query.month).await?))
}

#[cfg(test)]
mod tests;
