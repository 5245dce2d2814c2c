use axum::{extract::State, routing::get, Router};

use crate::api::errors::{ApiOk, ApiResult};
use crate::api::guards::CurrentCaller;
use crate::core::state::AppState;
use crate::schemas::statistics::WorkloadSummary;
use crate::services::workload;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/workload", get(faculty_workload))
}

async fn faculty_workload(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
) -> ApiResult<WorkloadSummary> {
    Ok(ApiOk::ok(workload::faculty_workload(state.db(), &caller).await?))
}
