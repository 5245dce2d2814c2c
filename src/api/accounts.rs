use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Router,
};
use serde::Deserialize;

use crate::api::errors::{ApiOk, ApiResult};
use crate::api::extract::{Payload, QueryParams};
use crate::api::guards::CurrentCaller;
use crate::api::pagination::PageQuery;
use crate::core::revalidate::ResourcePath;
use crate::core::state::AppState;
use crate::db::types::AccountRole;
use crate::schemas::account::{
    AccountCreate, AccountRemovalResponse, AccountResponse, FacultyOptionResponse,
    ProfileResponse, ProfileUpdate,
};
use crate::schemas::page::Paginated;
use crate::services::{account_removal, profiles};

#[derive(Debug, Deserialize)]
pub(crate) struct AccountListQuery {
    #[serde(default)]
    role: Option<AccountRole>,
}

pub(crate) fn profile_router() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(update_profile))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route("/faculty", get(list_faculty))
        .route("/:account_id", delete(delete_account))
}

async fn get_profile(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
) -> ApiResult<ProfileResponse> {
    Ok(ApiOk::ok(profiles::get_own(state.db(), &caller).await?))
}

async fn update_profile(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Payload(payload): Payload<ProfileUpdate>,
) -> ApiResult<ProfileResponse> {
    let profile = profiles::update_own(state.db(), &caller, payload).await?;
    state.revalidator().revalidate(&[ResourcePath::Profile, ResourcePath::Accounts]).await;
    Ok(ApiOk::ok(profile))
}

async fn list_accounts(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<AccountListQuery>,
    QueryParams(page): QueryParams<PageQuery>,
) -> ApiResult<Paginated<AccountResponse>> {
    let page = page.resolve(state.listing());
    Ok(ApiOk::ok(profiles::list_accounts(state.db(), &caller, filter.role, page).await?))
}

async fn create_account(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Payload(payload): Payload<AccountCreate>,
) -> ApiResult<AccountResponse> {
    let account = profiles::create_account(state.db(), &caller, payload).await?;
    state.revalidator().revalidate(&[ResourcePath::Accounts, ResourcePath::Statistics]).await;
    Ok(ApiOk::created(account))
}

async fn list_faculty(
    CurrentCaller(_caller): CurrentCaller,
    State(state): State<AppState>,
) -> ApiResult<Vec<FacultyOptionResponse>> {
    Ok(ApiOk::ok(profiles::list_faculty(state.db()).await?))
}

async fn delete_account(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> ApiResult<AccountRemovalResponse> {
    let report = account_removal::delete_account(state.db(), &caller, &account_id).await?;
    state
        .revalidator()
        .revalidate(&[
            ResourcePath::Accounts,
            ResourcePath::Profile,
            ResourcePath::Submissions,
            ResourcePath::Notifications,
            ResourcePath::Statistics,
        ])
        .await;
    Ok(ApiOk::ok(report))
}
