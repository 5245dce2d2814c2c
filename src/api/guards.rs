use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::api::errors::ApiError;
use crate::core::{security, state::AppState};
use crate::repositories;
use crate::services::caller::Caller;

const BAD_CREDENTIALS: ApiError = ApiError::Unauthorized("Invalid authentication credentials");

/// Resolves the bearer token to the calling account and its role.
pub(crate) struct CurrentCaller(pub(crate) Caller);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentCaller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = bearer_token(parts).ok_or(BAD_CREDENTIALS)?;
        let claims =
            security::verify_token(token, state.settings()).map_err(|_| BAD_CREDENTIALS)?;

        // A valid token for a deleted account is still rejected.
        let account = repositories::accounts::find_by_id(state.db(), &claims.sub)
            .await
            .map_err(|err| ApiError::internal(err, "Failed to load account"))?
            .ok_or(ApiError::Unauthorized("Account not found"))?;

        Ok(Self(Caller::new(account.id, account.role)))
    }
}
