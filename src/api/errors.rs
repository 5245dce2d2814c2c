use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::services::errors::{FieldErrors, ServiceError};

/// Uniform body for every endpoint: `{success, data?, error?, code?, fieldErrors?}`.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(rename = "fieldErrors", skip_serializing_if = "Option::is_none")]
    field_errors: Option<FieldErrors>,
}

/// Successful outcome carrying `data`.
#[derive(Debug)]
pub(crate) struct ApiOk<T> {
    status: StatusCode,
    data: T,
}

impl<T> ApiOk<T> {
    pub(crate) fn ok(data: T) -> Self {
        Self { status: StatusCode::OK, data }
    }

    pub(crate) fn created(data: T) -> Self {
        Self { status: StatusCode::CREATED, data }
    }
}

impl<T: Serialize> IntoResponse for ApiOk<T> {
    fn into_response(self) -> Response {
        let body = Envelope {
            success: true,
            data: Some(self.data),
            error: None,
            code: None,
            field_errors: None,
        };
        (self.status, Json(body)).into_response()
    }
}

pub(crate) type ApiResult<T> = Result<ApiOk<T>, ApiError>;

#[derive(Debug)]
pub(crate) enum ApiError {
    Unauthorized(&'static str),
    /// Body or query string that could not be decoded.
    InvalidInput(String),
    Service(ServiceError),
    Internal(String),
}

impl ApiError {
    /// Log the underlying error with context and return an `Internal` variant.
    pub(crate) fn internal(err: impl std::fmt::Display, context: &str) -> Self {
        tracing::error!(error = %err, "{context}");
        Self::Internal(context.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

fn failure(
    status: StatusCode,
    code: &'static str,
    message: String,
    field_errors: Option<FieldErrors>,
) -> Response {
    let body: Envelope<()> = Envelope {
        success: false,
        data: None,
        error: Some(message),
        code: Some(code),
        field_errors,
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(message) => {
                let mut response = failure(
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHENTICATED",
                    message.to_string(),
                    None,
                );
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                response
            }
            ApiError::InvalidInput(message) => {
                failure(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED", message, None)
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Internal server error");
                failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "Internal server error".to_string(),
                    None,
                )
            }
            ApiError::Service(err) => service_failure(err),
        }
    }
}

fn service_failure(err: ServiceError) -> Response {
    let message = err.to_string();
    match err {
        ServiceError::Forbidden(_) => failure(StatusCode::FORBIDDEN, "FORBIDDEN", message, None),
        ServiceError::Validation { message, fields } => failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            "VALIDATION_FAILED",
            message,
            (!fields.is_empty()).then_some(fields),
        ),
        ServiceError::InvalidTransition { .. } => {
            failure(StatusCode::CONFLICT, "INVALID_TRANSITION", message, None)
        }
        ServiceError::ActiveSubmissionExists => {
            failure(StatusCode::CONFLICT, "ACTIVE_SUBMISSION_EXISTS", message, None)
        }
        ServiceError::ProfileIncomplete { missing } => {
            let fields = missing
                .iter()
                .map(|field| (field.to_string(), vec![format!("{field} is required")]))
                .collect();
            failure(StatusCode::UNPROCESSABLE_ENTITY, "PROFILE_INCOMPLETE", message, Some(fields))
        }
        ServiceError::NotFound(_) => failure(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
        ServiceError::Conflict(_) => failure(StatusCode::CONFLICT, "CONFLICT", message, None),
        ServiceError::NoFacultyData => {
            failure(StatusCode::NOT_FOUND, "NO_FACULTY_DATA", message, None)
        }
        ServiceError::Store(err) => {
            tracing::error!(error = %err, "Store operation failed");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_ERROR",
                "Internal server error".to_string(),
                None,
            )
        }
    }
}
