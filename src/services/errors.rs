use std::collections::BTreeMap;

use thiserror::Error;

use crate::db::types::SubmissionStatus;

/// Field name to messages, serialized as `fieldErrors`.
pub(crate) type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub(crate) enum ServiceError {
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("{message}")]
    Validation { message: String, fields: FieldErrors },
    #[error("cannot move submission from {} to {}", from.as_str(), to.as_str())]
    InvalidTransition { from: SubmissionStatus, to: SubmissionStatus },
    #[error("an active submission already exists")]
    ActiveSubmissionExists,
    #[error("profile is incomplete: missing {}", missing.join(", "))]
    ProfileIncomplete { missing: Vec<&'static str> },
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("no faculty data available")]
    NoFacultyData,
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl ServiceError {
    pub(crate) fn field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut fields = FieldErrors::new();
        fields.insert(field.to_string(), vec![message.clone()]);
        Self::Validation { message, fields }
    }

    pub(crate) fn from_validation(errors: &validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            let messages = field_errors
                .iter()
                .map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
        Self::Validation { message: "Invalid input".to_string(), fields }
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
