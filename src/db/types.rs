use serde::{Deserialize, Serialize};
use sqlx::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "account_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum AccountRole {
    Student,
    Faculty,
    Admin,
}

impl AccountRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Faculty => "FACULTY",
            Self::Admin => "ADMIN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "submission_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum SubmissionStatus {
    PendingReview,
    Accepted,
    Rejected,
    Scheduled,
}

impl SubmissionStatus {
    pub(crate) const ACTIVE: [SubmissionStatus; 3] =
        [Self::PendingReview, Self::Accepted, Self::Scheduled];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::PendingReview => "PENDING_REVIEW",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
            Self::Scheduled => "SCHEDULED",
        }
    }
}
