use crate::db::types::SubmissionStatus;

/// Legal lifecycle moves: PENDING_REVIEW -> {ACCEPTED, REJECTED}, ACCEPTED -> SCHEDULED.
pub(crate) fn can_transition(from: SubmissionStatus, to: SubmissionStatus) -> bool {
    use SubmissionStatus::*;

    match from {
        PendingReview => matches!(to, Accepted | Rejected),
        Accepted => matches!(to, Scheduled),
        Rejected | Scheduled => false,
    }
}

/// Outcomes an admin may pick when reviewing a pending submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum ReviewDecision {
    Accepted,
    Rejected,
}

impl ReviewDecision {
    pub(crate) fn target(self) -> SubmissionStatus {
        match self {
            Self::Accepted => SubmissionStatus::Accepted,
            Self::Rejected => SubmissionStatus::Rejected,
        }
    }
}
