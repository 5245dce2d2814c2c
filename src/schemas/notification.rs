use serde::Serialize;

use crate::db::types::SubmissionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum NotificationRelation {
    Supervisor,
    Examiner,
}

#[derive(Debug, Serialize)]
pub(crate) struct NotificationResponse {
    pub(crate) submission_id: String,
    pub(crate) title: String,
    pub(crate) status: SubmissionStatus,
    pub(crate) relation: NotificationRelation,
    pub(crate) message: String,
    pub(crate) student_name: String,
    pub(crate) exam_date: Option<String>,
    pub(crate) start_time: Option<String>,
    pub(crate) end_time: Option<String>,
    pub(crate) room_name: Option<String>,
    pub(crate) created_at: String,
}
