use serde::Serialize;
use sqlx::FromRow;
use time::{Date, PrimitiveDateTime, Time};

use crate::db::types::{AccountRole, SubmissionStatus};

#[derive(Debug, Clone, Serialize, FromRow)]
pub(crate) struct Account {
    pub(crate) id: String,
    pub(crate) full_name: String,
    pub(crate) role: AccountRole,
    pub(crate) id_number: Option<String>,
    pub(crate) program: Option<String>,
    pub(crate) department: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) supervisor_id: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub(crate) struct ExamSubmission {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) document_ref: String,
    pub(crate) status: SubmissionStatus,
    pub(crate) student_id: String,
    pub(crate) supervisor_id: Option<String>,
    pub(crate) exam_date: Option<Date>,
    pub(crate) start_time: Option<Time>,
    pub(crate) end_time: Option<Time>,
    pub(crate) room_id: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[cfg(test)]
#[derive(Debug, Clone, FromRow)]
pub(crate) struct ExaminerAssignment {
    pub(crate) examiner_id: String,
    pub(crate) position: i16,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub(crate) struct Room {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}
