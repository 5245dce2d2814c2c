use time::{Date, PrimitiveDateTime, Time};

use crate::db::types::SubmissionStatus;

pub(crate) const COLUMNS: &str = "\
    id, title, document_ref, status, student_id, supervisor_id, exam_date, \
    start_time, end_time, room_id, created_at, updated_at";

/// Submission joined with the people and room it references.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct SubmissionListingRow {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) document_ref: String,
    pub(crate) status: SubmissionStatus,
    pub(crate) exam_date: Option<Date>,
    pub(crate) start_time: Option<Time>,
    pub(crate) end_time: Option<Time>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
    pub(crate) student_id: String,
    pub(crate) student_name: String,
    pub(crate) student_id_number: Option<String>,
    pub(crate) student_program: Option<String>,
    pub(crate) supervisor_id: Option<String>,
    pub(crate) supervisor_name: Option<String>,
    pub(crate) room_id: Option<String>,
    pub(crate) room_name: Option<String>,
    pub(crate) first_examiner_id: Option<String>,
    pub(crate) first_examiner_name: Option<String>,
    pub(crate) second_examiner_id: Option<String>,
    pub(crate) second_examiner_name: Option<String>,
    pub(crate) viewer_is_supervisor: bool,
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct NotificationRow {
    pub(crate) submission_id: String,
    pub(crate) title: String,
    pub(crate) status: SubmissionStatus,
    pub(crate) exam_date: Option<Date>,
    pub(crate) start_time: Option<Time>,
    pub(crate) end_time: Option<Time>,
    pub(crate) room_name: Option<String>,
    pub(crate) student_name: String,
    pub(crate) viewer_is_supervisor: bool,
    pub(crate) event_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FacultyRelation {
    Any,
    Supervisor,
    /// Examiner on a submission the faculty does not supervise.
    ExaminerOnly,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum ListingScope<'a> {
    Everything,
    OwnedBy(&'a str),
    RelatedTo { faculty_id: &'a str, relation: FacultyRelation },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListingOrder {
    ExamDateAsc,
    NewestFirst,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ListingFilter<'a> {
    pub(crate) scope: ListingScope<'a>,
    pub(crate) statuses: Option<&'a [SubmissionStatus]>,
    /// Inclusive lower bound on the exam date.
    pub(crate) date_from: Option<Date>,
    /// Exclusive upper bound on the exam date.
    pub(crate) date_before: Option<Date>,
    pub(crate) order: ListingOrder,
}

impl<'a> ListingFilter<'a> {
    pub(crate) fn new(scope: ListingScope<'a>, order: ListingOrder) -> Self {
        Self { scope, statuses: None, date_from: None, date_before: None, order }
    }

    pub(crate) fn statuses(mut self, statuses: &'a [SubmissionStatus]) -> Self {
        self.statuses = Some(statuses);
        self
    }

    pub(crate) fn dates(mut self, from: Option<Date>, before: Option<Date>) -> Self {
        self.date_from = from;
        self.date_before = before;
        self
    }

    pub(crate) fn viewer_id(&self) -> Option<&'a str> {
        match self.scope {
            ListingScope::RelatedTo { faculty_id, .. } => Some(faculty_id),
            ListingScope::Everything | ListingScope::OwnedBy(_) => None,
        }
    }
}

pub(crate) struct CreateSubmission<'a> {
    pub(crate) id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) document_ref: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) supervisor_id: &'a str,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) struct ScheduleSubmission<'a> {
    pub(crate) exam_date: Date,
    pub(crate) start_time: Time,
    pub(crate) end_time: Time,
    pub(crate) room_id: &'a str,
    pub(crate) updated_at: PrimitiveDateTime,
}
