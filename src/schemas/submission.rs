use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::{format_date, format_primitive, format_time};
use crate::db::types::{AccountRole, SubmissionStatus};
use crate::repositories::submissions::SubmissionListingRow;
use crate::services::transitions::ReviewDecision;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct SubmissionCreate {
    #[validate(length(min = 1, max = 500, message = "title must be 1-500 characters"))]
    pub(crate) title: String,
    #[serde(alias = "documentRef")]
    #[validate(length(min = 1, max = 1024, message = "document_ref must be 1-1024 characters"))]
    pub(crate) document_ref: String,
    #[serde(default)]
    #[serde(alias = "supervisorId")]
    pub(crate) supervisor_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewRequest {
    pub(crate) status: ReviewDecision,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ScheduleRequest {
    #[serde(alias = "examDate")]
    pub(crate) exam_date: String,
    #[serde(alias = "startTime")]
    pub(crate) start_time: String,
    #[serde(alias = "endTime")]
    pub(crate) end_time: String,
    #[serde(alias = "roomId")]
    #[validate(length(min = 1, message = "room_id is required"))]
    pub(crate) room_id: String,
    #[serde(default)]
    #[serde(alias = "examinerIds")]
    pub(crate) examiner_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PersonRef {
    pub(crate) id: String,
    pub(crate) name: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct RoomRef {
    pub(crate) id: String,
    pub(crate) name: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct StudentRef {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) id_number: Option<String>,
    pub(crate) program: Option<String>,
}

/// What a student sees of their own submission.
#[derive(Debug, Serialize)]
pub(crate) struct StudentSubmissionView {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) document_ref: String,
    pub(crate) status: SubmissionStatus,
    pub(crate) exam_date: Option<String>,
    pub(crate) start_time: Option<String>,
    pub(crate) end_time: Option<String>,
    pub(crate) room_name: Option<String>,
    pub(crate) supervisor_name: Option<String>,
    pub(crate) examiner_names: Vec<String>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

/// Faculty projection; `is_supervisor` is relative to the viewing faculty.
#[derive(Debug, Serialize)]
pub(crate) struct FacultySubmissionView {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) document_ref: String,
    pub(crate) status: SubmissionStatus,
    pub(crate) exam_date: Option<String>,
    pub(crate) start_time: Option<String>,
    pub(crate) end_time: Option<String>,
    pub(crate) room_name: Option<String>,
    pub(crate) student_name: String,
    pub(crate) student_id_number: Option<String>,
    pub(crate) supervisor_name: Option<String>,
    pub(crate) examiner_names: Vec<String>,
    pub(crate) is_supervisor: bool,
    pub(crate) updated_at: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AdminSubmissionView {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) document_ref: String,
    pub(crate) status: SubmissionStatus,
    pub(crate) exam_date: Option<String>,
    pub(crate) start_time: Option<String>,
    pub(crate) end_time: Option<String>,
    pub(crate) room: Option<RoomRef>,
    pub(crate) student: StudentRef,
    pub(crate) cohort: Option<String>,
    pub(crate) supervisor: Option<PersonRef>,
    pub(crate) examiners: Vec<PersonRef>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum SubmissionView {
    Student(StudentSubmissionView),
    Faculty(FacultySubmissionView),
    Admin(AdminSubmissionView),
}

impl SubmissionView {
    pub(crate) fn for_role(role: AccountRole, row: SubmissionListingRow) -> Self {
        match role {
            AccountRole::Student => Self::Student(StudentSubmissionView::from_row(row)),
            AccountRole::Faculty => Self::Faculty(FacultySubmissionView::from_row(row)),
            AccountRole::Admin => Self::Admin(AdminSubmissionView::from_row(row)),
        }
    }
}

/// Enrollment year encoded in the leading four digits of a student id number.
pub(crate) fn cohort_of(id_number: Option<&str>) -> Option<String> {
    let prefix = id_number?.get(..4)?;
    prefix.chars().all(|ch| ch.is_ascii_digit()).then(|| prefix.to_string())
}

fn examiners(row: &SubmissionListingRow) -> Vec<PersonRef> {
    [
        (&row.first_examiner_id, &row.first_examiner_name),
        (&row.second_examiner_id, &row.second_examiner_name),
    ]
    .into_iter()
    .filter_map(|(id, name)| {
        Some(PersonRef { id: id.clone()?, name: name.clone().unwrap_or_default() })
    })
    .collect()
}

impl StudentSubmissionView {
    pub(crate) fn from_row(row: SubmissionListingRow) -> Self {
        let examiner_names = examiners(&row).into_iter().map(|person| person.name).collect();
        Self {
            id: row.id,
            title: row.title,
            document_ref: row.document_ref,
            status: row.status,
            exam_date: row.exam_date.map(format_date),
            start_time: row.start_time.map(format_time),
            end_time: row.end_time.map(format_time),
            room_name: row.room_name,
            supervisor_name: row.supervisor_name,
            examiner_names,
            created_at: format_primitive(row.created_at),
            updated_at: format_primitive(row.updated_at),
        }
    }
}

impl FacultySubmissionView {
    pub(crate) fn from_row(row: SubmissionListingRow) -> Self {
        let examiner_names = examiners(&row).into_iter().map(|person| person.name).collect();
        Self {
            id: row.id,
            title: row.title,
            document_ref: row.document_ref,
            status: row.status,
            exam_date: row.exam_date.map(format_date),
            start_time: row.start_time.map(format_time),
            end_time: row.end_time.map(format_time),
            room_name: row.room_name,
            student_name: row.student_name,
            student_id_number: row.student_id_number,
            supervisor_name: row.supervisor_name,
            examiner_names,
            is_supervisor: row.viewer_is_supervisor,
            updated_at: format_primitive(row.updated_at),
        }
    }
}

impl AdminSubmissionView {
    pub(crate) fn from_row(row: SubmissionListingRow) -> Self {
        let examiners = examiners(&row);
        let room = match (row.room_id, row.room_name) {
            (Some(id), Some(name)) => Some(RoomRef { id, name }),
            _ => None,
        };
        let supervisor = row.supervisor_id.map(|id| PersonRef {
            id,
            name: row.supervisor_name.unwrap_or_default(),
        });

        Self {
            id: row.id,
            title: row.title,
            document_ref: row.document_ref,
            status: row.status,
            exam_date: row.exam_date.map(format_date),
            start_time: row.start_time.map(format_time),
            end_time: row.end_time.map(format_time),
            room,
            cohort: cohort_of(row.student_id_number.as_deref()),
            student: StudentRef {
                id: row.student_id,
                name: row.student_name,
                id_number: row.student_id_number,
                program: row.student_program,
            },
            supervisor,
            examiners,
            created_at: format_primitive(row.created_at),
            updated_at: format_primitive(row.updated_at),
        }
    }
}
