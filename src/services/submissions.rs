use sqlx::PgPool;
use time::{Date, Time};
use uuid::Uuid;
use validator::Validate;

use crate::core::metrics;
use crate::core::time::{parse_date, parse_time, primitive_now_utc};
use crate::db::types::{AccountRole, SubmissionStatus};
use crate::repositories;
use crate::repositories::submissions::{CreateSubmission, ScheduleSubmission, SubmissionListingRow};
use crate::schemas::submission::{
    ReviewRequest, ScheduleRequest, StudentSubmissionView, SubmissionCreate, SubmissionView,
};
use crate::services::caller::Caller;
use crate::services::errors::{is_unique_violation, FieldErrors, ServiceError};
use crate::services::profiles::missing_profile_fields;
use crate::services::transitions::can_transition;

const ACTIVE_SUBMISSION_INDEX: &str = "ux_exam_submissions_active_student";
const MAX_EXAMINERS: usize = 2;

/// Student files a new exam request. The student row stays locked until commit, so two
/// concurrent creates for the same student run one after the other.
pub(crate) async fn create(
    pool: &PgPool,
    caller: &Caller,
    input: SubmissionCreate,
) -> Result<SubmissionView, ServiceError> {
    caller.require(AccountRole::Student)?;
    input.validate().map_err(|errors| ServiceError::from_validation(&errors))?;

    let mut tx = pool.begin().await?;

    let student = repositories::accounts::find_by_id_for_update(&mut *tx, &caller.account_id)
        .await?
        .ok_or(ServiceError::NotFound("Account"))?;

    let missing = missing_profile_fields(&student);
    if !missing.is_empty() {
        return Err(ServiceError::ProfileIncomplete { missing });
    }
    let Some(supervisor_id) = student.supervisor_id.as_deref() else {
        return Err(ServiceError::ProfileIncomplete { missing: vec!["supervisor_id"] });
    };

    let declared = input.supervisor_id.as_deref().map(str::trim).filter(|value| !value.is_empty());
    if declared.is_some_and(|declared| declared != supervisor_id) {
        return Err(ServiceError::field(
            "supervisor_id",
            "supervisor_id must match the supervisor on your profile",
        ));
    }

    if repositories::submissions::find_active_id_for_student(&mut *tx, &student.id)
        .await?
        .is_some()
    {
        return Err(ServiceError::ActiveSubmissionExists);
    }

    let submission_id = Uuid::new_v4().to_string();
    let created = repositories::submissions::create(
        &mut *tx,
        CreateSubmission {
            id: &submission_id,
            title: input.title.trim(),
            document_ref: input.document_ref.trim(),
            student_id: &student.id,
            supervisor_id,
            created_at: primitive_now_utc(),
        },
    )
    .await;

    match created {
        Ok(_) => {}
        Err(err) if is_unique_violation(&err, ACTIVE_SUBMISSION_INDEX) => {
            return Err(ServiceError::ActiveSubmissionExists);
        }
        Err(err) => return Err(err.into()),
    }

    tx.commit().await?;

    metrics::record_transition("NEW", SubmissionStatus::PendingReview.as_str());
    tracing::info!(
        student_id = %caller.account_id,
        submission_id = %submission_id,
        action = "create_submission",
        "Submission created"
    );

    load_view(pool, caller, &submission_id).await
}

/// Admin accepts or rejects a pending submission.
pub(crate) async fn review(
    pool: &PgPool,
    caller: &Caller,
    submission_id: &str,
    request: ReviewRequest,
) -> Result<SubmissionView, ServiceError> {
    caller.require(AccountRole::Admin)?;
    let target = request.status.target();

    let current = repositories::submissions::find_by_id(pool, submission_id)
        .await?
        .ok_or(ServiceError::NotFound("Submission"))?;

    if !can_transition(current.status, target) {
        return Err(ServiceError::InvalidTransition { from: current.status, to: target });
    }

    let updated = repositories::submissions::transition(
        pool,
        submission_id,
        current.status,
        target,
        primitive_now_utc(),
    )
    .await?;

    if updated.is_none() {
        return Err(lost_transition(pool, submission_id, current.status, target).await);
    }

    metrics::record_transition(current.status.as_str(), target.as_str());
    tracing::info!(
        admin_id = %caller.account_id,
        submission_id = %submission_id,
        action = "review_submission",
        from = current.status.as_str(),
        to = target.as_str(),
        "Submission reviewed"
    );

    load_view(pool, caller, submission_id).await
}

/// Parsed, de-duplicated scheduling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SchedulePlan {
    pub(crate) exam_date: Date,
    pub(crate) start_time: Time,
    pub(crate) end_time: Time,
    pub(crate) examiner_ids: Vec<String>,
}

impl SchedulePlan {
    pub(crate) fn from_request(request: &ScheduleRequest) -> Result<Self, ServiceError> {
        let mut fields = FieldErrors::new();
        let mut reject = |field: &str, message: &str| {
            fields.entry(field.to_string()).or_default().push(message.to_string());
        };

        let exam_date = parse_date(&request.exam_date);
        if exam_date.is_none() {
            reject("exam_date", "exam_date must be a YYYY-MM-DD date");
        }
        let start_time = parse_time(&request.start_time);
        if start_time.is_none() {
            reject("start_time", "start_time must be HH:MM");
        }
        let end_time = parse_time(&request.end_time);
        if end_time.is_none() {
            reject("end_time", "end_time must be HH:MM");
        }
        if let (Some(start), Some(end)) = (start_time, end_time) {
            if end <= start {
                reject("end_time", "end_time must be after start_time");
            }
        }

        let mut examiner_ids: Vec<String> = Vec::new();
        for id in request.examiner_ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
            if !examiner_ids.iter().any(|existing| existing == id) {
                examiner_ids.push(id.to_string());
            }
        }
        if examiner_ids.len() > MAX_EXAMINERS {
            reject("examiner_ids", "at most two examiners can be assigned");
        }

        match (exam_date, start_time, end_time) {
            (Some(exam_date), Some(start_time), Some(end_time)) if fields.is_empty() => {
                Ok(Self { exam_date, start_time, end_time, examiner_ids })
            }
            _ => Err(ServiceError::Validation { message: "Invalid schedule".to_string(), fields }),
        }
    }
}

/// Admin fixes date, time, room and examiners of an accepted submission.
pub(crate) async fn schedule(
    pool: &PgPool,
    caller: &Caller,
    submission_id: &str,
    request: ScheduleRequest,
) -> Result<SubmissionView, ServiceError> {
    caller.require(AccountRole::Admin)?;
    request.validate().map_err(|errors| ServiceError::from_validation(&errors))?;
    let plan = SchedulePlan::from_request(&request)?;

    let mut tx = pool.begin().await?;

    let current = repositories::submissions::find_by_id(&mut *tx, submission_id)
        .await?
        .ok_or(ServiceError::NotFound("Submission"))?;
    if !can_transition(current.status, SubmissionStatus::Scheduled) {
        return Err(ServiceError::InvalidTransition {
            from: current.status,
            to: SubmissionStatus::Scheduled,
        });
    }

    let room_id = request.room_id.trim();
    repositories::rooms::find_by_id(&mut *tx, room_id)
        .await?
        .ok_or(ServiceError::NotFound("Room"))?;

    let faculty = repositories::accounts::faculty_ids_among(&mut *tx, &plan.examiner_ids).await?;
    if let Some(unknown) = plan.examiner_ids.iter().find(|id| !faculty.contains(id)) {
        return Err(ServiceError::field(
            "examiner_ids",
            format!("{unknown} is not a faculty account"),
        ));
    }

    let now = primitive_now_utc();
    let scheduled = repositories::submissions::schedule_if_accepted(
        &mut *tx,
        submission_id,
        ScheduleSubmission {
            exam_date: plan.exam_date,
            start_time: plan.start_time,
            end_time: plan.end_time,
            room_id,
            updated_at: now,
        },
    )
    .await?;

    if scheduled.is_none() {
        let from = repositories::submissions::find_by_id(&mut *tx, submission_id)
            .await?
            .map_or(current.status, |submission| submission.status);
        return Err(ServiceError::InvalidTransition { from, to: SubmissionStatus::Scheduled });
    }

    for (index, examiner_id) in plan.examiner_ids.iter().enumerate() {
        let position = i16::try_from(index + 1).unwrap_or(i16::MAX);
        repositories::examiners::insert(&mut *tx, submission_id, examiner_id, position, now).await?;
    }

    tx.commit().await?;

    metrics::record_transition(current.status.as_str(), SubmissionStatus::Scheduled.as_str());
    tracing::info!(
        admin_id = %caller.account_id,
        submission_id = %submission_id,
        room_id = %room_id,
        examiners = plan.examiner_ids.len(),
        action = "schedule_submission",
        "Submission scheduled"
    );

    load_view(pool, caller, submission_id).await
}

/// Submission detail, only when the caller is allowed to see it.
pub(crate) async fn get(
    pool: &PgPool,
    caller: &Caller,
    submission_id: &str,
) -> Result<SubmissionView, ServiceError> {
    load_view(pool, caller, submission_id).await
}

/// The student's latest submission in any status.
pub(crate) async fn current(
    pool: &PgPool,
    caller: &Caller,
) -> Result<Option<StudentSubmissionView>, ServiceError> {
    caller.require(AccountRole::Student)?;

    let row = repositories::submissions::latest_for_student(pool, &caller.account_id).await?;
    Ok(row.map(StudentSubmissionView::from_row))
}

pub(crate) fn is_visible_to(caller: &Caller, row: &SubmissionListingRow) -> bool {
    let me = Some(caller.account_id.as_str());
    match caller.role {
        AccountRole::Student => row.student_id == caller.account_id,
        AccountRole::Faculty => {
            row.supervisor_id.as_deref() == me
                || row.first_examiner_id.as_deref() == me
                || row.second_examiner_id.as_deref() == me
        }
        AccountRole::Admin => true,
    }
}

async fn load_view(
    pool: &PgPool,
    caller: &Caller,
    submission_id: &str,
) -> Result<SubmissionView, ServiceError> {
    let viewer = match caller.role {
        AccountRole::Faculty => Some(caller.account_id.as_str()),
        AccountRole::Student | AccountRole::Admin => None,
    };

    let row = repositories::submissions::find_listing(pool, submission_id, viewer)
        .await?
        .filter(|row| is_visible_to(caller, row))
        .ok_or(ServiceError::NotFound("Submission"))?;

    Ok(SubmissionView::for_role(caller.role, row))
}

/// Error for a conditional update that matched no row: either the submission vanished or
/// another request moved it first.
async fn lost_transition(
    pool: &PgPool,
    submission_id: &str,
    expected: SubmissionStatus,
    target: SubmissionStatus,
) -> ServiceError {
    match repositories::submissions::find_by_id(pool, submission_id).await {
        Ok(Some(submission)) => {
            ServiceError::InvalidTransition { from: submission.status, to: target }
        }
        Ok(None) => ServiceError::NotFound("Submission"),
        Err(err) => {
            tracing::warn!(
                error = %err,
                expected = expected.as_str(),
                "Failed to re-read submission"
            );
            ServiceError::InvalidTransition { from: expected, to: target }
        }
    }
}
