use time::PrimitiveDateTime;

use crate::db::models::ExamSubmission;
use crate::db::types::SubmissionStatus;

use super::types::{CreateSubmission, ScheduleSubmission, COLUMNS};

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreateSubmission<'_>,
) -> Result<ExamSubmission, sqlx::Error> {
    sqlx::query_as::<_, ExamSubmission>(&format!(
        "INSERT INTO exam_submissions (
            id, title, document_ref, status, student_id, supervisor_id, created_at, updated_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$7)
         RETURNING {COLUMNS}"
    ))
    .bind(params.id)
    .bind(params.title)
    .bind(params.document_ref)
    .bind(SubmissionStatus::PendingReview)
    .bind(params.student_id)
    .bind(params.supervisor_id)
    .bind(params.created_at)
    .fetch_one(executor)
    .await
}

/// Moves `id` from `from` to `to`. Returns `None` when the row is not in `from` anymore.
pub(crate) async fn transition(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
    from: SubmissionStatus,
    to: SubmissionStatus,
    now: PrimitiveDateTime,
) -> Result<Option<ExamSubmission>, sqlx::Error> {
    sqlx::query_as::<_, ExamSubmission>(&format!(
        "UPDATE exam_submissions
         SET status = $1, updated_at = $2
         WHERE id = $3 AND status = $4
         RETURNING {COLUMNS}"
    ))
    .bind(to)
    .bind(now)
    .bind(id)
    .bind(from)
    .fetch_optional(executor)
    .await
}

pub(crate) async fn schedule_if_accepted(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
    params: ScheduleSubmission<'_>,
) -> Result<Option<ExamSubmission>, sqlx::Error> {
    sqlx::query_as::<_, ExamSubmission>(&format!(
        "UPDATE exam_submissions
         SET status = $1,
             exam_date = $2,
             start_time = $3,
             end_time = $4,
             room_id = $5,
             updated_at = $6
         WHERE id = $7 AND status = $8
         RETURNING {COLUMNS}"
    ))
    .bind(SubmissionStatus::Scheduled)
    .bind(params.exam_date)
    .bind(params.start_time)
    .bind(params.end_time)
    .bind(params.room_id)
    .bind(params.updated_at)
    .bind(id)
    .bind(SubmissionStatus::Accepted)
    .fetch_optional(executor)
    .await
}

/// Leaves `updated_at` alone: it tracks lifecycle events, which feed notifications.
pub(crate) async fn clear_supervisor(
    executor: impl sqlx::PgExecutor<'_>,
    faculty_id: &str,
) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("UPDATE exam_submissions SET supervisor_id = NULL WHERE supervisor_id = $1")
            .bind(faculty_id)
            .execute(executor)
            .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn delete_for_student(
    executor: impl sqlx::PgExecutor<'_>,
    student_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM exam_submissions WHERE student_id = $1")
        .bind(student_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
