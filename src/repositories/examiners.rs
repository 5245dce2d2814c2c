use time::PrimitiveDateTime;

/// Assignment rows in position order. Listings read examiners through joins instead.
#[cfg(test)]
pub(crate) async fn list_for_submission(
    executor: impl sqlx::PgExecutor<'_>,
    submission_id: &str,
) -> Result<Vec<crate::db::models::ExaminerAssignment>, sqlx::Error> {
    sqlx::query_as::<_, crate::db::models::ExaminerAssignment>(
        "SELECT examiner_id, position
         FROM examiner_assignments
         WHERE submission_id = $1
         ORDER BY position",
    )
    .bind(submission_id)
    .fetch_all(executor)
    .await
}

pub(crate) async fn insert(
    executor: impl sqlx::PgExecutor<'_>,
    submission_id: &str,
    examiner_id: &str,
    position: i16,
    assigned_at: PrimitiveDateTime,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO examiner_assignments (submission_id, examiner_id, position, assigned_at)
         VALUES ($1,$2,$3,$4)",
    )
    .bind(submission_id)
    .bind(examiner_id)
    .bind(position)
    .bind(assigned_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub(crate) async fn delete_for_student(
    executor: impl sqlx::PgExecutor<'_>,
    student_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM examiner_assignments ea
         USING exam_submissions s
         WHERE ea.submission_id = s.id AND s.student_id = $1",
    )
    .bind(student_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn delete_for_examiner(
    executor: impl sqlx::PgExecutor<'_>,
    examiner_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM examiner_assignments WHERE examiner_id = $1")
        .bind(examiner_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
