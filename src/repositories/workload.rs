use sqlx::PgPool;

use crate::db::types::AccountRole;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct FacultyLoadRow {
    pub(crate) faculty_id: String,
    pub(crate) full_name: String,
    pub(crate) supervision_count: i64,
    pub(crate) examination_count: i64,
}

/// One row per FACULTY account, in account creation order.
pub(crate) async fn list_faculty_loads(pool: &PgPool) -> Result<Vec<FacultyLoadRow>, sqlx::Error> {
    sqlx::query_as::<_, FacultyLoadRow>(
        "SELECT a.id AS faculty_id,
                a.full_name,
                (SELECT COUNT(*) FROM exam_submissions s
                 WHERE s.supervisor_id = a.id) AS supervision_count,
                (SELECT COUNT(*) FROM examiner_assignments ea
                 WHERE ea.examiner_id = a.id) AS examination_count
         FROM accounts a
         WHERE a.role = $1
         ORDER BY a.created_at, a.id",
    )
    .bind(AccountRole::Faculty)
    .fetch_all(pool)
    .await
}
