use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::Room;

const COLUMNS: &str = "id, name, description, created_at";

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
) -> Result<Option<Room>, sqlx::Error> {
    sqlx::query_as::<_, Room>(&format!("SELECT {COLUMNS} FROM rooms WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub(crate) async fn exists_by_name(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM rooms WHERE lower(name) = lower($1))",
    )
    .bind(name)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list(pool: &PgPool) -> Result<Vec<Room>, sqlx::Error> {
    sqlx::query_as::<_, Room>(&format!("SELECT {COLUMNS} FROM rooms ORDER BY name"))
        .fetch_all(pool)
        .await
}

pub(crate) async fn create(
    pool: &PgPool,
    id: &str,
    name: &str,
    description: Option<&str>,
    now: PrimitiveDateTime,
) -> Result<Room, sqlx::Error> {
    sqlx::query_as::<_, Room>(&format!(
        "INSERT INTO rooms (id, name, description, created_at)
         VALUES ($1,$2,$3,$4)
         RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub(crate) async fn count_references(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exam_submissions WHERE room_id = $1")
        .bind(id)
        .fetch_one(executor)
        .await
}

pub(crate) async fn delete_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM rooms WHERE id = $1").bind(id).execute(executor).await?;
    Ok(result.rows_affected())
}
