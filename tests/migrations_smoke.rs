use sqlx::Row;

fn database_url() -> String {
    dotenvy::dotenv().ok();

    if let Ok(url) = std::env::var("DATABASE_URL") {
        if !url.trim().is_empty() {
            return url;
        }
    }

    let server = std::env::var("POSTGRES_SERVER").unwrap_or_else(|_| "localhost".into());
    let port = std::env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".into());
    let user = std::env::var("POSTGRES_USER").unwrap_or_else(|_| "sidang".into());
    let password = std::env::var("POSTGRES_PASSWORD").unwrap_or_default();
    let db = std::env::var("POSTGRES_DB").unwrap_or_else(|_| "sidang_db".into());

    format!("postgresql://{user}:{password}@{server}:{port}/{db}")
}

async fn migrated_pool() -> anyhow::Result<sqlx::PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url())
        .await?;

    let migrations_dir =
        std::env::var("SIDANG_MIGRATIONS_DIR").unwrap_or_else(|_| "migrations".to_string());
    let migrator = sqlx::migrate::Migrator::new(std::path::Path::new(&migrations_dir)).await?;
    migrator.run(&pool).await?;
    Ok(pool)
}

#[tokio::test]
async fn migrations_apply_and_tables_exist() -> anyhow::Result<()> {
    let pool = migrated_pool().await?;

    for relation in [
        "accounts",
        "rooms",
        "exam_submissions",
        "examiner_assignments",
        "ux_exam_submissions_active_student",
        "ux_rooms_name_lower",
    ] {
        let row =
            sqlx::query("SELECT to_regclass($1)::text").bind(relation).fetch_one(&pool).await?;
        let regclass: Option<String> = row.try_get(0)?;
        assert!(regclass.is_some(), "expected {relation} to exist after migrations");
    }

    Ok(())
}

#[tokio::test]
async fn schedule_columns_are_tied_to_status() -> anyhow::Result<()> {
    let pool = migrated_pool().await?;
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO accounts (id, full_name, role, created_at, updated_at)
         VALUES ('smoke-student', 'Smoke', 'STUDENT', now(), now())",
    )
    .execute(&mut *tx)
    .await?;

    let scheduled_without_room = sqlx::query(
        "INSERT INTO exam_submissions (id, title, document_ref, status, student_id, exam_date,
                                       start_time, end_time, created_at, updated_at)
         VALUES ('smoke-sub', 'T', 'doc', 'SCHEDULED', 'smoke-student', '2025-06-01',
                 '09:00', '10:00', now(), now())",
    )
    .execute(&mut *tx)
    .await;
    let err = scheduled_without_room.expect_err("check constraint should reject");
    assert!(
        err.as_database_error()
            .and_then(|db| db.constraint())
            .is_some_and(|name| name == "ck_exam_submissions_schedule"),
        "unexpected error: {err}"
    );

    tx.rollback().await?;
    Ok(())
}
