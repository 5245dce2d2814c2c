use sqlx::{PgPool, Postgres, QueryBuilder};
use time::PrimitiveDateTime;

use crate::db::models::Account;
use crate::db::types::AccountRole;

pub(crate) const COLUMNS: &str = "\
    id, full_name, role, id_number, program, department, phone, email, \
    supervisor_id, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct FacultyOption {
    pub(crate) id: String,
    pub(crate) full_name: String,
}

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!("SELECT {COLUMNS} FROM accounts WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Locks the account row for the rest of the transaction.
pub(crate) async fn find_by_id_for_update(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        "SELECT {COLUMNS} FROM accounts WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub(crate) async fn find_by_id_number(
    pool: &PgPool,
    id_number: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!("SELECT {COLUMNS} FROM accounts WHERE id_number = $1"))
        .bind(id_number)
        .fetch_optional(pool)
        .await
}

/// Id of the account holding `id_number`, ignoring `except_id`.
pub(crate) async fn id_number_owner(
    pool: &PgPool,
    id_number: &str,
    except_id: Option<&str>,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT id FROM accounts WHERE id_number = $1 AND ($2::varchar IS NULL OR id <> $2)",
    )
    .bind(id_number)
    .bind(except_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn role_of(pool: &PgPool, id: &str) -> Result<Option<AccountRole>, sqlx::Error> {
    sqlx::query_scalar::<_, AccountRole>("SELECT role FROM accounts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Subset of `ids` that belong to FACULTY accounts.
pub(crate) async fn faculty_ids_among(
    executor: impl sqlx::PgExecutor<'_>,
    ids: &[String],
) -> Result<Vec<String>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_scalar::<_, String>("SELECT id FROM accounts WHERE id = ANY($1) AND role = $2")
        .bind(ids)
        .bind(AccountRole::Faculty)
        .fetch_all(executor)
        .await
}

pub(crate) async fn list_faculty(pool: &PgPool) -> Result<Vec<FacultyOption>, sqlx::Error> {
    sqlx::query_as::<_, FacultyOption>(
        "SELECT id, full_name FROM accounts WHERE role = $1 ORDER BY full_name, id",
    )
    .bind(AccountRole::Faculty)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list(
    pool: &PgPool,
    role: Option<AccountRole>,
    offset: i64,
    limit: i64,
) -> Result<Vec<Account>, sqlx::Error> {
    let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM accounts"));
    if let Some(role) = role {
        builder.push(" WHERE role = ");
        builder.push_bind(role);
    }
    builder.push(" ORDER BY created_at DESC, id OFFSET ");
    builder.push_bind(offset);
    builder.push(" LIMIT ");
    builder.push_bind(limit);

    builder.build_query_as::<Account>().fetch_all(pool).await
}

pub(crate) async fn count(pool: &PgPool, role: Option<AccountRole>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM accounts WHERE ($1::account_role IS NULL OR role = $1)",
    )
    .bind(role)
    .fetch_one(pool)
    .await
}

pub(crate) struct CreateAccount<'a> {
    pub(crate) id: &'a str,
    pub(crate) full_name: &'a str,
    pub(crate) role: AccountRole,
    pub(crate) id_number: Option<&'a str>,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    pool: &PgPool,
    params: CreateAccount<'_>,
) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        "INSERT INTO accounts (id, full_name, role, id_number, created_at, updated_at)
         VALUES ($1,$2,$3,$4,$5,$5)
         RETURNING {COLUMNS}"
    ))
    .bind(params.id)
    .bind(params.full_name)
    .bind(params.role)
    .bind(params.id_number)
    .bind(params.created_at)
    .fetch_one(pool)
    .await
}

/// Full replacement of the self-service profile fields.
pub(crate) struct UpdateProfile<'a> {
    pub(crate) full_name: &'a str,
    pub(crate) id_number: Option<&'a str>,
    pub(crate) program: Option<&'a str>,
    pub(crate) department: Option<&'a str>,
    pub(crate) phone: Option<&'a str>,
    pub(crate) email: Option<&'a str>,
    pub(crate) supervisor_id: Option<&'a str>,
    pub(crate) updated_at: PrimitiveDateTime,
}

pub(crate) async fn update_profile(
    pool: &PgPool,
    id: &str,
    params: UpdateProfile<'_>,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        "UPDATE accounts SET
            full_name = $1,
            id_number = $2,
            program = $3,
            department = $4,
            phone = $5,
            email = $6,
            supervisor_id = $7,
            updated_at = $8
         WHERE id = $9
         RETURNING {COLUMNS}"
    ))
    .bind(params.full_name)
    .bind(params.id_number)
    .bind(params.program)
    .bind(params.department)
    .bind(params.phone)
    .bind(params.email)
    .bind(params.supervisor_id)
    .bind(params.updated_at)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn clear_supervisor_for_students(
    executor: impl sqlx::PgExecutor<'_>,
    faculty_id: &str,
    now: PrimitiveDateTime,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE accounts SET supervisor_id = NULL, updated_at = $1
         WHERE role = $2 AND supervisor_id = $3",
    )
    .bind(now)
    .bind(AccountRole::Student)
    .bind(faculty_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn delete_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM accounts WHERE id = $1").bind(id).execute(executor).await?;
    Ok(result.rows_affected())
}
