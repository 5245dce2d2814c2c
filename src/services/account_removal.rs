//! Account deletion. Student data has no meaning without the student and is removed with it;
//! exam records and student profiles outlive a faculty member, who is only unlinked.

use sqlx::PgPool;

use crate::core::metrics;
use crate::core::time::primitive_now_utc;
use crate::db::types::AccountRole;
use crate::repositories;
use crate::schemas::account::AccountRemovalResponse;
use crate::services::caller::Caller;
use crate::services::errors::ServiceError;

pub(crate) async fn delete_account(
    pool: &PgPool,
    caller: &Caller,
    account_id: &str,
) -> Result<AccountRemovalResponse, ServiceError> {
    caller.require(AccountRole::Admin)?;
    if account_id == caller.account_id {
        return Err(ServiceError::Forbidden("Admins cannot delete their own account"));
    }

    let role = repositories::accounts::role_of(pool, account_id)
        .await?
        .ok_or(ServiceError::NotFound("Account"))?;

    let report = match role {
        AccountRole::Student => remove_student(pool, account_id).await?,
        AccountRole::Faculty => remove_faculty(pool, account_id).await?,
        AccountRole::Admin => remove_admin(pool, account_id).await?,
    };

    metrics::record_account_removal(role.as_str());
    tracing::info!(
        admin_id = %caller.account_id,
        account_id = %account_id,
        role = role.as_str(),
        removed_submissions = report.removed_submissions,
        removed_examiner_links = report.removed_examiner_links,
        detached_students = report.detached_students,
        detached_submissions = report.detached_submissions,
        action = "delete_account",
        "Account deleted"
    );

    Ok(report)
}

/// Examiner links of the student's submissions, then the submissions, then the account.
pub(crate) async fn remove_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<AccountRemovalResponse, ServiceError> {
    let mut tx = pool.begin().await?;
    lock_account(&mut tx, student_id, AccountRole::Student).await?;

    let removed_examiner_links =
        repositories::examiners::delete_for_student(&mut *tx, student_id).await?;
    let removed_submissions =
        repositories::submissions::delete_for_student(&mut *tx, student_id).await?;
    repositories::accounts::delete_by_id(&mut *tx, student_id).await?;

    tx.commit().await?;

    Ok(AccountRemovalResponse {
        account_id: student_id.to_string(),
        role: AccountRole::Student,
        removed_submissions,
        removed_examiner_links,
        detached_students: 0,
        detached_submissions: 0,
    })
}

/// Drops the faculty's examiner links and clears every supervisor reference to them,
/// keeping the submissions and student accounts.
pub(crate) async fn remove_faculty(
    pool: &PgPool,
    faculty_id: &str,
) -> Result<AccountRemovalResponse, ServiceError> {
    let mut tx = pool.begin().await?;
    lock_account(&mut tx, faculty_id, AccountRole::Faculty).await?;

    let removed_examiner_links =
        repositories::examiners::delete_for_examiner(&mut *tx, faculty_id).await?;
    let detached_students = repositories::accounts::clear_supervisor_for_students(
        &mut *tx,
        faculty_id,
        primitive_now_utc(),
    )
    .await?;
    let detached_submissions =
        repositories::submissions::clear_supervisor(&mut *tx, faculty_id).await?;
    repositories::accounts::delete_by_id(&mut *tx, faculty_id).await?;

    tx.commit().await?;

    Ok(AccountRemovalResponse {
        account_id: faculty_id.to_string(),
        role: AccountRole::Faculty,
        removed_submissions: 0,
        removed_examiner_links,
        detached_students,
        detached_submissions,
    })
}

async fn remove_admin(
    pool: &PgPool,
    admin_id: &str,
) -> Result<AccountRemovalResponse, ServiceError> {
    let mut tx = pool.begin().await?;
    lock_account(&mut tx, admin_id, AccountRole::Admin).await?;
    repositories::accounts::delete_by_id(&mut *tx, admin_id).await?;
    tx.commit().await?;

    Ok(AccountRemovalResponse {
        account_id: admin_id.to_string(),
        role: AccountRole::Admin,
        removed_submissions: 0,
        removed_examiner_links: 0,
        detached_students: 0,
        detached_submissions: 0,
    })
}

async fn lock_account(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    account_id: &str,
    expected: AccountRole,
) -> Result<(), ServiceError> {
    let account = repositories::accounts::find_by_id_for_update(&mut **tx, account_id)
        .await?
        .ok_or(ServiceError::NotFound("Account"))?;

    if account.role != expected {
        return Err(ServiceError::Conflict(format!(
            "Account is {}, not {}",
            account.role.as_str(),
            expected.as_str()
        )));
    }
    Ok(())
}
