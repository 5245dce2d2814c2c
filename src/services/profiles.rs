use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::core::time::primitive_now_utc;
use crate::db::models::Account;
use crate::db::types::AccountRole;
use crate::repositories;
use crate::repositories::accounts::{CreateAccount, UpdateProfile};
use crate::schemas::account::{
    AccountCreate, AccountResponse, FacultyOptionResponse, ProfileResponse, ProfileUpdate,
};
use crate::schemas::page::{PageRequest, Paginated};
use crate::services::caller::Caller;
use crate::services::errors::ServiceError;

const ID_NUMBER_UNIQUE: &str = "accounts_id_number_key";

/// Profile fields a student needs before filing a submission, in display order.
pub(crate) fn missing_profile_fields(account: &Account) -> Vec<&'static str> {
    let blank = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());

    let mut missing = Vec::new();
    if account.full_name.trim().is_empty() {
        missing.push("full_name");
    }
    if blank(&account.id_number) {
        missing.push("id_number");
    }
    if blank(&account.program) {
        missing.push("program");
    }
    if blank(&account.department) {
        missing.push("department");
    }
    if blank(&account.supervisor_id) {
        missing.push("supervisor_id");
    }
    if blank(&account.phone) {
        missing.push("phone");
    }
    if blank(&account.email) {
        missing.push("email");
    }
    missing
}

fn profile_response(account: Account) -> ProfileResponse {
    // Only students file submissions, so completeness is judged against their fields.
    let missing_fields = match account.role {
        AccountRole::Student => missing_profile_fields(&account),
        AccountRole::Faculty | AccountRole::Admin => Vec::new(),
    };
    ProfileResponse {
        profile_complete: missing_fields.is_empty(),
        missing_fields,
        account: AccountResponse::from_db(account),
    }
}

pub(crate) async fn get_own(
    pool: &PgPool,
    caller: &Caller,
) -> Result<ProfileResponse, ServiceError> {
    let account = repositories::accounts::find_by_id(pool, &caller.account_id)
        .await?
        .ok_or(ServiceError::NotFound("Account"))?;
    Ok(profile_response(account))
}

pub(crate) async fn update_own(
    pool: &PgPool,
    caller: &Caller,
    input: ProfileUpdate,
) -> Result<ProfileResponse, ServiceError> {
    input.validate().map_err(|errors| ServiceError::from_validation(&errors))?;

    let trimmed = |value: &Option<String>| {
        value.as_deref().map(str::trim).filter(|value| !value.is_empty()).map(str::to_string)
    };
    let id_number = trimmed(&input.id_number);
    let supervisor_id = trimmed(&input.supervisor_id);

    let supervisor_id = match caller.role {
        AccountRole::Student => supervisor_id,
        AccountRole::Faculty | AccountRole::Admin if supervisor_id.is_some() => {
            return Err(ServiceError::field(
                "supervisor_id",
                "only students can choose a supervisor",
            ));
        }
        AccountRole::Faculty | AccountRole::Admin => None,
    };

    if let Some(supervisor_id) = supervisor_id.as_deref() {
        let role = repositories::accounts::role_of(pool, supervisor_id).await?;
        if role != Some(AccountRole::Faculty) {
            return Err(ServiceError::field(
                "supervisor_id",
                "supervisor_id must reference a faculty account",
            ));
        }
    }

    if let Some(id_number) = id_number.as_deref() {
        let owner =
            repositories::accounts::id_number_owner(pool, id_number, Some(&caller.account_id))
                .await?;
        if owner.is_some() {
            return Err(ServiceError::Conflict(
                "id_number is already registered to another account".to_string(),
            ));
        }
    }

    let program = trimmed(&input.program);
    let department = trimmed(&input.department);
    let phone = trimmed(&input.phone);
    let email = trimmed(&input.email);

    let updated = repositories::accounts::update_profile(
        pool,
        &caller.account_id,
        UpdateProfile {
            full_name: input.full_name.trim(),
            id_number: id_number.as_deref(),
            program: program.as_deref(),
            department: department.as_deref(),
            phone: phone.as_deref(),
            email: email.as_deref(),
            supervisor_id: supervisor_id.as_deref(),
            updated_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(map_id_number_conflict)?
    .ok_or(ServiceError::NotFound("Account"))?;

    tracing::info!(account_id = %caller.account_id, action = "update_profile", "Profile updated");

    Ok(profile_response(updated))
}

pub(crate) async fn create_account(
    pool: &PgPool,
    caller: &Caller,
    input: AccountCreate,
) -> Result<AccountResponse, ServiceError> {
    caller.require(AccountRole::Admin)?;
    input.validate().map_err(|errors| ServiceError::from_validation(&errors))?;

    let id_number = input.id_number.as_deref().map(str::trim).filter(|value| !value.is_empty());
    if let Some(id_number) = id_number {
        if repositories::accounts::id_number_owner(pool, id_number, None).await?.is_some() {
            return Err(ServiceError::Conflict(
                "id_number is already registered to another account".to_string(),
            ));
        }
    }

    let id = Uuid::new_v4().to_string();
    let account = repositories::accounts::create(
        pool,
        CreateAccount {
            id: &id,
            full_name: input.full_name.trim(),
            role: input.role,
            id_number,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(map_id_number_conflict)?;

    tracing::info!(
        admin_id = %caller.account_id,
        account_id = %account.id,
        role = account.role.as_str(),
        action = "create_account",
        "Account created"
    );

    Ok(AccountResponse::from_db(account))
}

pub(crate) async fn list_accounts(
    pool: &PgPool,
    caller: &Caller,
    role: Option<AccountRole>,
    page: PageRequest,
) -> Result<Paginated<AccountResponse>, ServiceError> {
    caller.require(AccountRole::Admin)?;

    let accounts = repositories::accounts::list(pool, role, page.offset(), page.limit).await?;
    let total = repositories::accounts::count(pool, role).await?;

    Ok(Paginated::new(accounts, total, page).map(AccountResponse::from_db))
}

pub(crate) async fn list_faculty(
    pool: &PgPool,
) -> Result<Vec<FacultyOptionResponse>, ServiceError> {
    let faculty = repositories::accounts::list_faculty(pool).await?;
    Ok(faculty
        .into_iter()
        .map(|option| FacultyOptionResponse { id: option.id, full_name: option.full_name })
        .collect())
}

fn map_id_number_conflict(err: sqlx::Error) -> ServiceError {
    if crate::services::errors::is_unique_violation(&err, ID_NUMBER_UNIQUE) {
        ServiceError::Conflict("id_number is already registered to another account".to_string())
    } else {
        ServiceError::Store(err)
    }
}
