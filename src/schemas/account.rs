use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::Account;
use crate::db::types::AccountRole;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ProfileUpdate {
    #[serde(alias = "fullName")]
    #[validate(length(min = 1, max = 255, message = "full_name must be 1-255 characters"))]
    pub(crate) full_name: String,
    #[serde(default)]
    #[serde(alias = "idNumber")]
    #[validate(length(min = 4, max = 32, message = "id_number must be 4-32 characters"))]
    pub(crate) id_number: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "program must be 1-255 characters"))]
    pub(crate) program: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "department must be 1-255 characters"))]
    pub(crate) department: Option<String>,
    #[serde(default)]
    #[validate(length(min = 6, max = 32, message = "phone must be 6-32 characters"))]
    pub(crate) phone: Option<String>,
    #[serde(default)]
    #[validate(email(message = "email must be a valid address"))]
    pub(crate) email: Option<String>,
    #[serde(default)]
    #[serde(alias = "supervisorId")]
    pub(crate) supervisor_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct AccountCreate {
    #[serde(alias = "fullName")]
    #[validate(length(min = 1, max = 255, message = "full_name must be 1-255 characters"))]
    pub(crate) full_name: String,
    pub(crate) role: AccountRole,
    #[serde(default)]
    #[serde(alias = "idNumber")]
    #[validate(length(min = 4, max = 32, message = "id_number must be 4-32 characters"))]
    pub(crate) id_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AccountResponse {
    pub(crate) id: String,
    pub(crate) full_name: String,
    pub(crate) role: AccountRole,
    pub(crate) id_number: Option<String>,
    pub(crate) program: Option<String>,
    pub(crate) department: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) supervisor_id: Option<String>,
    pub(crate) created_at: String,
}

impl AccountResponse {
    pub(crate) fn from_db(account: Account) -> Self {
        Self {
            id: account.id,
            full_name: account.full_name,
            role: account.role,
            id_number: account.id_number,
            program: account.program,
            department: account.department,
            phone: account.phone,
            email: account.email,
            supervisor_id: account.supervisor_id,
            created_at: format_primitive(account.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ProfileResponse {
    #[serde(flatten)]
    pub(crate) account: AccountResponse,
    pub(crate) profile_complete: bool,
    pub(crate) missing_fields: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FacultyOptionResponse {
    pub(crate) id: String,
    pub(crate) full_name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AccountRemovalResponse {
    pub(crate) account_id: String,
    pub(crate) role: AccountRole,
    pub(crate) removed_submissions: u64,
    pub(crate) removed_examiner_links: u64,
    pub(crate) detached_students: u64,
    pub(crate) detached_submissions: u64,
}
