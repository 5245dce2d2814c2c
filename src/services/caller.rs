use crate::db::types::AccountRole;
use crate::services::errors::ServiceError;

/// Identity resolved from the session, passed explicitly into every operation.
#[derive(Debug, Clone)]
pub(crate) struct Caller {
    pub(crate) account_id: String,
    pub(crate) role: AccountRole,
}

impl Caller {
    pub(crate) fn new(account_id: impl Into<String>, role: AccountRole) -> Self {
        Self { account_id: account_id.into(), role }
    }

    pub(crate) fn require(&self, role: AccountRole) -> Result<(), ServiceError> {
        if self.role == role {
            return Ok(());
        }

        Err(ServiceError::Forbidden(match role {
            AccountRole::Student => "Student access required",
            AccountRole::Faculty => "Faculty access required",
            AccountRole::Admin => "Admin access required",
        }))
    }
}
