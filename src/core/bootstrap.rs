use uuid::Uuid;

use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::AccountRole;
use crate::repositories;
use crate::repositories::accounts::CreateAccount;

/// Makes sure the configured first admin exists, so a fresh deployment has someone who can
/// create the remaining accounts.
pub(crate) async fn ensure_first_admin(state: &AppState) -> anyhow::Result<()> {
    let admin = state.settings().admin();
    let id_number = admin.first_admin_id_number.trim();
    if id_number.is_empty() {
        tracing::warn!("FIRST_ADMIN_ID_NUMBER not configured; skipping admin bootstrap");
        return Ok(());
    }

    if let Some(account) = repositories::accounts::find_by_id_number(state.db(), id_number).await? {
        if account.role != AccountRole::Admin {
            anyhow::bail!(
                "account {} holding FIRST_ADMIN_ID_NUMBER is {}, not ADMIN",
                account.id,
                account.role.as_str()
            );
        }
        tracing::info!(account_id = %account.id, "First admin already present");
        return Ok(());
    }

    let id = Uuid::new_v4().to_string();
    repositories::accounts::create(
        state.db(),
        CreateAccount {
            id: &id,
            full_name: admin.first_admin_name.trim(),
            role: AccountRole::Admin,
            id_number: Some(id_number),
            created_at: primitive_now_utc(),
        },
    )
    .await?;

    tracing::info!(account_id = %id, "Created first admin account");
    Ok(())
}
