use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::core::time::primitive_now_utc;
use crate::db::types::AccountRole;
use crate::repositories;
use crate::schemas::room::{RoomCreate, RoomResponse};
use crate::services::caller::Caller;
use crate::services::errors::{is_unique_violation, ServiceError};

const NAME_UNIQUE: &str = "ux_rooms_name_lower";

pub(crate) async fn list(pool: &PgPool) -> Result<Vec<RoomResponse>, ServiceError> {
    let rooms = repositories::rooms::list(pool).await?;
    Ok(rooms.into_iter().map(RoomResponse::from_db).collect())
}

pub(crate) async fn create(
    pool: &PgPool,
    caller: &Caller,
    input: RoomCreate,
) -> Result<RoomResponse, ServiceError> {
    caller.require(AccountRole::Admin)?;
    input.validate().map_err(|errors| ServiceError::from_validation(&errors))?;

    let name = input.name.trim();
    if name.is_empty() {
        return Err(ServiceError::field("name", "name must not be blank"));
    }
    if repositories::rooms::exists_by_name(pool, name).await? {
        return Err(ServiceError::Conflict(format!("Room '{name}' already exists")));
    }

    let description = input.description.as_deref().map(str::trim).filter(|value| !value.is_empty());
    let id = Uuid::new_v4().to_string();
    let room = repositories::rooms::create(pool, &id, name, description, primitive_now_utc())
        .await
        .map_err(|err| {
            if is_unique_violation(&err, NAME_UNIQUE) {
                ServiceError::Conflict(format!("Room '{name}' already exists"))
            } else {
                ServiceError::Store(err)
            }
        })?;

    tracing::info!(
        admin_id = %caller.account_id,
        room_id = %room.id,
        action = "create_room",
        "Room created"
    );

    Ok(RoomResponse::from_db(room))
}

/// Refused while any submission is scheduled in the room.
pub(crate) async fn delete(
    pool: &PgPool,
    caller: &Caller,
    room_id: &str,
) -> Result<(), ServiceError> {
    caller.require(AccountRole::Admin)?;

    let mut tx = pool.begin().await?;

    repositories::rooms::find_by_id(&mut *tx, room_id)
        .await?
        .ok_or(ServiceError::NotFound("Room"))?;

    let references = repositories::rooms::count_references(&mut *tx, room_id).await?;
    if references > 0 {
        return Err(ServiceError::Conflict(format!(
            "Room is used by {references} scheduled exam(s)"
        )));
    }

    repositories::rooms::delete_by_id(&mut *tx, room_id).await.map_err(|err| {
        let referenced = matches!(
            &err,
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation()
        );
        if referenced {
            ServiceError::Conflict("Room is used by a scheduled exam".to_string())
        } else {
            ServiceError::Store(err)
        }
    })?;
    tx.commit().await?;

    tracing::info!(
        admin_id = %caller.account_id,
        room_id = %room_id,
        action = "delete_room",
        "Room deleted"
    );

    Ok(())
}
