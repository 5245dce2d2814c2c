use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Router,
};
use serde::Serialize;

use crate::api::errors::{ApiOk, ApiResult};
use crate::api::extract::Payload;
use crate::api::guards::CurrentCaller;
use crate::core::revalidate::ResourcePath;
use crate::core::state::AppState;
use crate::schemas::room::{RoomCreate, RoomResponse};
use crate::services::rooms;

#[derive(Debug, Serialize)]
pub(crate) struct RoomDeleted {
    id: String,
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rooms).post(create_room))
        .route("/:room_id", delete(delete_room))
}

async fn list_rooms(
    CurrentCaller(_caller): CurrentCaller,
    State(state): State<AppState>,
) -> ApiResult<Vec<RoomResponse>> {
    Ok(ApiOk::ok(rooms::list(state.db()).await?))
}

async fn create_room(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Payload(payload): Payload<RoomCreate>,
) -> ApiResult<RoomResponse> {
    let room = rooms::create(state.db(), &caller, payload).await?;
    state.revalidator().revalidate(&[ResourcePath::Rooms]).await;
    Ok(ApiOk::created(room))
}

async fn delete_room(
    CurrentCaller(caller): CurrentCaller,
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> ApiResult<RoomDeleted> {
    rooms::delete(state.db(), &caller, &room_id).await?;
    state.revalidator().revalidate(&[ResourcePath::Rooms]).await;
    Ok(ApiOk::ok(RoomDeleted { id: room_id }))
}
