use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::Room;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct RoomCreate {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub(crate) name: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub(crate) description: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RoomResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) created_at: String,
}

impl RoomResponse {
    pub(crate) fn from_db(room: Room) -> Self {
        Self {
            id: room.id,
            name: room.name,
            description: room.description,
            created_at: format_primitive(room.created_at),
        }
    }
}
