use std::collections::HashMap;

use serde::Serialize;

pub(crate) mod account;
pub(crate) mod notification;
pub(crate) mod page;
pub(crate) mod room;
pub(crate) mod statistics;
pub(crate) mod submission;

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) service: String,
    pub(crate) status: String,
    pub(crate) components: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RootResponse {
    pub(crate) message: String,
    pub(crate) version: String,
}
