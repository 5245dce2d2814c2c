pub(crate) mod accounts;
pub(crate) mod errors;
pub(crate) mod extract;
pub(crate) mod guards;
pub(crate) mod handlers;
pub(crate) mod notifications;
pub(crate) mod pagination;
pub(crate) mod rooms;
pub(crate) mod router;
pub(crate) mod statistics;
pub(crate) mod submissions;
