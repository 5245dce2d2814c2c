pub(crate) mod accounts;
pub(crate) mod examiners;
pub(crate) mod rooms;
pub(crate) mod submissions;
pub(crate) mod workload;
