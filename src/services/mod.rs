pub(crate) mod account_removal;
pub(crate) mod caller;
pub(crate) mod errors;
pub(crate) mod listings;
pub(crate) mod notifications;
pub(crate) mod profiles;
pub(crate) mod rooms;
pub(crate) mod submissions;
pub(crate) mod transitions;
pub(crate) mod workload;
