pub(crate) mod poller;
pub(crate) mod reconcile;
pub(crate) mod view;
