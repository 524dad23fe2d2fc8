pub(crate) mod placement;
pub(crate) mod snapshot;
pub(crate) mod stats;
