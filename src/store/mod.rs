//! Snapshot store: the authoritative, append-only collection of placements.
//!
//! Client logic only depends on [`SnapshotStore`]. [`http::HttpStore`] talks
//! to a remote store over HTTP, [`memory::MemoryStore`] keeps the collection
//! in process, and [`server`] exposes a `MemoryStore` over the same HTTP
//! contract.

use std::future::Future;

use crate::{
    foundation::error::WeaveResult,
    model::{placement::WordPlacement, snapshot::Snapshot},
};

pub(crate) mod http;
pub(crate) mod memory;
pub(crate) mod server;

/// Append and full-read access to the shared collection.
///
/// Implementations are cheap to clone; clones share the same collection.
pub trait SnapshotStore: Clone + Send + Sync + 'static {
    /// Read the whole collection, newest-first.
    fn fetch(&self) -> impl Future<Output = WeaveResult<Snapshot>> + Send;

    /// Append one placement. The store assigns ordering.
    fn append(&self, word: &WordPlacement) -> impl Future<Output = WeaveResult<()>> + Send;

    /// Administrative, irreversible clear of the whole collection.
    fn clear(&self, admin_password: &str) -> impl Future<Output = WeaveResult<()>> + Send;
}

pub(crate) fn unix_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
