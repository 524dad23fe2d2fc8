use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    foundation::error::{WeaveError, WeaveResult},
    model::{placement::WordPlacement, snapshot::Snapshot},
    store::{SnapshotStore, unix_millis},
};

/// In-process store shared by clones.
///
/// Keeps entries in append order and serves them newest-first. Timestamps
/// are wall-clock milliseconds forced to be strictly increasing so the
/// newest-entry marker always advances. Call counters and failure switches
/// let callers observe which operations reached the store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    words: Vec<WordPlacement>,
    last_timestamp: u64,
    admin_password: Option<String>,
    fail_fetch: Option<String>,
    fail_append: Option<String>,
    fetches: usize,
    appends: usize,
    clears: usize,
}

/// Number of calls each operation received.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub fetches: usize,
    pub appends: usize,
    pub clears: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `password` for [`SnapshotStore::clear`].
    pub fn with_admin_password(self, password: impl Into<String>) -> Self {
        self.lock().admin_password = Some(password.into());
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append regardless of failure switches; returns the stored entry.
    pub fn push(&self, word: WordPlacement) -> WordPlacement {
        let mut inner = self.lock();
        let ts = unix_millis().max(inner.last_timestamp + 1);
        inner.last_timestamp = ts;
        let stored = WordPlacement {
            timestamp: Some(ts),
            ..word
        };
        inner.words.push(stored.clone());
        stored
    }

    /// Current contents, newest-first, without counting as a fetch.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.lock().words.iter().rev().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.lock().words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn calls(&self) -> StoreCalls {
        let inner = self.lock();
        StoreCalls {
            fetches: inner.fetches,
            appends: inner.appends,
            clears: inner.clears,
        }
    }

    /// Make every fetch fail with `msg` until cleared with `None`.
    pub fn fail_fetches(&self, msg: Option<&str>) {
        self.lock().fail_fetch = msg.map(str::to_owned);
    }

    /// Make every append fail with `msg` until cleared with `None`.
    pub fn fail_appends(&self, msg: Option<&str>) {
        self.lock().fail_append = msg.map(str::to_owned);
    }
}

impl SnapshotStore for MemoryStore {
    async fn fetch(&self) -> WeaveResult<Snapshot> {
        let mut inner = self.lock();
        inner.fetches += 1;
        if let Some(msg) = &inner.fail_fetch {
            return Err(WeaveError::fetch_failed(msg.clone()));
        }
        Ok(Snapshot::new(inner.words.iter().rev().cloned().collect()))
    }

    async fn append(&self, word: &WordPlacement) -> WeaveResult<()> {
        {
            let mut inner = self.lock();
            inner.appends += 1;
            if let Some(msg) = &inner.fail_append {
                return Err(WeaveError::submission_failed(msg.clone()));
            }
        }
        self.push(word.clone());
        Ok(())
    }

    async fn clear(&self, admin_password: &str) -> WeaveResult<()> {
        let mut inner = self.lock();
        inner.clears += 1;
        if let Some(expected) = &inner.admin_password
            && expected != admin_password
        {
            return Err(WeaveError::reset_failed("access denied"));
        }
        inner.words.clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/memory.rs"]
mod tests;
