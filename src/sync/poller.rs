use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{sync::Mutex, task::JoinHandle};

use crate::{store::SnapshotStore, sync::view::WeaveView};

/// View shared between the polling loop and the contribution flow.
pub type SharedView = Arc<Mutex<WeaveView>>;

/// Default delay between the end of one poll and the start of the next.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Result of one fetch-and-reconcile cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// The cached snapshot was replaced and re-rendered.
    Replaced,
    /// The fetched snapshot was not newer.
    Unchanged,
    /// Fetch or render failed; logged and swallowed.
    Failed,
}

/// One full fetch-and-reconcile cycle.
///
/// The view lock is only taken after the fetch settled, so a cycle never
/// blocks a concurrent submission while waiting on the network.
pub async fn reconcile_cycle<S: SnapshotStore>(store: &S, view: &SharedView) -> PollOutcome {
    let remote = match store.fetch().await {
        Ok(remote) => remote,
        Err(e) => {
            tracing::warn!(error = %e, "poll fetch failed");
            return PollOutcome::Failed;
        }
    };

    let fetched = remote.len();
    match view.lock().await.apply(remote) {
        Ok(true) => PollOutcome::Replaced,
        Ok(false) => {
            tracing::debug!(fetched, "snapshot unchanged");
            PollOutcome::Unchanged
        }
        Err(e) => {
            tracing::warn!(error = %e, "weave render failed");
            PollOutcome::Failed
        }
    }
}

/// Fixed-cadence polling of a [`SnapshotStore`].
#[derive(Clone)]
pub struct Poller<S> {
    store: S,
    view: SharedView,
    interval: Duration,
}

impl<S: SnapshotStore> Poller<S> {
    pub fn new(store: S, view: SharedView, interval: Duration) -> Self {
        Self {
            store,
            view,
            interval,
        }
    }

    pub fn view(&self) -> &SharedView {
        &self.view
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run exactly one cycle.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn poll_once(&self) -> PollOutcome {
        reconcile_cycle(&self.store, &self.view).await
    }

    /// Start the loop on the current tokio runtime.
    ///
    /// The first cycle runs immediately; each following cycle starts
    /// `interval` after the previous one settled, so at most one fetch is
    /// ever outstanding.
    pub fn spawn(self) -> PollHandle {
        let cycles = Arc::new(AtomicU64::new(0));
        let counter = cycles.clone();
        let task = tokio::spawn(async move {
            loop {
                self.poll_once().await;
                counter.fetch_add(1, Ordering::Relaxed);
                tokio::time::sleep(self.interval).await;
            }
        });
        PollHandle { task, cycles }
    }
}

/// Owns a running poll loop. Dropping the handle stops the loop.
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
    cycles: Arc<AtomicU64>,
}

impl PollHandle {
    /// Cycles completed so far.
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/poller.rs"]
mod tests;
