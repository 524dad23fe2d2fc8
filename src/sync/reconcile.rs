use crate::model::snapshot::Snapshot;

/// Decision of one reconciliation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub should_update: bool,
}

/// Whether `remote` should replace `local`.
///
/// `remote` wins when it is non-empty and either its newest-entry marker is
/// strictly greater or the sizes differ. The store is append-only, so a stale
/// remote is a subset of `local` and at worst a harmless overwrite.
pub fn reconcile(local: &Snapshot, remote: &Snapshot) -> ReconcileOutcome {
    let should_update =
        !remote.is_empty() && (remote.marker() > local.marker() || remote.len() != local.len());
    ReconcileOutcome { should_update }
}

/// Holds the locally cached snapshot and replaces it wholesale.
#[derive(Clone, Debug, Default)]
pub struct Reconciler {
    local: Snapshot,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn local(&self) -> &Snapshot {
        &self.local
    }

    /// Replace the cache with `remote` when [`reconcile`] says so.
    pub fn apply(&mut self, remote: Snapshot) -> ReconcileOutcome {
        let outcome = reconcile(&self.local, &remote);
        if outcome.should_update {
            tracing::info!(
                from = self.local.len(),
                to = remote.len(),
                "snapshot replaced"
            );
            self.local = remote;
        }
        outcome
    }

    /// Forget everything; only used after an administrative clear.
    pub fn reset(&mut self) {
        self.local = Snapshot::empty();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/reconcile.rs"]
mod tests;
