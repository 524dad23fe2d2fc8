use crate::{
    foundation::error::{WeaveError, WeaveResult},
    quota::kv::KeyValueStore,
};

/// Key the submission counter is persisted under.
pub const DEFAULT_QUOTA_KEY: &str = "userWordCount";
/// Lifetime contributions allowed per client.
pub const DEFAULT_MAX_SUBMISSIONS: u32 = 2;

/// Persisted per-client contribution counter.
///
/// The limit is lifetime, not time-windowed. The counter only moves after a
/// store-acknowledged submission and only the administrative reset clears it.
/// Submissions recorded in this process count even if persisting them failed.
#[derive(Debug)]
pub struct QuotaGuard<K> {
    kv: K,
    key: String,
    limit: u32,
    recorded: u32,
}

impl<K: KeyValueStore> QuotaGuard<K> {
    pub fn new(kv: K, key: impl Into<String>, limit: u32) -> Self {
        Self {
            kv,
            key: key.into(),
            limit,
            recorded: 0,
        }
    }

    pub fn with_defaults(kv: K) -> Self {
        Self::new(kv, DEFAULT_QUOTA_KEY, DEFAULT_MAX_SUBMISSIONS)
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Successful submissions recorded so far. Absent or unreadable reads as 0.
    pub fn used(&self) -> u32 {
        self.persisted().max(self.recorded)
    }

    fn persisted(&self) -> u32 {
        match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(key = %self.key, value = %raw, "unparseable quota counter");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "quota counter unreadable");
                0
            }
        }
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used())
    }

    pub fn can_submit(&self) -> bool {
        self.used() < self.limit
    }

    /// Fail with [`WeaveError::QuotaExceeded`] once the limit is reached.
    pub fn check(&self) -> WeaveResult<()> {
        let used = self.used();
        if used >= self.limit {
            return Err(WeaveError::QuotaExceeded {
                used,
                limit: self.limit,
            });
        }
        Ok(())
    }

    /// Count one acknowledged submission; returns the new total.
    ///
    /// On a persistence error the submission still counts for the rest of
    /// this process; only a reload would forget it.
    pub fn record_submission(&mut self) -> WeaveResult<u32> {
        let next = self.used().saturating_add(1);
        self.recorded = next;
        self.kv.set(&self.key, &next.to_string())?;
        tracing::debug!(used = next, limit = self.limit, "submission recorded");
        Ok(next)
    }

    pub fn clear(&mut self) -> WeaveResult<()> {
        self.kv.remove(&self.key)?;
        self.recorded = 0;
        Ok(())
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }
}

#[cfg(test)]
#[path = "../../tests/unit/quota/guard.rs"]
mod tests;
