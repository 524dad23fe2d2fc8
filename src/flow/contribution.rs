use std::time::Duration;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tokio::time::Instant;

use crate::{
    color::sequencer::ColorSequencer,
    foundation::error::{WeaveError, WeaveResult},
    model::placement::{MAX_TEXT_CHARS, WordPlacement, validate_text},
    quota::{guard::QuotaGuard, kv::KeyValueStore},
    store::SnapshotStore,
    sync::poller::{SharedView, reconcile_cycle},
};

/// How long a submission failure stays visible.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(4);

/// Transient inline message shown to the contributor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub expires_at: Instant,
}

/// State of the contribution input.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    pub enabled: bool,
    pub value: String,
    notice: Option<Notice>,
}

impl InputState {
    /// Current notice, unless it already expired.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|n| Instant::now() < n.expires_at)
    }
}

/// Write path: validate, place, color, submit, count, reconcile.
pub struct ContributionFlow<S, K> {
    store: S,
    view: SharedView,
    sequencer: ColorSequencer,
    quota: QuotaGuard<K>,
    input: InputState,
    max_text_chars: usize,
    notice_ttl: Duration,
    rng: StdRng,
}

impl<S, K> ContributionFlow<S, K>
where
    S: SnapshotStore,
    K: KeyValueStore,
{
    /// Input starts enabled only if the persisted counter still allows it.
    pub fn new(store: S, view: SharedView, quota: QuotaGuard<K>) -> Self {
        let input = InputState {
            enabled: quota.can_submit(),
            ..InputState::default()
        };
        Self {
            store,
            view,
            sequencer: ColorSequencer::new(),
            quota,
            input,
            max_text_chars: MAX_TEXT_CHARS,
            notice_ttl: DEFAULT_NOTICE_TTL,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_sequencer(mut self, sequencer: ColorSequencer) -> Self {
        self.sequencer = sequencer;
        self
    }

    pub fn with_max_text_chars(mut self, max_text_chars: usize) -> Self {
        self.max_text_chars = max_text_chars;
        self
    }

    pub fn with_notice_ttl(mut self, notice_ttl: Duration) -> Self {
        self.notice_ttl = notice_ttl;
        self
    }

    /// Deterministic placement, for reproducible sessions.
    pub fn with_position_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &SharedView {
        &self.view
    }

    pub fn quota(&self) -> &QuotaGuard<K> {
        &self.quota
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn notice(&self) -> Option<&str> {
        self.input.notice().map(|n| n.message.as_str())
    }

    pub fn remaining(&self) -> u32 {
        self.quota.remaining()
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input.value = value.into();
    }

    /// Submit whatever is currently typed.
    pub async fn submit_input(&mut self) -> WeaveResult<WordPlacement> {
        let raw = self.input.value.clone();
        self.submit(&raw).await
    }

    /// Contribute one word.
    ///
    /// Invalid text and an exhausted quota fail before any store call. On a
    /// store failure the message becomes a transient notice; on success the
    /// counter advances and one reconciliation runs immediately. A counter
    /// that could not be persisted still holds for this session and is
    /// reported through [`ContributionFlow::notice`].
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn submit(&mut self, raw: &str) -> WeaveResult<WordPlacement> {
        let text = validate_text(raw, self.max_text_chars)?;
        if let Err(e) = self.quota.check() {
            self.input.enabled = false;
            return Err(e);
        }

        self.input.enabled = false;
        let word = WordPlacement::new(
            text,
            self.rng.gen_range(0.0..1.0),
            self.rng.gen_range(0.0..1.0),
            self.sequencer.next_color().to_string(),
        );

        if let Err(e) = self.store.append(&word).await {
            let message = match e {
                WeaveError::SubmissionFailed(msg) => msg,
                other => other.to_string(),
            };
            tracing::warn!(error = %message, "submission failed");
            self.input.notice = Some(Notice {
                message: message.clone(),
                expires_at: Instant::now() + self.notice_ttl,
            });
            self.input.enabled = self.quota.can_submit();
            return Err(WeaveError::SubmissionFailed(message));
        }

        self.input.value.clear();
        match self.quota.record_submission() {
            Ok(used) => tracing::info!(
                text = %word.text,
                used,
                remaining = self.quota.remaining(),
                "word submitted"
            ),
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist quota counter");
                self.input.notice = Some(Notice {
                    message: format!("word added, but the contribution count was not saved: {e}"),
                    expires_at: Instant::now() + self.notice_ttl,
                });
            }
        }
        self.input.enabled = self.quota.can_submit();

        reconcile_cycle(&self.store, &self.view).await;
        Ok(word)
    }

    /// Administrative clear of the whole collection.
    ///
    /// Local state is only touched once the store confirmed the clear.
    pub async fn reset(&mut self, admin_password: &str) -> WeaveResult<()> {
        if let Err(e) = self.store.clear(admin_password).await {
            tracing::warn!(error = %e, "reset rejected");
            return Err(match e {
                WeaveError::ResetFailed(_) => e,
                other => WeaveError::reset_failed(other.to_string()),
            });
        }

        self.quota.clear()?;
        self.view.lock().await.clear()?;
        self.input.enabled = true;
        self.input.notice = None;
        tracing::info!("weave reset");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flow/contribution.rs"]
mod tests;
