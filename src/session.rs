use std::{path::Path, sync::Arc};

use tokio::sync::Mutex;

use crate::{
    config::WeaveConfig,
    foundation::{core::SurfaceSize, error::WeaveResult},
    flow::contribution::ContributionFlow,
    quota::{guard::QuotaGuard, kv::KeyValueStore},
    render::export::export_png,
    store::SnapshotStore,
    sync::{
        poller::{PollHandle, Poller, SharedView},
        view::WeaveView,
    },
};

/// One client session: a rendered view kept in sync by a poller and fed by
/// a contribution flow, all sharing the same store and view.
pub struct WeaveSession<S, K> {
    view: SharedView,
    poller: Poller<S>,
    flow: ContributionFlow<S, K>,
}

impl<S, K> WeaveSession<S, K>
where
    S: SnapshotStore,
    K: KeyValueStore,
{
    pub fn new(config: &WeaveConfig, store: S, kv: K, surface: SurfaceSize) -> WeaveResult<Self> {
        config.validate()?;
        let backend = config.backend()?;
        let view: SharedView = Arc::new(Mutex::new(WeaveView::new(Box::new(backend), surface)?));
        let quota = QuotaGuard::new(kv, config.quota_key.clone(), config.max_submissions);

        let poller = Poller::new(store.clone(), view.clone(), config.poll_interval());
        let flow = ContributionFlow::new(store, view.clone(), quota)
            .with_max_text_chars(config.max_text_chars)
            .with_notice_ttl(config.notice_ttl());

        Ok(Self { view, poller, flow })
    }

    pub fn view(&self) -> &SharedView {
        &self.view
    }

    pub fn poller(&self) -> &Poller<S> {
        &self.poller
    }

    pub fn flow(&self) -> &ContributionFlow<S, K> {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut ContributionFlow<S, K> {
        &mut self.flow
    }

    /// Start the background poll loop. Dropping the handle stops it.
    pub fn start_polling(&self) -> PollHandle {
        self.poller.clone().spawn()
    }

    /// Render the cached snapshot on an opaque background and write a PNG.
    pub async fn export_png(&self, path: &Path) -> WeaveResult<()> {
        let frame = self.view.lock().await.export_frame()?;
        export_png(&frame, path)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session/session.rs"]
mod tests;
