//! Wordweave is a collaborative word weave.
//!
//! Visitors each contribute a short word at a random normalized position with
//! a golden-ratio-spaced color; every viewer polls the shared collection and
//! renders it as one polyline in creation order.
//!
//! - Read path: [`SnapshotStore`] → [`Poller`] → [`Reconciler`] → [`WeaveView`]
//! - Write path: [`ContributionFlow`] → [`SnapshotStore`], then a forced
//!   reconciliation
//! - Per-client quota: [`QuotaGuard`] over a swappable [`KeyValueStore`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod color;
/// Session configuration.
pub mod config;
pub(crate) mod flow;
pub(crate) mod model;
pub(crate) mod quota;
/// CPU weave rendering and export.
pub mod render;
/// One assembled client session.
pub mod session;
pub(crate) mod store;
pub(crate) mod sync;

pub use crate::foundation::core::{Affine, Point, Rgba8, SurfaceSize};
pub use crate::foundation::error::{WeaveError, WeaveResult};

pub use crate::color::css::{HslColor, parse_css_color};
pub use crate::color::sequencer::{ColorSequencer, GOLDEN_RATIO_CONJUGATE};
pub use crate::config::WeaveConfig;
pub use crate::flow::contribution::{ContributionFlow, DEFAULT_NOTICE_TTL, InputState, Notice};
pub use crate::model::placement::{MAX_TEXT_CHARS, WordPlacement, validate_text};
pub use crate::model::snapshot::Snapshot;
pub use crate::model::stats::{SnapshotStats, WordCount};
pub use crate::quota::guard::{DEFAULT_MAX_SUBMISSIONS, DEFAULT_QUOTA_KEY, QuotaGuard};
pub use crate::quota::kv::{FileKv, KeyValueStore, MemoryKv};
pub use crate::render::backend::{DEFAULT_BACKGROUND, FrameRGBA, WeaveBackend, WeaveStyle};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::export::export_png;
pub use crate::render::labels::{LABEL_SIZE_PX, LabelFont};
pub use crate::render::weave::{WeaveSegment, weave_segments};
pub use crate::session::WeaveSession;
pub use crate::store::SnapshotStore;
pub use crate::store::http::{ADMIN_PASSWORD_HEADER, HttpStore};
pub use crate::store::memory::{MemoryStore, StoreCalls};
pub use crate::store::server::{StoreState, router, serve};
pub use crate::sync::poller::{
    DEFAULT_POLL_INTERVAL, PollHandle, PollOutcome, Poller, SharedView, reconcile_cycle,
};
pub use crate::sync::reconcile::{ReconcileOutcome, Reconciler, reconcile};
pub use crate::sync::view::WeaveView;
