use super::*;
use crate::{
    foundation::core::SurfaceSize, model::placement::WordPlacement, render::cpu::CpuBackend,
    store::memory::MemoryStore,
};

fn shared_view() -> SharedView {
    Arc::new(Mutex::new(
        WeaveView::new(Box::new(CpuBackend::default()), SurfaceSize::new(16.0, 16.0)).unwrap(),
    ))
}

fn word(text: &str) -> WordPlacement {
    WordPlacement::new(text, 0.3, 0.6, "hsl(90, 80%, 60%)")
}

#[tokio::test]
async fn poll_once_replaces_then_settles() {
    let store = MemoryStore::new();
    store.push(word("a"));
    store.push(word("b"));
    let poller = Poller::new(store.clone(), shared_view(), DEFAULT_POLL_INTERVAL);

    assert_eq!(poller.poll_once().await, PollOutcome::Replaced);
    assert_eq!(poller.poll_once().await, PollOutcome::Unchanged);
    assert_eq!(poller.view().lock().await.renders(), 1);

    store.push(word("c"));
    assert_eq!(poller.poll_once().await, PollOutcome::Replaced);
    assert_eq!(poller.view().lock().await.snapshot().len(), 3);
}

#[tokio::test]
async fn fetch_failure_is_swallowed_and_keeps_cache() {
    let store = MemoryStore::new();
    store.push(word("a"));
    let poller = Poller::new(store.clone(), shared_view(), DEFAULT_POLL_INTERVAL);
    poller.poll_once().await;

    store.fail_fetches(Some("connection refused"));
    assert_eq!(poller.poll_once().await, PollOutcome::Failed);
    assert_eq!(poller.view().lock().await.snapshot().len(), 1);

    store.fail_fetches(None);
    store.push(word("b"));
    assert_eq!(poller.poll_once().await, PollOutcome::Replaced);
}

#[tokio::test(start_paused = true)]
async fn spawned_loop_runs_on_fixed_cadence_until_cancelled() {
    let store = MemoryStore::new();
    store.push(word("a"));
    let view = shared_view();
    let handle = Poller::new(store.clone(), view.clone(), Duration::from_millis(1500)).spawn();

    tokio::time::sleep(Duration::from_millis(3100)).await;
    assert_eq!(handle.cycles(), 3);
    assert_eq!(store.calls().fetches, 3);
    assert_eq!(view.lock().await.snapshot().len(), 1);

    handle.cancel();
    tokio::time::sleep(Duration::from_millis(10_000)).await;
    assert!(handle.is_finished());
    assert_eq!(store.calls().fetches, 3);
}

#[tokio::test(start_paused = true)]
async fn loop_keeps_running_through_failures() {
    let store = MemoryStore::new();
    store.fail_fetches(Some("offline"));
    let handle = Poller::new(store.clone(), shared_view(), Duration::from_millis(100)).spawn();

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(handle.cycles(), 3);
    drop(handle);

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(store.calls().fetches, 3);
}
