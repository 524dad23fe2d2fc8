use super::*;

fn word(text: &str) -> WordPlacement {
    WordPlacement::new(text, 0.2, 0.4, "hsl(30, 80%, 60%)")
}

#[tokio::test]
async fn fetch_returns_newest_first_with_increasing_timestamps() {
    let store = MemoryStore::new();
    store.append(&word("a")).await.unwrap();
    store.append(&word("b")).await.unwrap();

    let snap = store.fetch().await.unwrap();
    let texts: Vec<&str> = snap.iter().map(|w| w.text.as_str()).collect();
    assert_eq!(texts, ["b", "a"]);
    assert!(snap.as_slice()[0].timestamp > snap.as_slice()[1].timestamp);
    assert_eq!(
        store.calls(),
        StoreCalls {
            fetches: 1,
            appends: 2,
            clears: 0
        }
    );
}

#[tokio::test]
async fn injected_failures_map_to_taxonomy() {
    let store = MemoryStore::new();
    store.fail_fetches(Some("offline"));
    store.fail_appends(Some("full"));

    assert!(matches!(store.fetch().await, Err(WeaveError::FetchFailed(m)) if m == "offline"));
    assert!(matches!(
        store.append(&word("x")).await,
        Err(WeaveError::SubmissionFailed(m)) if m == "full"
    ));
    assert!(store.is_empty());

    store.fail_fetches(None);
    assert!(store.fetch().await.unwrap().is_empty());
}

#[tokio::test]
async fn clear_checks_admin_password() {
    let store = MemoryStore::new().with_admin_password("secret");
    store.push(word("keep"));

    assert!(matches!(
        store.clear("wrong").await,
        Err(WeaveError::ResetFailed(_))
    ));
    assert_eq!(store.len(), 1);

    store.clear("secret").await.unwrap();
    assert!(store.is_empty());
}

#[test]
fn clones_share_the_collection() {
    let a = MemoryStore::new();
    let b = a.clone();
    a.push(word("shared"));
    assert_eq!(b.snapshot().len(), 1);
}
