use super::*;
use shared::domain::SubscriptionStatus;
use tokio::time::Instant;

fn instant_store(seed: User) -> InMemoryUserStore {
    InMemoryUserStore::with_latency(seed, Duration::ZERO)
}

#[tokio::test]
async fn fresh_store_holds_default_seed() {
    let store = InMemoryUserStore::seeded();
    assert_eq!(
        store.snapshot().await,
        User::new("John Doe", SubscriptionStatus::Premium)
    );
    assert_eq!(store.latency(), DEFAULT_LATENCY);
}

#[tokio::test]
async fn set_replaces_record_and_reports_success() {
    let store = instant_store(User::default_seed());
    let ok = store
        .set(User::new("John Doe", SubscriptionStatus::Free))
        .await
        .expect("set");
    assert!(ok);
    assert_eq!(
        store.get().await.expect("get"),
        User::new("John Doe", SubscriptionStatus::Free)
    );
}

#[tokio::test]
async fn clones_share_the_same_slot() {
    let store = instant_store(User::default_seed());
    let other = store.clone();
    other
        .set(User::new("Jane", SubscriptionStatus::Free))
        .await
        .expect("set");
    assert_eq!(store.snapshot().await.name, "Jane");
}

#[tokio::test]
async fn separate_stores_do_not_share_state() {
    let first = instant_store(User::default_seed());
    let second = instant_store(User::default_seed());
    first
        .set(User::new("Jane", SubscriptionStatus::Free))
        .await
        .expect("set");
    assert_eq!(second.snapshot().await, User::default_seed());
}

#[tokio::test]
async fn arc_wrapped_store_forwards_calls() {
    let store: Arc<dyn UserStore> = Arc::new(instant_store(User::default_seed()));
    assert!(store
        .set(User::new("Jane", SubscriptionStatus::Premium))
        .await
        .expect("set"));
    assert_eq!(store.get().await.expect("get").name, "Jane");
}

#[tokio::test(start_paused = true)]
async fn get_and_set_each_wait_for_latency() {
    let store =
        InMemoryUserStore::with_latency(User::default_seed(), Duration::from_millis(500));

    let started = Instant::now();
    store.get().await.expect("get");
    assert!(started.elapsed() >= Duration::from_millis(500));

    let started = Instant::now();
    store
        .set(User::new("John Doe", SubscriptionStatus::Free))
        .await
        .expect("set");
    assert!(started.elapsed() >= Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn snapshot_skips_latency() {
    let store = InMemoryUserStore::seeded();
    let started = Instant::now();
    store.snapshot().await;
    assert_eq!(started.elapsed(), Duration::ZERO);
}
