use hotline_server::background::start_artifact_sweep_task;
use hotline_store::{ArtifactStore, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

// ttl=0 disables the sweep: the task returns instead of looping forever.
#[tokio::test]
async fn zero_ttl_disables_the_sweep_task() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(ArtifactStore::new(dir.path()).unwrap());
    let name = store.put(b"keep me").await.unwrap();

    let disabled = timeout(
        Duration::from_millis(100),
        start_artifact_sweep_task(store.clone(), 0),
    )
    .await;
    assert!(disabled.is_ok());

    // Nothing was evicted.
    assert_eq!(store.get(&name).await.unwrap(), b"keep me");
}

// With a 1s TTL the cadence clamps to 1s, so an artifact older than the TTL
// disappears within a few sweep passes.
#[tokio::test]
async fn sweep_task_evicts_expired_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(ArtifactStore::new(dir.path()).unwrap());
    let name = store.put(b"stale audio").await.unwrap();

    tokio::spawn(start_artifact_sweep_task(store.clone(), 1));

    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if matches!(store.get(&name).await, Err(StoreError::NotFound(_))) {
            return;
        }
    }
    panic!("expired artifact was never swept");
}
