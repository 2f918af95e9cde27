//! Background tasks for the hotline server.
//!
//! Currently one task: sweeping expired audio artifacts. Call audio is only
//! needed while the provider plays it back, so artifacts past the configured
//! TTL are deleted instead of accumulating forever.

use hotline_store::ArtifactStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Starts the artifact sweep task.
///
/// Runs indefinitely, deleting artifacts older than `ttl_seconds` on each
/// pass. A TTL of zero disables eviction entirely.
pub async fn start_artifact_sweep_task(store: Arc<ArtifactStore>, ttl_seconds: u64) {
    if ttl_seconds == 0 {
        tracing::warn!("artifact sweep disabled (ttl=0), audio cache will grow unbounded");
        return;
    }

    // Sweep every 60 seconds or ttl/2, whichever is smaller (but min 1s).
    let interval_seconds = (ttl_seconds / 2).clamp(1, 60);
    let interval = Duration::from_secs(interval_seconds);
    let max_age = Duration::from_secs(ttl_seconds);

    tracing::info!(ttl_seconds, interval_seconds, "starting artifact sweep task");

    loop {
        sleep(interval).await;

        match store.sweep_older_than(max_age).await {
            Ok(0) => {
                tracing::debug!("no expired artifacts to sweep");
            }
            Ok(count) => {
                tracing::info!(count, "swept expired audio artifacts");
            }
            Err(e) => {
                tracing::error!(error = %e, "artifact sweep failed");
            }
        }
    }
}
