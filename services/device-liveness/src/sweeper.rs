//! Periodic sweep job with scoped cancellation

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::tracker::LivenessTracker;

/// Owns a running sweep job. Dropping the guard stops the job.
#[derive(Debug)]
pub struct SweeperGuard {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl SweeperGuard {
    /// Stop the job and wait for it to finish
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }
}

impl Drop for SweeperGuard {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Start sweeping `tracker` every `interval`.
///
/// The first pass runs one full interval after start. The job ends when the
/// returned guard is dropped or stopped, or when `parent` is cancelled.
pub fn spawn_sweeper(
    tracker: LivenessTracker,
    interval: Duration,
    parent: &CancellationToken,
) -> crate::Result<SweeperGuard> {
    if interval.is_zero() {
        return Err(crate::LivenessError::Config(
            "sweep interval must be greater than zero".to_string(),
        ));
    }
    let cancel = parent.child_token();
    let task_cancel = cancel.clone();
    let first_tick = tokio::time::Instant::now() + interval;
    let handle = tokio::spawn(async move {
        sweep_loop(tracker, first_tick, interval, task_cancel).await;
    });
    Ok(SweeperGuard {
        cancel,
        handle: Some(handle),
    })
}

async fn sweep_loop(
    tracker: LivenessTracker,
    first_tick: tokio::time::Instant,
    interval: Duration,
    cancel: CancellationToken,
) {
    tracing::debug!("Sweeper started with interval {:?}", interval);
    let mut ticker = tokio::time::interval_at(first_tick, interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let demoted = tracker.sweep();
                if demoted > 0 {
                    tracing::info!("Sweep marked {} device(s) offline", demoted);
                } else {
                    tracing::debug!("Sweep found nothing to demote");
                }
            }
            _ = cancel.cancelled() => {
                tracing::debug!("Sweeper cancelled");
                break;
            }
        }
    }
}
