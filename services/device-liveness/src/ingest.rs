//! Activity ingest: turns upstream change notifications into registry updates

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::key::DeviceKey;
use crate::tracker::LivenessTracker;

/// One observed data-change notification for a device stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub area_id: String,
    pub system_type: String,
}

impl ActivityEvent {
    pub fn new(area_id: impl Into<String>, system_type: impl Into<String>) -> Self {
        Self {
            area_id: area_id.into(),
            system_type: system_type.into(),
        }
    }

    pub fn key(&self) -> DeviceKey {
        DeviceKey::new(self.area_id.clone(), self.system_type.clone())
    }
}

/// Sending side handed to upstream subscriptions
#[derive(Debug, Clone)]
pub struct ActivityFeed {
    tx: mpsc::Sender<ActivityEvent>,
}

impl ActivityFeed {
    /// Create a feed and the receiver to pass to [`run_ingest`]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ActivityEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Queue an event, waiting for room if the channel is full
    pub async fn report(&self, event: ActivityEvent) -> crate::Result<()> {
        self.tx
            .send(event)
            .await
            .map_err(|e| crate::LivenessError::Api(format!("Ingest closed, dropped {:?}", e.0)))
    }
}

/// Record one activity per received event until the channel closes or
/// `cancel` fires. Returns the number of events recorded.
pub async fn run_ingest(
    mut rx: mpsc::Receiver<ActivityEvent>,
    tracker: LivenessTracker,
    cancel: CancellationToken,
) -> u64 {
    let mut recorded = 0;
    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else {
                    tracing::debug!("Activity feed closed");
                    break;
                };
                tracing::debug!("Activity from '{}'", event.key());
                tracker.record(&event.key());
                recorded += 1;
            }
            _ = cancel.cancelled() => {
                tracing::debug!("Ingest cancelled");
                break;
            }
        }
    }
    recorded
}
