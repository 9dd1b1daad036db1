//! In-memory liveness registry keyed by area and system type

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::key::DeviceKey;

/// Default window within which activity counts as online
pub const DEFAULT_ONLINE_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Default age after which a sweep clears the stored online flag
pub const DEFAULT_STALE_WINDOW: Duration = Duration::from_secs(10 * 60);

/// Last known liveness of one device stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessEntry {
    pub is_online: bool,
    pub last_activity_epoch_ms: Option<u64>,
}

/// Point-in-time view of one entry, as reported to consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub area_id: String,
    pub system_type: String,
    pub online: bool,
    pub raw_online: bool,
    pub last_activity_epoch_ms: Option<u64>,
}

/// Online/offline counts across every tracked key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LivenessSummary {
    pub tracked: usize,
    pub online: usize,
    pub offline: usize,
}

/// Registry of liveness entries.
///
/// Entries are created on first activity and never removed, so memory grows
/// with the number of distinct keys, not with event volume.
#[derive(Debug)]
pub struct LivenessRegistry {
    entries: HashMap<DeviceKey, LivenessEntry>,
    online_window_ms: u64,
    stale_window_ms: u64,
}

impl Default for LivenessRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ONLINE_WINDOW, DEFAULT_STALE_WINDOW)
    }
}

impl LivenessRegistry {
    pub fn new(online_window: Duration, stale_window: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            online_window_ms: saturating_ms(online_window),
            stale_window_ms: saturating_ms(stale_window),
        }
    }

    pub fn online_window(&self) -> Duration {
        Duration::from_millis(self.online_window_ms)
    }

    pub fn stale_window(&self) -> Duration {
        Duration::from_millis(self.stale_window_ms)
    }

    /// Record that the device for `key` was just heard from
    pub fn record_activity(&mut self, key: &DeviceKey, now_ms: u64) {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.is_online = true;
                // Never move backwards if the wall clock steps back.
                entry.last_activity_epoch_ms =
                    Some(entry.last_activity_epoch_ms.map_or(now_ms, |t| t.max(now_ms)));
            }
            None => {
                tracing::debug!("First activity for '{}'", key);
                self.entries.insert(
                    key.clone(),
                    LivenessEntry {
                        is_online: true,
                        last_activity_epoch_ms: Some(now_ms),
                    },
                );
            }
        }
    }

    /// Whether the device for `key` is online at `now_ms`.
    ///
    /// Recency wins over the stored flag. Unknown keys are offline.
    pub fn is_online(&self, key: &DeviceKey, now_ms: u64) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| self.evaluate(entry, now_ms))
    }

    /// The stored flag, without the recency check
    pub fn raw_status(&self, key: &DeviceKey) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.is_online)
    }

    pub fn entry(&self, key: &DeviceKey) -> Option<&LivenessEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear the stored flag on every entry idle for longer than the stale
    /// window. Returns how many entries went from online to offline.
    pub fn sweep(&mut self, now_ms: u64) -> usize {
        let stale_window_ms = self.stale_window_ms;
        let mut demoted = 0;
        for (key, entry) in self.entries.iter_mut() {
            let Some(last) = entry.last_activity_epoch_ms else {
                continue;
            };
            if now_ms.saturating_sub(last) > stale_window_ms {
                if entry.is_online {
                    tracing::debug!("Marking '{}' offline after {} ms idle", key, now_ms - last);
                    demoted += 1;
                }
                entry.is_online = false;
            }
        }
        demoted
    }

    /// Status of a single key, including keys never seen
    pub fn status(&self, key: &DeviceKey, now_ms: u64) -> DeviceStatus {
        let entry = self.entries.get(key);
        DeviceStatus {
            area_id: key.area_id.clone(),
            system_type: key.system_type.clone(),
            online: entry.is_some_and(|e| self.evaluate(e, now_ms)),
            raw_online: entry.is_some_and(|e| e.is_online),
            last_activity_epoch_ms: entry.and_then(|e| e.last_activity_epoch_ms),
        }
    }

    /// Status of every tracked key, ordered by key
    pub fn snapshot(&self, now_ms: u64) -> Vec<DeviceStatus> {
        let mut keys: Vec<&DeviceKey> = self.entries.keys().collect();
        keys.sort();
        keys.into_iter().map(|k| self.status(k, now_ms)).collect()
    }

    pub fn summary(&self, now_ms: u64) -> LivenessSummary {
        let tracked = self.entries.len();
        let online = self
            .entries
            .values()
            .filter(|e| self.evaluate(e, now_ms))
            .count();
        LivenessSummary {
            tracked,
            online,
            offline: tracked - online,
        }
    }

    fn evaluate(&self, entry: &LivenessEntry, now_ms: u64) -> bool {
        match entry.last_activity_epoch_ms {
            Some(last) => now_ms.saturating_sub(last) < self.online_window_ms,
            None => entry.is_online,
        }
    }
}

/// Milliseconds in `d`, clamped to `u64::MAX`
pub(crate) fn saturating_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Thread-safe registry handle. The lock is never held across an await.
pub type RegistryHandle = Arc<RwLock<LivenessRegistry>>;

pub fn new_registry_handle(online_window: Duration, stale_window: Duration) -> RegistryHandle {
    Arc::new(RwLock::new(LivenessRegistry::new(
        online_window,
        stale_window,
    )))
}
