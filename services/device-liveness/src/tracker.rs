//! Handle binding a shared registry to a clock

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::key::DeviceKey;
use crate::registry::{DeviceStatus, LivenessSummary, RegistryHandle};

/// Cloneable handle passed to every component that reports or reads liveness
#[derive(Debug, Clone)]
pub struct LivenessTracker {
    registry: RegistryHandle,
    clock: Arc<dyn Clock>,
}

impl LivenessTracker {
    pub fn new(registry: RegistryHandle) -> Self {
        Self::with_clock(registry, Arc::new(SystemClock))
    }

    pub fn with_clock(registry: RegistryHandle, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    pub fn registry(&self) -> &RegistryHandle {
        &self.registry
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn record_activity(&self, area_id: &str, system_type: &str) {
        self.record(&DeviceKey::new(area_id, system_type));
    }

    pub fn record(&self, key: &DeviceKey) {
        let now_ms = self.clock.now_ms();
        self.registry.write().record_activity(key, now_ms);
    }

    pub fn is_online(&self, area_id: &str, system_type: &str) -> bool {
        let key = DeviceKey::new(area_id, system_type);
        let now_ms = self.clock.now_ms();
        self.registry.read().is_online(&key, now_ms)
    }

    pub fn raw_status(&self, area_id: &str, system_type: &str) -> bool {
        let key = DeviceKey::new(area_id, system_type);
        self.registry.read().raw_status(&key)
    }

    /// Run one sweep pass now, returning the number of demoted entries
    pub fn sweep(&self) -> usize {
        let now_ms = self.clock.now_ms();
        self.registry.write().sweep(now_ms)
    }

    pub fn status(&self, key: &DeviceKey) -> DeviceStatus {
        let now_ms = self.clock.now_ms();
        self.registry.read().status(key, now_ms)
    }

    pub fn snapshot(&self) -> Vec<DeviceStatus> {
        let now_ms = self.clock.now_ms();
        self.registry.read().snapshot(now_ms)
    }

    pub fn summary(&self) -> LivenessSummary {
        let now_ms = self.clock.now_ms();
        self.registry.read().summary(now_ms)
    }
}
