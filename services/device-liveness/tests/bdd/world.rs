//! BDD test world for device liveness service

use device_liveness::clock::ManualClock;
use device_liveness::sweeper::SweeperGuard;
use device_liveness::LivenessTracker;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default, cucumber::World)]
pub struct LivenessWorld {
    pub clock: ManualClock,
    pub tracker: Option<LivenessTracker>,

    // Sweeper testing
    pub cancel: Option<CancellationToken>,
    pub sweeper: Option<SweeperGuard>,

    // Lifecycle testing
    pub lifecycle_result: Option<device_liveness::Result<()>>,
}
