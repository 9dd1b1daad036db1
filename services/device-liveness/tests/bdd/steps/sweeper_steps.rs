//! BDD step definitions for the sweeper feature

use std::time::Duration;

use cucumber::{given, then, when};
use tokio_util::sync::CancellationToken;

use device_liveness::sweeper::spawn_sweeper;

use crate::world::LivenessWorld;

#[given(expr = "a sweeper running every {int} milliseconds")]
fn sweeper_running(world: &mut LivenessWorld, interval_ms: u64) {
    let tracker = world.tracker.clone().expect("registry not set up");
    let cancel = CancellationToken::new();
    let guard = spawn_sweeper(tracker, Duration::from_millis(interval_ms), &cancel)
        .expect("failed to start sweeper");
    world.sweeper = Some(guard);
    world.cancel = Some(cancel);
}

#[when(expr = "the sweeper has had {int} milliseconds to run")]
async fn sweeper_has_run(_world: &mut LivenessWorld, ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[when("the sweeper is stopped")]
async fn sweeper_stopped(world: &mut LivenessWorld) {
    let guard = world.sweeper.take().expect("no sweeper running");
    guard.stop().await;
}

#[when("the owning token is cancelled")]
fn owner_cancelled(world: &mut LivenessWorld) {
    world.cancel.as_ref().expect("no token").cancel();
}

#[then("the sweeper should have finished")]
fn sweeper_finished(world: &mut LivenessWorld) {
    let guard = world.sweeper.as_ref().expect("no sweeper running");
    assert!(guard.is_finished());
}
