//! BDD step definitions for the liveness registry feature

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when};

use device_liveness::registry::new_registry_handle;
use device_liveness::LivenessTracker;

use crate::world::LivenessWorld;

fn tracker(world: &LivenessWorld) -> &LivenessTracker {
    world.tracker.as_ref().expect("registry not set up")
}

#[given(expr = "a liveness registry with a {int} second online window and a {int} second stale window")]
fn registry_with_windows(world: &mut LivenessWorld, online: u64, stale: u64) {
    let registry = new_registry_handle(Duration::from_secs(online), Duration::from_secs(stale));
    world.tracker = Some(LivenessTracker::with_clock(
        registry,
        Arc::new(world.clock.clone()),
    ));
}

#[given(expr = "the clock reads {int} seconds")]
fn clock_starts_at(world: &mut LivenessWorld, seconds: u64) {
    world.clock.set_ms(seconds * 1000);
}

#[when(expr = "the clock reads {int} seconds")]
fn clock_moves_to(world: &mut LivenessWorld, seconds: u64) {
    world.clock.set_ms(seconds * 1000);
}

#[when(expr = "activity is recorded for {string} {string}")]
fn activity_recorded(world: &mut LivenessWorld, area_id: String, system_type: String) {
    tracker(world).record_activity(&area_id, &system_type);
}

#[when("a sweep runs")]
fn sweep_runs(world: &mut LivenessWorld) {
    tracker(world).sweep();
}

#[then(expr = "{string} {string} should be online")]
fn should_be_online(world: &mut LivenessWorld, area_id: String, system_type: String) {
    assert!(
        tracker(world).is_online(&area_id, &system_type),
        "Expected {}/{} to be online",
        area_id,
        system_type
    );
}

#[then(expr = "{string} {string} should be offline")]
fn should_be_offline(world: &mut LivenessWorld, area_id: String, system_type: String) {
    assert!(
        !tracker(world).is_online(&area_id, &system_type),
        "Expected {}/{} to be offline",
        area_id,
        system_type
    );
}

#[then(expr = "the stored flag for {string} {string} should be {word}")]
fn stored_flag(
    world: &mut LivenessWorld,
    area_id: String,
    system_type: String,
    expected: String,
) {
    let expected: bool = expected.parse().expect("expected true or false");
    assert_eq!(
        tracker(world).raw_status(&area_id, &system_type),
        expected
    );
}

#[then(expr = "the registry should track {int} device(s)")]
fn registry_tracks(world: &mut LivenessWorld, count: usize) {
    assert_eq!(tracker(world).summary().tracked, count);
}

#[then(expr = "the summary should show {int} tracked, {int} online and {int} offline")]
fn summary_shows(world: &mut LivenessWorld, tracked: usize, online: usize, offline: usize) {
    let summary = tracker(world).summary();
    assert_eq!(summary.tracked, tracked);
    assert_eq!(summary.online, online);
    assert_eq!(summary.offline, offline);
}
