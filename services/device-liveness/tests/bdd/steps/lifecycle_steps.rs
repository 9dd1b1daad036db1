//! BDD step definitions for the service lifecycle feature

use cucumber::{given, then, when};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use device_liveness::config::{ApiConfig, Config};
use device_liveness::LivenessError;

use crate::world::LivenessWorld;

fn api_disabled_config() -> Config {
    Config {
        api: ApiConfig {
            enabled: false,
            ..ApiConfig::default()
        },
        ..Config::default()
    }
}

async fn run_service(world: &mut LivenessWorld, config: Config) {
    let cancel = world.cancel.take().unwrap_or_default();
    let clock = Arc::new(world.clock.clone());
    world.lifecycle_result = Some(device_liveness::run_until(config, clock, cancel).await);
}

#[given("a pre-cancelled cancellation token")]
fn pre_cancelled_token(world: &mut LivenessWorld) {
    let token = CancellationToken::new();
    token.cancel();
    world.cancel = Some(token);
}

#[when("the service runs with the API disabled")]
async fn service_runs(world: &mut LivenessWorld) {
    run_service(world, api_disabled_config()).await;
}

#[when("the service runs with a zero sweep interval")]
async fn service_runs_zero_interval(world: &mut LivenessWorld) {
    let mut config = api_disabled_config();
    config.registry.sweep_interval_seconds = 0;
    run_service(world, config).await;
}

#[when("the service runs with an oversized online window")]
async fn service_runs_oversized_window(world: &mut LivenessWorld) {
    let mut config = api_disabled_config();
    config.registry.online_window_seconds = u64::MAX;
    run_service(world, config).await;
}

#[then("the service should stop successfully")]
fn service_stopped(world: &mut LivenessWorld) {
    let result = world.lifecycle_result.as_ref().expect("service did not run");
    assert!(result.is_ok(), "Expected clean stop, got {:?}", result);
}

#[then("the service should fail with a configuration error")]
fn service_config_error(world: &mut LivenessWorld) {
    let result = world.lifecycle_result.as_ref().expect("service did not run");
    assert!(
        matches!(result, Err(LivenessError::Config(_))),
        "Expected configuration error, got {:?}",
        result
    );
}
