//! Device liveness - tracks whether warehouse devices are online
//!
//! Records activity per area and system type, answers liveness queries from
//! recency, and periodically sweeps stale entries offline.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod ingest;
pub mod key;
pub mod registry;
pub mod sweeper;
pub mod tracker;

pub use config::{load_config, Config};
pub use error::{LivenessError, Result};
pub use key::DeviceKey;
pub use tracker::LivenessTracker;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::clock::{Clock, SystemClock};
use crate::ingest::ActivityFeed;
use crate::registry::new_registry_handle;

/// Run the service until ctrl-c
pub async fn run(config: Config) -> Result<()> {
    let cancel = CancellationToken::new();

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    run_until(config, Arc::new(SystemClock), cancel).await
}

/// Build a tracker whose registry uses the windows from `config`
pub fn build_tracker(config: &Config, clock: Arc<dyn Clock>) -> LivenessTracker {
    let registry = new_registry_handle(
        config.registry.online_window(),
        config.registry.stale_window(),
    );
    LivenessTracker::with_clock(registry, clock)
}

/// Run the service on `clock` until `cancel` fires
pub async fn run_until(
    config: Config,
    clock: Arc<dyn Clock>,
    cancel: CancellationToken,
) -> Result<()> {
    config.validate()?;
    let tracker = build_tracker(&config, clock);

    let (feed, rx) = ActivityFeed::channel(config.ingest.channel_capacity);

    let sweeper = sweeper::spawn_sweeper(
        tracker.clone(),
        config.registry.sweep_interval(),
        &cancel,
    )?;

    let ingest = tokio::spawn(ingest::run_ingest(rx, tracker.clone(), cancel.clone()));

    if config.api.enabled {
        let port = config.api.port;
        let router = api::build_router(tracker.clone(), feed.clone());
        let cancel_for_api = cancel.clone();

        tokio::spawn(async move {
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            let listener = match tokio::net::TcpListener::bind(addr).await {
                Ok(l) => l,
                Err(e) => {
                    tracing::error!(
                        "Failed to bind status API to port {}: {}. Continuing without API.",
                        port,
                        e
                    );
                    return;
                }
            };
            tracing::info!("Status API listening on http://{}", addr);

            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    cancel_for_api.cancelled().await;
                })
                .await
                .ok();

            tracing::debug!("Status API stopped");
        });
    }
    drop(feed);

    tracing::info!(
        "Device liveness started (online window {:?}, stale window {:?}, sweep every {:?})",
        config.registry.online_window(),
        config.registry.stale_window(),
        config.registry.sweep_interval()
    );

    cancel.cancelled().await;

    sweeper.stop().await;
    match ingest.await {
        Ok(recorded) => tracing::debug!("Ingest recorded {} events", recorded),
        Err(e) => tracing::warn!("Ingest task failed: {}", e),
    }
    tracing::info!("Device liveness stopped");

    Ok(())
}
