// Refresh coordinator: drives periodic re-fetches on a fixed interval with a
// manual-trigger channel and a shutdown signal, same shape as a background
// stats worker. At most one fetch is ever in flight; ticks and triggers that
// arrive mid-fetch are dropped, not queued, so a slow backend cannot cause a
// request storm.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Duration, interval};
use tracing::{debug, info, warn};

type InFlight = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// Coordinator timing. Stats logging uses a real-time interval, independent of
/// the refresh interval.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    pub interval_ms: u64,
    /// When false, no timer is armed; only manual triggers fetch.
    pub enabled: bool,
    /// How often to log refresh stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Controls a spawned coordinator: manual refresh and teardown.
pub struct RefreshHandle {
    trigger_tx: mpsc::Sender<()>,
    shutdown_tx: oneshot::Sender<()>,
    task: tokio::task::JoinHandle<()>,
}

impl RefreshHandle {
    /// Requests an immediate fetch, bypassing the timer. Respects the
    /// in-flight guard: a trigger during a fetch is dropped.
    pub fn trigger_now(&self) {
        let _ = self.trigger_tx.try_send(());
    }

    /// Cancels the pending timer and waits for the loop to exit. No fetch is
    /// issued after this returns; an already in-flight request is not aborted.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.task.await;
    }
}

/// Spawns the coordinator loop around `fetch`. The first scheduled tick fires
/// immediately, so an enabled coordinator performs an initial fetch on spawn.
pub fn spawn<F, Fut>(mut fetch: F, config: RefreshConfig) -> RefreshHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    let (trigger_tx, mut trigger_rx) = mpsc::channel::<()>(1);
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let mut tick = interval(Duration::from_millis(config.interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_tick = interval(Duration::from_secs(config.stats_log_interval_secs));
        stats_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut in_flight: Option<InFlight> = None;
        // Mirrors in_flight.is_some(); kept separate so the select guard does
        // not borrow in_flight while the fetch branch holds it mutably.
        let mut fetching = false;
        let mut refreshes_completed: u64 = 0;
        let mut refresh_failures: u64 = 0;
        let mut dropped_while_fetching: u64 = 0;

        loop {
            tokio::select! {
                _ = tick.tick(), if config.enabled => {
                    if fetching {
                        dropped_while_fetching += 1;
                    } else {
                        in_flight = Some(Box::pin(fetch()));
                        fetching = true;
                    }
                }
                Some(()) = trigger_rx.recv() => {
                    if fetching {
                        dropped_while_fetching += 1;
                        debug!(
                            operation = "trigger_now",
                            "refresh already in flight; manual trigger dropped"
                        );
                    } else {
                        in_flight = Some(Box::pin(fetch()));
                        fetching = true;
                    }
                }
                result = poll_in_flight(&mut in_flight), if fetching => {
                    in_flight = None;
                    fetching = false;
                    match result {
                        Ok(()) => refreshes_completed += 1,
                        Err(e) => {
                            // A failed fetch does not halt the schedule.
                            refresh_failures += 1;
                            warn!(
                                error = %e,
                                operation = "refresh",
                                "refresh failed; next attempt stays scheduled"
                            );
                        }
                    }
                }
                _ = stats_tick.tick() => {
                    info!(
                        refreshes_completed,
                        refresh_failures,
                        dropped_while_fetching,
                        "refresh stats"
                    );
                }
                _ = &mut shutdown_rx => {
                    debug!("Refresh coordinator shutting down");
                    break;
                }
            }
        }
    });

    RefreshHandle {
        trigger_tx,
        shutdown_tx,
        task,
    }
}

/// Awaits the in-flight fetch. Pends forever when none; the select guard keeps
/// this branch unpolled in that case.
async fn poll_in_flight(in_flight: &mut Option<InFlight>) -> anyhow::Result<()> {
    match in_flight {
        Some(fut) => fut.as_mut().await,
        None => std::future::pending().await,
    }
}
