//! Interval-driven fetch loop.
//!
//! Every period the poller spawns one tick: fetch a full tickers snapshot from
//! the source and apply it to the shared dashboard. Ticks run as independent
//! tasks, so a slow response can overlap the next tick; whichever finishes
//! last writes last. A failed tick is logged and leaves the dashboard as is.
//!
//! `PollerHandle::shutdown` stops the timer, aborts ticks still in flight and
//! waits for the loop to exit, after which the dashboard is no longer touched.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use tokio::sync::{mpsc, Mutex};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::api::{FetchError, TickerSource};
use crate::domain::{Dashboard, SharedDashboard};

/// Capacity of the command channel.
const COMMAND_BUFFER: usize = 8;

/// Commands accepted by a running poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerCommand {
    /// Run an extra tick now.
    Refresh,
    /// Stop the loop.
    Shutdown,
}

/// Periodic ticker poller.
pub struct Poller {
    source: Arc<dyn TickerSource>,
    state: SharedDashboard,
    period: Duration,
}

impl Poller {
    pub fn new(source: Arc<dyn TickerSource>, state: SharedDashboard, period: Duration) -> Self {
        Self {
            source,
            state,
            period,
        }
    }

    /// Start the loop on the tokio runtime. The first tick fires immediately.
    pub fn spawn(self) -> PollerHandle {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let task = tokio::spawn(self.run(commands_rx));

        PollerHandle {
            commands: commands_tx,
            task,
        }
    }

    async fn run(self, mut commands: mpsc::Receiver<PollerCommand>) {
        let mut timer = tokio::time::interval(self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut in_flight = JoinSet::new();

        info!(
            source = %self.source.describe(),
            period_ms = self.period.as_millis() as u64,
            "Poller started"
        );

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    in_flight.spawn(run_tick(self.source.clone(), self.state.clone()));
                }
                command = commands.recv() => match command {
                    Some(PollerCommand::Refresh) => {
                        debug!("Manual refresh requested");
                        in_flight.spawn(run_tick(self.source.clone(), self.state.clone()));
                    }
                    Some(PollerCommand::Shutdown) | None => break,
                },
                Some(joined) = in_flight.join_next() => {
                    if let Err(e) = joined {
                        if e.is_panic() {
                            warn!(error = %e, "Tick task panicked");
                        }
                    }
                }
            }
        }

        // Late responses must not land after teardown
        let aborted = in_flight.len();
        in_flight.abort_all();
        while in_flight.join_next().await.is_some() {}

        info!(aborted_ticks = aborted, "Poller stopped");
    }
}

/// Fetch once and apply the result.
///
/// On error the dashboard is not touched.
pub async fn poll_once(
    source: &dyn TickerSource,
    state: &Mutex<Dashboard>,
) -> Result<usize, FetchError> {
    let tickers = source.fetch_tickers().await?;
    let received = tickers.len();

    let mut dashboard = state.lock().await;
    dashboard.apply_tickers(&tickers, Local::now());

    Ok(received)
}

async fn run_tick(source: Arc<dyn TickerSource>, state: SharedDashboard) {
    let started = Instant::now();

    match poll_once(source.as_ref(), &state).await {
        Ok(received) => {
            debug!(
                records = received,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Tick applied"
            );
        }
        Err(e) => {
            error!(error = %e, "Error fetching swap data");
        }
    }
}

/// Handle to a running poller.
pub struct PollerHandle {
    commands: mpsc::Sender<PollerCommand>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Ask for an immediate extra tick.
    pub async fn refresh(&self) {
        if self.commands.send(PollerCommand::Refresh).await.is_err() {
            warn!("Refresh requested after poller exit");
        }
    }

    /// Stop the timer, abort in-flight ticks and wait for the loop to exit.
    pub async fn shutdown(self) {
        let _ = self.commands.send(PollerCommand::Shutdown).await;

        if let Err(e) = self.task.await {
            warn!(error = %e, "Poller task ended abnormally");
        }
    }
}
