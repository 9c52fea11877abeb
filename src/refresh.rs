//! Refresh loop
//!
//! Drives a [`DashboardSession`] from a [`DataFetcher`] on a fixed period.
//! One tokio task owns the session and is its only writer; every state
//! change is published on a `watch` channel. The first cycle runs as soon as
//! the loop starts.

use chrono::Local;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::RefreshSettings;
use crate::fetcher::DataFetcher;
use crate::state::{CycleReport, DashboardSession, ErrorMergePolicy, DEFAULT_TREND_WINDOW};

/// Refresh loop configuration
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Time between cycle starts
    pub interval: Duration,
    pub trend_window: usize,
    pub error_policy: ErrorMergePolicy,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(4 * 60 * 60),
            trend_window: DEFAULT_TREND_WINDOW,
            error_policy: ErrorMergePolicy::default(),
        }
    }
}

impl From<&RefreshSettings> for RefreshConfig {
    fn from(settings: &RefreshSettings) -> Self {
        Self {
            interval: settings.interval(),
            trend_window: settings.trend_window,
            error_policy: settings.error_policy,
        }
    }
}

impl RefreshConfig {
    pub fn new_session(&self) -> DashboardSession {
        DashboardSession::new(self.trend_window, self.error_policy)
    }
}

/// Run one fetch cycle against `session`.
///
/// Returns `None` without fetching if a cycle is already in flight.
pub async fn run_cycle<F>(fetcher: &F, session: &mut DashboardSession) -> Option<CycleReport>
where
    F: DataFetcher + ?Sized,
{
    if !session.begin_cycle() {
        tracing::debug!("Fetch already in flight, skipping cycle");
        return None;
    }

    let outcome = fetcher.fetch().await;
    let report = session.complete(outcome, Local::now().naive_local());
    log_report(&report);
    Some(report)
}

fn log_report(report: &CycleReport) {
    match report {
        CycleReport::Applied {
            leads,
            backend_errors,
        } => {
            tracing::info!(
                leads = *leads,
                backend_errors = *backend_errors,
                "Refresh cycle completed"
            );
        }
        CycleReport::Failed { message } => {
            tracing::warn!(error = %message, "Refresh cycle failed");
        }
    }
}

/// Periodic refresh of one dashboard session
pub struct RefreshLoop<F> {
    fetcher: F,
    config: RefreshConfig,
}

impl<F> RefreshLoop<F>
where
    F: DataFetcher + 'static,
{
    pub fn new(fetcher: F, config: RefreshConfig) -> Self {
        Self { fetcher, config }
    }

    /// Start the loop on the current tokio runtime
    pub fn spawn(self) -> RefreshHandle {
        let session = self.config.new_session();
        let (state_tx, state_rx) = watch::channel(session.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            trend_window = self.config.trend_window,
            "Starting refresh loop"
        );

        let task = tokio::spawn(self.run(session, state_tx, shutdown_rx));

        RefreshHandle {
            shutdown: Some(shutdown_tx),
            task,
            state: state_rx,
        }
    }

    async fn run(
        self,
        mut session: DashboardSession,
        state: watch::Sender<DashboardSession>,
        mut shutdown: oneshot::Receiver<()>,
    ) {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            // A dropped handle stops the loop too
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }

            if !session.begin_cycle() {
                continue;
            }
            state.send_replace(session.clone());

            let outcome = tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutdown during fetch, discarding result");
                    break;
                }
                outcome = self.fetcher.fetch() => outcome,
            };

            let report = session.complete(outcome, Local::now().naive_local());
            log_report(&report);
            state.send_replace(session.clone());
        }

        tracing::info!("Refresh loop stopped");
    }
}

/// Handle to a running [`RefreshLoop`]
pub struct RefreshHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
    state: watch::Receiver<DashboardSession>,
}

impl RefreshHandle {
    /// Receiver notified on every session change
    pub fn subscribe(&self) -> watch::Receiver<DashboardSession> {
        self.state.clone()
    }

    /// Stop the loop and wait for its task to end. An in-flight fetch is
    /// abandoned and its result never applied.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Refresh task ended abnormally");
        }
    }
}
