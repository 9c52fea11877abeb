//! Dashboard session state
//!
//! The single state container behind the dashboard. It owns the lead list,
//! the stats snapshot, the error log and the trend window, and moves between
//! the two refresh phases:
//!
//! ```text
//!   Idle --begin_cycle()--> Fetching --complete(Ok)--> Idle  (leads, stats, trend advance)
//!                                    --complete(Err)-> Idle  (one error appended)
//! ```
//!
//! Only the refresh loop mutates a session; views read it.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::api::FetchBundle;
use crate::error::FetchError;
use crate::models::{Lead, Stats};
use crate::view::format;

use super::error_log::{ErrorLog, ErrorMergePolicy};
use super::trend::{TrendSample, TrendSeries, DEFAULT_TREND_WINDOW};

/// Prefix of every locally detected fetch failure
pub const FETCH_ERROR_LABEL: &str = "Error fetching data: ";

/// Refresh phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    #[default]
    Idle,
    Fetching,
}

/// What a completed cycle changed, for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleReport {
    Applied {
        leads: usize,
        backend_errors: usize,
    },
    Failed {
        message: String,
    },
}

/// Cycle bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleCounters {
    pub succeeded: u64,
    pub failed: u64,
}

/// State of one dashboard session
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSession {
    leads: Vec<Lead>,
    stats: Stats,
    errors: ErrorLog,
    trend: TrendSeries,
    phase: CyclePhase,
    counters: CycleCounters,
    last_refresh: Option<NaiveDateTime>,
}

impl DashboardSession {
    pub fn new(trend_window: usize, error_policy: ErrorMergePolicy) -> Self {
        Self {
            leads: Vec::new(),
            stats: Stats::default(),
            errors: ErrorLog::new(error_policy),
            trend: TrendSeries::new(trend_window),
            phase: CyclePhase::Idle,
            counters: CycleCounters::default(),
            last_refresh: None,
        }
    }

    /// Enter Fetching. Returns `false`, changing nothing, if a cycle is
    /// already in flight.
    pub fn begin_cycle(&mut self) -> bool {
        if self.phase == CyclePhase::Fetching {
            return false;
        }
        self.phase = CyclePhase::Fetching;
        true
    }

    /// Finish the in-flight cycle.
    ///
    /// A successful fetch replaces leads and stats, records one trend sample
    /// labelled with `sampled_at`, and merges any backend errors. A failure
    /// only appends one labelled error entry.
    pub fn complete(
        &mut self,
        outcome: Result<FetchBundle, FetchError>,
        sampled_at: NaiveDateTime,
    ) -> CycleReport {
        self.phase = CyclePhase::Idle;

        match outcome {
            Ok(bundle) => {
                let backend_errors = bundle.errors.len();

                self.leads = bundle.leads;
                self.stats = bundle.stats;
                self.trend
                    .record(TrendSample::from_stats(format::clock(&sampled_at), &self.stats));
                self.errors
                    .replace_from_backend(bundle.errors, bundle.total_errors);

                self.counters.succeeded += 1;
                self.last_refresh = Some(sampled_at);

                CycleReport::Applied {
                    leads: self.leads.len(),
                    backend_errors,
                }
            }
            Err(e) => {
                let message = format!("{}{}", FETCH_ERROR_LABEL, e);
                self.errors.append([message.clone()]);
                self.counters.failed += 1;

                CycleReport::Failed { message }
            }
        }
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    pub fn trend(&self) -> &TrendSeries {
        &self.trend
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// True while a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.phase == CyclePhase::Fetching
    }

    pub fn counters(&self) -> CycleCounters {
        self.counters
    }

    /// When the last successful cycle completed
    pub fn last_refresh(&self) -> Option<NaiveDateTime> {
        self.last_refresh
    }

    /// Serializable view of the whole session
    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            phase: self.phase,
            stats: &self.stats,
            trend: self.trend.iter().collect(),
            leads: &self.leads,
            errors: self.errors.entries(),
            counters: self.counters,
            last_refresh: self.last_refresh,
        }
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_WINDOW, ErrorMergePolicy::default())
    }
}

/// JSON shape of a session, used by the CLI's `--format json`
#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub phase: CyclePhase,
    pub stats: &'a Stats,
    pub trend: Vec<&'a TrendSample>,
    pub leads: &'a [Lead],
    pub errors: &'a [String],
    pub counters: CycleCounters,
    pub last_refresh: Option<NaiveDateTime>,
}
