//! Dashboard state
//!
//! The session container and the pieces it owns, plus the per-row
//! expansion state that belongs to the lead table.

pub mod error_log;
pub mod expansion;
pub mod session;
pub mod trend;

pub use error_log::{ErrorLog, ErrorMergePolicy};
pub use expansion::ExpansionState;
pub use session::{
    CycleCounters, CyclePhase, CycleReport, DashboardSession, SessionSnapshot, FETCH_ERROR_LABEL,
};
pub use trend::{TrendSample, TrendSeries, DEFAULT_TREND_WINDOW};
