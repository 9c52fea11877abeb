//! Dashboard views
//!
//! Display-ready view-models derived from the session. Nothing here holds
//! state of its own.

pub mod dashboard;
pub mod format;
pub mod lead_view;

pub use dashboard::{summary_cards, CardValue, DashboardView, ErrorAlert, SummaryCard, Tab};
pub use lead_view::{EnrichmentBadge, LeadRow, SerpPanel};

/// Visual treatment of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Positive,
    Caution,
    Muted,
}
