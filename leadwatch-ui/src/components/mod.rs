//! UI Components
//!
//! Leptos components rendering the dashboard view-models.

pub mod chart;
pub mod error_alert;
pub mod lead_table;
pub mod loading;
pub mod summary_cards;

pub use chart::Chart;
pub use error_alert::ErrorAlert;
pub use lead_table::LeadTable;
pub use loading::{ChartSkeleton, InlineLoading, ListSkeleton};
pub use summary_cards::SummaryCards;

use leadwatch::view::Tone;

/// Text color class for a tone
pub fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "text-white",
        Tone::Positive => "text-green-400",
        Tone::Caution => "text-yellow-400",
        Tone::Muted => "text-gray-400",
    }
}
