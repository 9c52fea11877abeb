//! Dashboard view-model
//!
//! [`DashboardView`] is a pure function of the session, the expansion state
//! and the viewer's time zone. The browser crate renders its parts as
//! components; its [`Display`](std::fmt::Display) impl renders them as text
//! for the terminal.

use chrono::TimeZone;
use std::fmt::{self, Write};

use crate::models::{PipelineStatus, Stats};
use crate::state::{DashboardSession, ExpansionState, TrendSample};

use super::format;
use super::lead_view::{self, LeadRow, SerpPanel, COLUMNS, KNOWLEDGE_GRAPH_HEADING, NO_RESULTS, NO_SERP_DATA};
use super::Tone;

pub const DASHBOARD_TITLE: &str = "Lead Dashboard";
pub const CHART_TITLE: &str = "Lead Generation Trends";
pub const LEADS_TITLE: &str = "Latest Leads";
pub const ERRORS_TITLE: &str = "Errors:";

/// Series names, in the order they are drawn
pub const SERIES: [&str; 2] = ["Total Leads", "Enriched Leads"];

/// Dashboard tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Chart,
    Leads,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Chart, Tab::Leads];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Chart => "Chart",
            Tab::Leads => "Leads",
        }
    }
}

/// Value slot of a summary card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardValue {
    /// Data is being fetched
    Placeholder,
    Text(String),
}

/// One of the four summary cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: CardValue,
    pub tone: Tone,
}

impl SummaryCard {
    fn new(title: &'static str, loading: bool, text: String, tone: Tone) -> Self {
        let value = if loading {
            CardValue::Placeholder
        } else {
            CardValue::Text(text)
        };
        Self { title, value, tone }
    }
}

/// Build the four summary cards from a stats snapshot
pub fn summary_cards<Tz: TimeZone>(stats: &Stats, loading: bool, tz: &Tz) -> [SummaryCard; 4] {
    let last_update = if stats.last_update.trim().is_empty() {
        "—".to_string()
    } else {
        format::clock_label(&stats.last_update, tz)
    };

    let status_tone = match stats.status {
        PipelineStatus::Active => Tone::Positive,
        PipelineStatus::Warning => Tone::Caution,
    };

    [
        SummaryCard::new("Total Leads", loading, format::count(stats.total_leads), Tone::Neutral),
        SummaryCard::new("Enriched Leads", loading, format::count(stats.enriched_leads), Tone::Neutral),
        SummaryCard::new("Last Update", loading, last_update, Tone::Neutral),
        SummaryCard::new("Status", loading, stats.status.label().to_string(), status_tone),
    ]
}

/// Persistent alert listing every error of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAlert {
    pub entries: Vec<String>,
    /// Backend-side total of reported errors
    pub backend_total: Option<u64>,
    /// How many entries the backend sent with that total
    pub backend_delivered: usize,
}

impl ErrorAlert {
    pub fn from_session(session: &DashboardSession) -> Option<Self> {
        let log = session.errors();
        if log.is_empty() {
            return None;
        }

        Some(Self {
            entries: log.entries().to_vec(),
            backend_total: log.backend_total(),
            backend_delivered: log.backend_delivered(),
        })
    }

    /// "showing N of M" note when the backend truncated its list.
    ///
    /// Compares against the last backend delivery, not the whole log, which
    /// may also hold local failures and earlier deliveries.
    pub fn truncation_note(&self) -> Option<String> {
        match self.backend_total {
            Some(total) if total > self.backend_delivered as u64 => Some(format!(
                "showing {} of {} reported",
                format::count(self.backend_delivered as u64),
                format::count(total)
            )),
            _ => None,
        }
    }
}

/// Whole dashboard, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub loading: bool,
    pub cards: [SummaryCard; 4],
    pub trend: Vec<TrendSample>,
    pub trend_peak: u64,
    pub rows: Vec<LeadRow>,
    pub alert: Option<ErrorAlert>,
    /// Clock label of the last successful refresh
    pub last_refresh: Option<String>,
}

impl DashboardView {
    pub fn build<Tz: TimeZone>(session: &DashboardSession, expansion: &ExpansionState, tz: &Tz) -> Self {
        let loading = session.is_loading();

        Self {
            loading,
            cards: summary_cards(session.stats(), loading, tz),
            trend: session.trend().to_vec(),
            trend_peak: session.trend().peak(),
            rows: lead_view::rows(session.leads(), expansion, tz),
            alert: ErrorAlert::from_session(session),
            last_refresh: session.last_refresh().map(|t| format::clock(&t)),
        }
    }

    /// Text rendering of the selected tabs
    pub fn render_text(&self, tabs: &[Tab]) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_text(&mut out, tabs);
        out
    }

    fn write_text(&self, out: &mut String, tabs: &[Tab]) -> fmt::Result {
        writeln!(out, "{}", DASHBOARD_TITLE)?;
        writeln!(out, "{}", "=".repeat(DASHBOARD_TITLE.len()))?;

        for card in &self.cards {
            write!(out, "{:<18}", card.title)?;
        }
        writeln!(out)?;
        for card in &self.cards {
            let text = match &card.value {
                CardValue::Placeholder => "...",
                CardValue::Text(text) => text.as_str(),
            };
            write!(out, "{:<18}", text)?;
        }
        writeln!(out)?;

        for tab in tabs {
            writeln!(out)?;
            match tab {
                Tab::Chart => self.write_chart(out)?,
                Tab::Leads => self.write_leads(out)?,
            }
        }

        if let Some(alert) = &self.alert {
            writeln!(out)?;
            match alert.truncation_note() {
                Some(note) => writeln!(out, "{} ({})", ERRORS_TITLE, note)?,
                None => writeln!(out, "{}", ERRORS_TITLE)?,
            }
            for entry in &alert.entries {
                writeln!(out, "  - {}", entry)?;
            }
        }

        writeln!(out)?;
        match (&self.last_refresh, self.loading) {
            (_, true) => writeln!(out, "Loading...")?,
            (Some(time), false) => writeln!(out, "Last refresh: {}", time)?,
            (None, false) => writeln!(out, "Not refreshed yet")?,
        }

        Ok(())
    }

    fn write_chart(&self, out: &mut String) -> fmt::Result {
        const BAR_WIDTH: u64 = 30;

        writeln!(out, "{}", CHART_TITLE)?;
        if self.loading {
            return writeln!(out, "  ...");
        }
        if self.trend.is_empty() {
            return writeln!(out, "  No samples yet");
        }

        writeln!(out, "  {:<10} {:>12} {:>15}", "Time", SERIES[0], SERIES[1])?;
        for sample in &self.trend {
            let bar = |value: u64| {
                let width = if self.trend_peak == 0 {
                    0
                } else {
                    value * BAR_WIDTH / self.trend_peak
                };
                "#".repeat(width as usize)
            };
            writeln!(
                out,
                "  {:<10} {:>12} {:>15}  {}",
                sample.time,
                format::count(sample.leads),
                format::count(sample.enriched),
                bar(sample.leads)
            )?;
            writeln!(out, "  {:<10} {:>12} {:>15}  {}", "", "", "", bar(sample.enriched).replace('#', "+"))?;
        }

        Ok(())
    }

    fn write_leads(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "{}", LEADS_TITLE)?;
        if self.loading {
            return writeln!(out, "  ...");
        }
        if self.rows.is_empty() {
            return writeln!(out, "  No leads");
        }

        writeln!(out, "  {}", COLUMNS.join(" | "))?;
        for row in &self.rows {
            let contact = match &row.website {
                Some(site) => format!("{} <{}>", row.email, site),
                None => row.email.clone(),
            };
            let marker = if row.expanded { "[-]" } else { "[+]" };
            writeln!(
                out,
                "  {} {} | {} | {} | {} | {}",
                marker,
                row.company,
                row.industry,
                contact,
                row.badge.label(),
                row.added
            )?;

            if row.expanded {
                if !row.description.is_empty() {
                    writeln!(out, "      {}", row.description)?;
                }
                write_serp_panel(out, &row.serp)?;
            }
        }

        Ok(())
    }
}

fn write_serp_panel(out: &mut String, panel: &SerpPanel) -> fmt::Result {
    match panel {
        SerpPanel::Unavailable => writeln!(out, "      {}", NO_SERP_DATA),
        SerpPanel::Details {
            top_results,
            knowledge_graph,
        } => {
            match panel.results_heading() {
                Some(heading) => {
                    writeln!(out, "      {}:", heading)?;
                    for (rank, result) in top_results.iter().enumerate() {
                        writeln!(out, "        {}. {} <{}>", rank + 1, result.title, result.link)?;
                        if !result.snippet.is_empty() {
                            writeln!(out, "           {}", result.snippet)?;
                        }
                    }
                }
                None => writeln!(out, "      {}", NO_RESULTS)?,
            }

            if let Some(graph) = knowledge_graph {
                writeln!(out, "      {}:", KNOWLEDGE_GRAPH_HEADING)?;
                writeln!(out, "        Title: {}", graph.title)?;
                writeln!(out, "        Type: {}", graph.kind)?;
                writeln!(out, "        Description: {}", graph.description)?;
            }

            Ok(())
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text(&Tab::ALL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FetchBundle, Resource};
    use crate::error::FetchError;
    use crate::models::{Lead, SerpData};
    use crate::state::ErrorMergePolicy;
    use chrono::{NaiveDate, NaiveDateTime, Utc};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn stats(status: PipelineStatus) -> Stats {
        Stats {
            total_leads: 120,
            enriched_leads: 45,
            last_update: "2024-01-01T10:00:00Z".to_string(),
            status,
        }
    }

    fn bare_lead(serp_data: Option<SerpData>) -> Lead {
        Lead {
            company_name: "Acme".to_string(),
            email: "contact@acme.com".to_string(),
            website: None,
            description: String::new(),
            industry: Some("Robotics".to_string()),
            timestamp: "2024-01-01 08:00:00".to_string(),
            enriched: true,
            serp_data,
        }
    }

    fn session_with(stats: Stats, leads: Vec<Lead>) -> DashboardSession {
        let mut session = DashboardSession::new(6, ErrorMergePolicy::Accumulate);
        session.begin_cycle();
        session.complete(
            Ok(FetchBundle {
                leads,
                stats,
                errors: Vec::new(),
                total_errors: None,
            }),
            at(10),
        );
        session
    }

    fn text(card: &SummaryCard) -> &str {
        match &card.value {
            CardValue::Text(text) => text,
            CardValue::Placeholder => panic!("card {} is loading", card.title),
        }
    }

    #[test]
    fn test_summary_scenario() {
        let session = session_with(stats(PipelineStatus::Active), Vec::new());
        let view = DashboardView::build(&session, &ExpansionState::new(), &Utc);

        assert_eq!(text(&view.cards[0]), "120");
        assert_eq!(text(&view.cards[1]), "45");
        assert_eq!(text(&view.cards[2]), "10:00 AM");
        assert_eq!(text(&view.cards[3]), "Active");
        assert_eq!(view.cards[3].tone, Tone::Positive);

        let mut second = stats(PipelineStatus::Warning);
        second.total_leads = 130;
        let mut session = session;
        session.begin_cycle();
        session.complete(
            Ok(FetchBundle {
                leads: Vec::new(),
                stats: second,
                errors: Vec::new(),
                total_errors: None,
            }),
            at(14),
        );
        let view = DashboardView::build(&session, &ExpansionState::new(), &Utc);

        assert_eq!(text(&view.cards[0]), "130");
        assert_eq!(text(&view.cards[3]), "Warning");
        assert_eq!(view.cards[3].tone, Tone::Caution);
        assert_eq!(view.cards[0].tone, Tone::Neutral);
    }

    #[test]
    fn test_loading_shows_placeholders() {
        let mut session = session_with(stats(PipelineStatus::Active), Vec::new());
        session.begin_cycle();

        let view = DashboardView::build(&session, &ExpansionState::new(), &Utc);
        assert!(view.loading);
        assert!(view.cards.iter().all(|c| c.value == CardValue::Placeholder));
        assert!(view.to_string().contains("Loading..."));
    }

    #[test]
    fn test_initial_last_update_dash() {
        let session = DashboardSession::default();
        let cards = summary_cards(session.stats(), false, &Utc);
        assert_eq!(cards[2].value, CardValue::Text("—".to_string()));
    }

    #[test]
    fn test_alert_only_with_errors() {
        let mut session = DashboardSession::default();
        assert!(ErrorAlert::from_session(&session).is_none());

        session.begin_cycle();
        session.complete(
            Err(FetchError::Status {
                resource: Resource::Leads,
                status: 502,
            }),
            at(9),
        );

        let alert = ErrorAlert::from_session(&session).unwrap();
        assert_eq!(alert.entries, vec!["Error fetching data: /api/leads: HTTP 502"]);
        assert_eq!(alert.truncation_note(), None);
    }

    #[test]
    fn test_alert_truncation_note() {
        let alert = ErrorAlert {
            entries: vec!["a".to_string(), "b".to_string()],
            backend_total: Some(1200),
            backend_delivered: 2,
        };
        assert_eq!(alert.truncation_note().as_deref(), Some("showing 2 of 1,200 reported"));
    }

    #[test]
    fn test_truncation_note_counts_last_delivery() {
        let mut session = DashboardSession::new(6, ErrorMergePolicy::Accumulate);
        session.begin_cycle();
        session.complete(
            Err(FetchError::Status {
                resource: Resource::Stats,
                status: 503,
            }),
            at(9),
        );
        for hour in [10, 11, 12] {
            session.begin_cycle();
            session.complete(
                Ok(FetchBundle {
                    leads: Vec::new(),
                    stats: stats(PipelineStatus::Warning),
                    errors: vec!["Crunchbase quota exceeded".to_string()],
                    total_errors: Some(3),
                }),
                at(hour),
            );
        }

        let alert = ErrorAlert::from_session(&session).unwrap();
        assert_eq!(alert.entries.len(), 4);
        assert_eq!(alert.truncation_note().as_deref(), Some("showing 1 of 3 reported"));
    }

    #[test]
    fn test_no_truncation_note_when_delivery_is_complete() {
        let alert = ErrorAlert {
            entries: vec!["local".to_string(), "a".to_string(), "b".to_string()],
            backend_total: Some(2),
            backend_delivered: 2,
        };
        assert_eq!(alert.truncation_note(), None);
    }

    #[test]
    fn test_trend_peak_covers_both_series() {
        let mut session = session_with(stats(PipelineStatus::Active), Vec::new());
        let mut busier = stats(PipelineStatus::Active);
        busier.total_leads = 80;
        busier.enriched_leads = 95;
        session.begin_cycle();
        session.complete(
            Ok(FetchBundle {
                leads: Vec::new(),
                stats: busier,
                errors: Vec::new(),
                total_errors: None,
            }),
            at(11),
        );

        let view = DashboardView::build(&session, &ExpansionState::new(), &Utc);
        assert_eq!(view.trend.len(), 2);
        assert_eq!(view.trend_peak, 120);
        assert_eq!(view.trend_peak, session.trend().peak());
    }

    #[test]
    fn test_text_empty_serp_panel() {
        let lead = bare_lead(Some(SerpData::default()));
        let mut expansion = ExpansionState::new();
        expansion.expand(lead.key());
        let session = session_with(stats(PipelineStatus::Active), vec![lead]);

        let out = DashboardView::build(&session, &expansion, &Utc).render_text(&[Tab::Leads]);
        assert!(out.contains(NO_RESULTS));
        assert!(!out.contains("Top Results"));
        assert!(!out.contains(KNOWLEDGE_GRAPH_HEADING));
    }

    #[test]
    fn test_text_missing_serp_panel() {
        let lead = bare_lead(None);
        let mut expansion = ExpansionState::new();
        expansion.expand(lead.key());
        let session = session_with(stats(PipelineStatus::Active), vec![lead]);

        let out = DashboardView::build(&session, &expansion, &Utc).render_text(&[Tab::Leads]);
        assert!(out.contains(NO_SERP_DATA));
    }

    #[test]
    fn test_text_collapsed_rows_hide_panel() {
        let session = session_with(stats(PipelineStatus::Active), vec![bare_lead(None)]);

        let out = DashboardView::build(&session, &ExpansionState::new(), &Utc).render_text(&[Tab::Leads]);
        assert!(out.contains("[+] Acme | Robotics"));
        assert!(!out.contains(NO_SERP_DATA));
    }

    #[test]
    fn test_text_chart_rows() {
        let session = session_with(stats(PipelineStatus::Active), Vec::new());
        let out = DashboardView::build(&session, &ExpansionState::new(), &Utc).render_text(&[Tab::Chart]);

        assert!(out.contains(CHART_TITLE));
        assert!(out.contains("10:00 AM"));
        assert!(out.contains("Last refresh: 10:00 AM"));
        assert!(!out.contains(LEADS_TITLE));
    }
}
