//! Lead table view-model
//!
//! One [`LeadRow`] per lead, with the row's SERP panel resolved into what
//! should be shown: a placeholder when no SERP data exists, otherwise the
//! ranked results (heading suppressed when there are none) and the
//! knowledge graph when present.

use chrono::TimeZone;

use crate::models::{KnowledgeGraph, Lead, LeadKey, OrganicResult};
use crate::state::ExpansionState;

use super::format;
use super::Tone;

/// Shown in the industry column when the backend has none
pub const INDUSTRY_PLACEHOLDER: &str = "N/A";
/// Panel body for leads without SERP data
pub const NO_SERP_DATA: &str = "No SERP data available";
/// Heading over the ranked results
pub const TOP_RESULTS_HEADING: &str = "Top Results";
/// Shown instead of the heading when the result list is empty
pub const NO_RESULTS: &str = "No results";
pub const KNOWLEDGE_GRAPH_HEADING: &str = "Knowledge Graph";

/// Column headers, in display order
pub const COLUMNS: [&str; 6] = ["Company", "Industry", "Contact", "Status", "Added", "SERP Data"];

/// Enrichment status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentBadge {
    Enriched,
    Pending,
}

impl EnrichmentBadge {
    /// Driven by the `enriched` flag alone, never by SERP presence
    pub fn for_lead(lead: &Lead) -> Self {
        if lead.enriched {
            EnrichmentBadge::Enriched
        } else {
            EnrichmentBadge::Pending
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EnrichmentBadge::Enriched => "Enriched",
            EnrichmentBadge::Pending => "Pending",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            EnrichmentBadge::Enriched => Tone::Positive,
            EnrichmentBadge::Pending => Tone::Muted,
        }
    }
}

/// Contents of a row's SERP panel
#[derive(Debug, Clone, PartialEq)]
pub enum SerpPanel {
    /// The lead carries no SERP data
    Unavailable,
    Details {
        /// Results in rank order; empty means "no results"
        top_results: Vec<OrganicResult>,
        knowledge_graph: Option<KnowledgeGraph>,
    },
}

impl SerpPanel {
    pub fn for_lead(lead: &Lead) -> Self {
        match &lead.serp_data {
            None => SerpPanel::Unavailable,
            Some(serp) => SerpPanel::Details {
                top_results: serp.organic_results.clone(),
                knowledge_graph: serp.knowledge_graph.clone(),
            },
        }
    }

    /// Heading over the result list, `None` when the list is empty or
    /// there is no SERP data at all
    pub fn results_heading(&self) -> Option<&'static str> {
        match self {
            SerpPanel::Details { top_results, .. } if !top_results.is_empty() => {
                Some(TOP_RESULTS_HEADING)
            }
            _ => None,
        }
    }
}

/// Display-ready table row
#[derive(Debug, Clone, PartialEq)]
pub struct LeadRow {
    pub key: LeadKey,
    pub company: String,
    /// Revealed on hover
    pub description: String,
    pub industry: String,
    pub email: String,
    /// Only set when the lead has a website
    pub website: Option<String>,
    pub badge: EnrichmentBadge,
    pub added: String,
    pub expanded: bool,
    pub serp: SerpPanel,
}

impl LeadRow {
    pub fn build<Tz: TimeZone>(lead: &Lead, expansion: &ExpansionState, tz: &Tz) -> Self {
        let key = lead.key();
        let expanded = expansion.is_expanded(&key);

        Self {
            key,
            company: lead.company_name.clone(),
            description: lead.description.clone(),
            industry: lead
                .industry
                .clone()
                .unwrap_or_else(|| INDUSTRY_PLACEHOLDER.to_string()),
            email: lead.email.clone(),
            website: lead.website.clone(),
            badge: EnrichmentBadge::for_lead(lead),
            added: format::date_label(&lead.timestamp, tz),
            expanded,
            serp: SerpPanel::for_lead(lead),
        }
    }
}

/// Rows for every lead, in backend order
pub fn rows<Tz: TimeZone>(leads: &[Lead], expansion: &ExpansionState, tz: &Tz) -> Vec<LeadRow> {
    leads
        .iter()
        .map(|lead| LeadRow::build(lead, expansion, tz))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SerpData;
    use chrono::Utc;

    fn lead() -> Lead {
        Lead {
            company_name: "Acme Robotics".to_string(),
            email: "contact@acmerobotics.com".to_string(),
            website: Some("https://acme.example".to_string()),
            description: "Warehouse robots".to_string(),
            industry: None,
            timestamp: "2024-01-15T10:30:00Z".to_string(),
            enriched: true,
            serp_data: None,
        }
    }

    fn result(title: &str) -> OrganicResult {
        OrganicResult {
            title: title.to_string(),
            link: format!("https://{}.example", title.to_lowercase()),
            snippet: String::new(),
        }
    }

    #[test]
    fn test_row_columns() {
        let row = LeadRow::build(&lead(), &ExpansionState::new(), &Utc);

        assert_eq!(row.company, "Acme Robotics");
        assert_eq!(row.industry, INDUSTRY_PLACEHOLDER);
        assert_eq!(row.website.as_deref(), Some("https://acme.example"));
        assert_eq!(row.added, "1/15/2024");
        assert_eq!(row.badge, EnrichmentBadge::Enriched);
        assert!(!row.expanded);
    }

    #[test]
    fn test_pending_regardless_of_serp() {
        let mut lead = lead();
        lead.enriched = false;
        lead.serp_data = Some(SerpData {
            organic_results: vec![result("Acme")],
            knowledge_graph: None,
        });

        let row = LeadRow::build(&lead, &ExpansionState::new(), &Utc);
        assert_eq!(row.badge, EnrichmentBadge::Pending);
        assert_eq!(row.badge.label(), "Pending");
        assert_eq!(row.badge.tone(), Tone::Muted);
    }

    #[test]
    fn test_missing_serp_is_unavailable() {
        let panel = SerpPanel::for_lead(&lead());
        assert_eq!(panel, SerpPanel::Unavailable);
        assert_eq!(panel.results_heading(), None);
    }

    #[test]
    fn test_empty_results_suppress_heading() {
        let mut lead = lead();
        lead.serp_data = Some(SerpData::default());

        let panel = SerpPanel::for_lead(&lead);
        assert_eq!(panel.results_heading(), None);
        match panel {
            SerpPanel::Details {
                top_results,
                knowledge_graph,
            } => {
                assert!(top_results.is_empty());
                assert!(knowledge_graph.is_none());
            }
            SerpPanel::Unavailable => panic!("empty SERP data is still SERP data"),
        }
    }

    #[test]
    fn test_results_keep_rank_order() {
        let mut lead = lead();
        lead.serp_data = Some(SerpData {
            organic_results: vec![result("Third"), result("First"), result("Second")],
            knowledge_graph: Some(KnowledgeGraph {
                title: "Acme Robotics".to_string(),
                kind: "Company".to_string(),
                description: String::new(),
            }),
        });

        let panel = SerpPanel::for_lead(&lead);
        assert_eq!(panel.results_heading(), Some(TOP_RESULTS_HEADING));
        if let SerpPanel::Details { top_results, knowledge_graph } = panel {
            let titles: Vec<_> = top_results.iter().map(|r| r.title.as_str()).collect();
            assert_eq!(titles, vec!["Third", "First", "Second"]);
            assert_eq!(knowledge_graph.unwrap().kind, "Company");
        }
    }

    #[test]
    fn test_expansion_follows_key() {
        let mut expansion = ExpansionState::new();
        let mut other = lead();
        other.company_name = "Globex".to_string();
        expansion.expand(other.key());

        let built = rows(&[lead(), other], &expansion, &Utc);
        assert!(!built[0].expanded);
        assert!(built[1].expanded);
    }
}
