//! Lead Pipeline Data Model
//!
//! Types mirroring the JSON served by the lead-generation backend.
//! Keys are snake_case on the wire; unknown keys are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One prospect record produced by the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub company_name: String,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub email: String,
    /// Company website; the backend sends `""` when unknown
    #[serde(default, deserialize_with = "non_empty")]
    pub website: Option<String>,
    /// Sent as `null` when no summary could be generated
    #[serde(default, deserialize_with = "null_to_empty")]
    pub description: String,
    /// Industry category; the backend sends `""` when unknown
    #[serde(default, deserialize_with = "non_empty")]
    pub industry: Option<String>,
    /// Creation time, RFC 3339 or `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    #[serde(default)]
    pub enriched: bool,
    /// SERP enrichment payload. Independent of `enriched`: a lookup may
    /// have run and found nothing.
    #[serde(default)]
    pub serp_data: Option<SerpData>,
}

impl Lead {
    /// Stable identity used for per-row UI state
    ///
    /// The backend has no lead id. Two leads with the same company name and
    /// the same second-resolution timestamp share a key and expand together.
    pub fn key(&self) -> LeadKey {
        LeadKey(format!("{}@{}", self.company_name, self.timestamp))
    }
}

/// Identity of a lead that survives reordering of the lead list
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeadKey(String);

impl LeadKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Search-engine-results-page enrichment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SerpData {
    /// Search results in rank order
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
    #[serde(default, deserialize_with = "non_empty_graph")]
    pub knowledge_graph: Option<KnowledgeGraph>,
}

/// A single organic search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default, deserialize_with = "null_to_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub link: String,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub snippet: String,
}

/// Knowledge-graph summary card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    #[serde(default, deserialize_with = "null_to_empty")]
    pub title: String,
    #[serde(default, rename = "type", deserialize_with = "null_to_empty")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub description: String,
}

impl KnowledgeGraph {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.kind.is_empty() && self.description.is_empty()
    }
}

/// Aggregate pipeline snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_leads: u64,
    pub enriched_leads: u64,
    #[serde(default)]
    pub last_update: String,
    #[serde(default)]
    pub status: PipelineStatus,
}

/// Backend health flag. Anything other than `active` reads as a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    #[default]
    Active,
    #[serde(other)]
    Warning,
}

impl PipelineStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStatus::Active => "Active",
            PipelineStatus::Warning => "Warning",
        }
    }
}

/// `GET /api/leads` body
#[derive(Debug, Clone, Deserialize)]
pub struct LeadsResponse {
    pub leads: Vec<Lead>,
}

/// `GET /api/errors` body
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorsResponse {
    #[serde(default)]
    pub errors: Vec<String>,
    /// Total errors the backend has seen; it only serves the most recent ones
    #[serde(default)]
    pub total_errors: Option<u64>,
}

fn null_to_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn non_empty_graph<'de, D>(deserializer: D) -> Result<Option<KnowledgeGraph>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<KnowledgeGraph>::deserialize(deserializer)?;
    Ok(value.filter(|graph| !graph.is_empty()))
}
