//! Backend API contract
//!
//! The three read endpoints of the lead-generation backend and the
//! transport-neutral part of fetching them: URL construction, status
//! checking and body decoding. The native fetcher (reqwest) and the browser
//! fetcher (gloo-net) both funnel responses through [`decode_response`].

use serde::de::DeserializeOwned;
use std::fmt;

use crate::error::{FetchError, FetchResult};
use crate::models::{ErrorsResponse, Lead, LeadsResponse, Stats};

/// Default backend address
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// One of the three resources fetched per cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Leads,
    Stats,
    Errors,
}

impl Resource {
    /// Default path below the API base
    pub fn default_path(&self) -> &'static str {
        match self {
            Resource::Leads => "/api/leads",
            Resource::Stats => "/api/stats",
            Resource::Errors => "/api/errors",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_path())
    }
}

/// Absolute URLs of the three endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub leads: String,
    pub stats: String,
    pub errors: String,
}

impl Endpoints {
    /// Endpoints at their default paths below `base`
    pub fn from_base(base: &str) -> Self {
        Self::with_paths(
            base,
            Resource::Leads.default_path(),
            Resource::Stats.default_path(),
            Resource::Errors.default_path(),
        )
    }

    /// Endpoints at custom paths below `base`
    pub fn with_paths(base: &str, leads: &str, stats: &str, errors: &str) -> Self {
        let base = base.trim_end_matches('/');
        let join = |path: &str| format!("{}/{}", base, path.trim_start_matches('/'));

        Self {
            leads: join(leads),
            stats: join(stats),
            errors: join(errors),
        }
    }

    pub fn url(&self, resource: Resource) -> &str {
        match resource {
            Resource::Leads => &self.leads,
            Resource::Stats => &self.stats,
            Resource::Errors => &self.errors,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_base(DEFAULT_API_BASE)
    }
}

/// Everything one successful fetch cycle delivers
#[derive(Debug, Clone, PartialEq)]
pub struct FetchBundle {
    pub leads: Vec<Lead>,
    pub stats: Stats,
    /// Errors reported by the backend's own error resource
    pub errors: Vec<String>,
    /// Backend-side error total, when it reports one
    pub total_errors: Option<u64>,
}

impl FetchBundle {
    /// Assemble a bundle from the three decoded bodies
    pub fn from_parts(leads: LeadsResponse, stats: Stats, errors: ErrorsResponse) -> Self {
        Self {
            leads: leads.leads,
            stats,
            errors: errors.errors,
            total_errors: errors.total_errors,
        }
    }
}

/// Check the status and decode the body of one response.
///
/// Any status outside 200-299 fails the resource, as does a body that does
/// not match `T`.
pub fn decode_response<T>(resource: Resource, status: u16, body: &str) -> FetchResult<T>
where
    T: DeserializeOwned,
{
    if !(200..300).contains(&status) {
        return Err(FetchError::Status { resource, status });
    }

    serde_json::from_str(body).map_err(|e| FetchError::Decode {
        resource,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PipelineStatus;

    #[test]
    fn test_endpoints_from_base() {
        let endpoints = Endpoints::from_base("http://localhost:5000/");
        assert_eq!(endpoints.leads, "http://localhost:5000/api/leads");
        assert_eq!(endpoints.stats, "http://localhost:5000/api/stats");
        assert_eq!(endpoints.errors, "http://localhost:5000/api/errors");
        assert_eq!(endpoints.url(Resource::Stats), endpoints.stats);
    }

    #[test]
    fn test_endpoints_custom_paths() {
        let endpoints = Endpoints::with_paths("https://leads.internal", "v2/leads", "/v2/stats", "v2/errors");
        assert_eq!(endpoints.leads, "https://leads.internal/v2/leads");
        assert_eq!(endpoints.stats, "https://leads.internal/v2/stats");
    }

    #[test]
    fn test_decode_success() {
        let stats: Stats = decode_response(
            Resource::Stats,
            200,
            r#"{"total_leads": 3, "enriched_leads": 2, "last_update": "2024-01-01 09:00:00", "status": "warning"}"#,
        )
        .unwrap();
        assert_eq!(stats.total_leads, 3);
        assert_eq!(stats.status, PipelineStatus::Warning);
    }

    #[test]
    fn test_decode_rejects_error_status() {
        let result = decode_response::<Stats>(Resource::Stats, 500, r#"{"total_leads": 1}"#);
        assert_eq!(
            result.unwrap_err(),
            FetchError::Status {
                resource: Resource::Stats,
                status: 500
            }
        );
    }

    #[test]
    fn test_decode_rejects_malformed_body() {
        let result = decode_response::<LeadsResponse>(Resource::Leads, 200, "<html>oops</html>");
        match result {
            Err(FetchError::Decode { resource, .. }) => assert_eq!(resource, Resource::Leads),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_bundle_from_parts() {
        let leads: LeadsResponse = serde_json::from_str(r#"{"leads": [], "total_leads": 0}"#).unwrap();
        let errors: ErrorsResponse =
            serde_json::from_str(r#"{"errors": ["Crunchbase API error: 401"], "total_errors": 7}"#).unwrap();

        let bundle = FetchBundle::from_parts(leads, Stats::default(), errors);
        assert!(bundle.leads.is_empty());
        assert_eq!(bundle.errors, vec!["Crunchbase API error: 401"]);
        assert_eq!(bundle.total_errors, Some(7));
    }
}
