//! # Leadwatch
//!
//! Client for a lead-generation pipeline: polls the backend for leads,
//! pipeline stats and pipeline errors, keeps a bounded trend of the stats,
//! and presents the result as a dashboard.
//!
//! ## Modules
//!
//! - [`models`]: Backend payload types
//! - [`api`]: Endpoints and response decoding shared by every transport
//! - [`state`]: Session state, error log, trend window, row expansion
//! - [`view`]: Display-ready view-models and the terminal rendering
//! - [`fetcher`], [`refresh`], [`config`]: Native runtime (`native` feature)
//!
//! The core modules compile without the `native` feature so the browser
//! dashboard can share them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use leadwatch::{Config, HttpFetcher, RefreshConfig, RefreshLoop};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let fetcher = HttpFetcher::from_config(&config.backend)?;
//!
//!     let handle = RefreshLoop::new(fetcher, RefreshConfig::from(&config.refresh)).spawn();
//!     let mut updates = handle.subscribe();
//!
//!     while updates.changed().await.is_ok() {
//!         let session = updates.borrow_and_update().clone();
//!         println!("{} leads", session.leads().len());
//!     }
//!
//!     handle.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod state;
pub mod view;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod fetcher;
#[cfg(feature = "native")]
pub mod refresh;

// Re-export top-level types for convenience
pub use api::{decode_response, Endpoints, FetchBundle, Resource};

pub use error::{FetchError, FetchResult};

pub use models::{
    KnowledgeGraph, Lead, LeadKey, OrganicResult, PipelineStatus, SerpData, Stats,
};

pub use state::{
    CycleReport, DashboardSession, ErrorLog, ErrorMergePolicy, ExpansionState, TrendSample,
    TrendSeries,
};

pub use view::{DashboardView, LeadRow, SerpPanel, Tab};

#[cfg(feature = "native")]
pub use config::{generate_default_config, Config, ConfigError, ConfigSource, LoadReport};

#[cfg(feature = "native")]
pub use fetcher::{DataFetcher, HttpFetcher};

#[cfg(feature = "native")]
pub use refresh::{run_cycle, RefreshConfig, RefreshHandle, RefreshLoop};
