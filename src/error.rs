//! Fetch error types
//!
//! Failures of a fetch cycle. Variants carry messages rather than transport
//! error types so the same enum serves the native and browser fetchers.

use thiserror::Error;

use crate::api::Resource;

/// Errors that can occur while fetching the dashboard resources
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (unreachable, reset, timeout)
    #[error("{resource}: {message}")]
    Transport { resource: Resource, message: String },

    /// The backend answered with a non-success status
    #[error("{resource}: HTTP {status}")]
    Status { resource: Resource, status: u16 },

    /// The response body was not the expected JSON
    #[error("{resource}: invalid response body: {message}")]
    Decode { resource: Resource, message: String },
}

impl FetchError {
    /// Which of the three resources failed
    pub fn resource(&self) -> Resource {
        match self {
            FetchError::Transport { resource, .. }
            | FetchError::Status { resource, .. }
            | FetchError::Decode { resource, .. } => *resource,
        }
    }
}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
