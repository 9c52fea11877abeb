//! Backend fetcher
//!
//! [`DataFetcher`] is the seam between the refresh loop and the backend.
//! [`HttpFetcher`] reads the three resources concurrently with reqwest and
//! joins them all-or-nothing.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::{decode_response, Endpoints, FetchBundle, Resource};
use crate::config::BackendConfig;
use crate::error::{FetchError, FetchResult};
use crate::models::{ErrorsResponse, LeadsResponse, Stats};

/// One fetch cycle against the backend
#[async_trait]
pub trait DataFetcher: Send + Sync {
    /// Fetch leads, stats and errors. Either all three succeed or the cycle
    /// fails with the first error.
    async fn fetch(&self) -> FetchResult<FetchBundle>;
}

/// reqwest-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    endpoints: Endpoints,
}

impl HttpFetcher {
    /// Create a fetcher with an optional per-request timeout
    pub fn new(endpoints: Endpoints, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_client(builder.build()?, endpoints))
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.endpoints(), config.request_timeout())
    }

    pub fn with_client(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: Resource) -> FetchResult<T> {
        let url = self.endpoints.url(resource);
        tracing::debug!(%resource, url, "Requesting");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport(resource, e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| transport(resource, e))?;

        tracing::debug!(%resource, status, bytes = body.len(), "Response received");
        decode_response(resource, status, &body)
    }
}

fn transport(resource: Resource, e: reqwest::Error) -> FetchError {
    let message = if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    };

    FetchError::Transport { resource, message }
}

#[async_trait]
impl DataFetcher for HttpFetcher {
    async fn fetch(&self) -> FetchResult<FetchBundle> {
        let (leads, stats, errors) = tokio::try_join!(
            self.get_json::<LeadsResponse>(Resource::Leads),
            self.get_json::<Stats>(Resource::Stats),
            self.get_json::<ErrorsResponse>(Resource::Errors),
        )?;

        Ok(FetchBundle::from_parts(leads, stats, errors))
    }
}
