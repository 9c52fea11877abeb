//! HTTP API Client
//!
//! Fetches the leads, stats and errors resources with gloo-net. Status
//! checking and decoding are shared with the native client through
//! [`leadwatch::api::decode_response`].

use futures_util::future::try_join3;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use leadwatch::api::{decode_response, DEFAULT_API_BASE};
use leadwatch::models::{ErrorsResponse, LeadsResponse, Stats};
use leadwatch::{Endpoints, FetchBundle, FetchError, FetchResult, Resource};

/// Local storage key holding the API base URL
pub const API_URL_KEY: &str = "leadwatch_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item(API_URL_KEY) {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

async fn get_json<T: DeserializeOwned>(endpoints: &Endpoints, resource: Resource) -> FetchResult<T> {
    let transport = |e: gloo_net::Error| FetchError::Transport {
        resource,
        message: e.to_string(),
    };

    let response = Request::get(endpoints.url(resource))
        .send()
        .await
        .map_err(transport)?;

    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    decode_response(resource, status, &body)
}

/// Fetch all three resources concurrently; the first failure fails the cycle
pub async fn fetch_bundle(endpoints: &Endpoints) -> FetchResult<FetchBundle> {
    let (leads, stats, errors) = try_join3(
        get_json::<LeadsResponse>(endpoints, Resource::Leads),
        get_json::<Stats>(endpoints, Resource::Stats),
        get_json::<ErrorsResponse>(endpoints, Resource::Errors),
    )
    .await?;

    Ok(FetchBundle::from_parts(leads, stats, errors))
}
