//! Backend API
//!
//! Browser transport for the three backend resources.

pub mod client;

pub use client::{fetch_bundle, get_api_base};
