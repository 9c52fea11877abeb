//! Leadwatch Dashboard
//!
//! Lead-generation pipeline dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Summary cards for the pipeline stats
//! - Trend chart of total and enriched leads
//! - Lead table with expandable SERP details
//! - Persistent error alert
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Session state and view-models come from the `leadwatch`
//! crate; this crate adds the browser transport, the timer and the
//! components.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
