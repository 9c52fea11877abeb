//! App Root Component
//!
//! Main application component with global providers and the footer.

use leptos::*;

use leadwatch::view::format;

use crate::components::InlineLoading;
use crate::pages::Dashboard;
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            // Main content area
            <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                <Dashboard />
            </main>

            // Footer with refresh status
            <Footer />
        </div>
    }
}

/// Footer component showing refresh status
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                // Last refresh time
                <div class="text-gray-400">
                    {move || {
                        state.session.with(|s| s.last_refresh())
                            .map(|t| format!("Last refresh: {}", format::clock(&t)))
                            .unwrap_or_else(|| "Not refreshed yet".to_string())
                    }}
                </div>

                // Loading indicator
                {move || {
                    if state.session.with(|s| s.is_loading()) {
                        view! {
                            <div class="flex items-center space-x-2 text-primary-400">
                                <InlineLoading />
                                <span>"Loading..."</span>
                            </div>
                        }.into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}
            </div>
        </footer>
    }
}
