//! Dashboard Page
//!
//! Summary cards, the Chart and Leads tabs, and the error alert. Mounting
//! the page starts the refresh loop; unmounting stops it.

use leptos::*;

use leadwatch::view::dashboard::DASHBOARD_TITLE;
use leadwatch::Tab;

use crate::components::{Chart, ChartSkeleton, ErrorAlert, LeadTable, ListSkeleton, SummaryCards};
use crate::state::global::GlobalState;
use crate::state::start_refresh_loop;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let dashboard = state.dashboard();

    start_refresh_loop(state);

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">{DASHBOARD_TITLE}</h1>
                <p class="text-gray-400 mt-1">"Lead generation pipeline at a glance"</p>
            </div>

            <SummaryCards dashboard=dashboard />

            <section class="bg-gray-800 rounded-xl p-6">
                <div class="flex space-x-2 mb-6">
                    {Tab::ALL.into_iter().map(|tab| view! { <TabButton tab=tab /> }).collect_view()}
                </div>

                {move || {
                    let loading = dashboard.with(|d| d.loading);
                    match (state.tab.get(), loading) {
                        (Tab::Chart, true) => view! { <ChartSkeleton /> }.into_view(),
                        (Tab::Chart, false) => view! { <Chart dashboard=dashboard /> }.into_view(),
                        (Tab::Leads, true) => view! { <ListSkeleton count=5 /> }.into_view(),
                        (Tab::Leads, false) => view! { <LeadTable dashboard=dashboard /> }.into_view(),
                    }
                }}
            </section>

            <ErrorAlert dashboard=dashboard />
        </div>
    }
}

/// Tab selection button
#[component]
fn TabButton(tab: Tab) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let is_active = create_memo(move |_| state.tab.get() == tab);

    view! {
        <button
            on:click=move |_| state.tab.set(tab)
            class=move || {
                let base = "px-4 py-2 rounded-lg text-sm font-medium transition-colors";
                if is_active.get() {
                    format!("{} bg-primary-600 text-white", base)
                } else {
                    format!("{} bg-gray-700 text-gray-300 hover:bg-gray-600", base)
                }
            }
        >
            {tab.label()}
        </button>
    }
}
