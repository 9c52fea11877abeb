//! Summary Card Component
//!
//! The four pipeline cards: total leads, enriched leads, last update and
//! status.

use leptos::*;

use leadwatch::view::{CardValue, SummaryCard};
use leadwatch::DashboardView;

use super::loading::ValueSkeleton;
use super::tone_class;

/// Row of summary cards
#[component]
pub fn SummaryCards(dashboard: Memo<DashboardView>) -> impl IntoView {
    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            {move || {
                dashboard.with(|d| d.cards.clone())
                    .into_iter()
                    .map(|card| view! { <Card card=card /> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn Card(card: SummaryCard) -> impl IntoView {
    let value = match card.value {
        CardValue::Placeholder => view! { <ValueSkeleton /> }.into_view(),
        CardValue::Text(text) => view! {
            <div class=format!("text-3xl font-bold mt-2 {}", tone_class(card.tone))>
                {text}
            </div>
        }.into_view(),
    };

    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <span class="text-gray-400 text-sm">{card.title}</span>
            {value}
        </div>
    }
}
