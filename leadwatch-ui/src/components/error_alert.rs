//! Error Alert Component
//!
//! Persistent alert listing every error of the session. Unlike a toast it
//! never clears itself.

use leptos::*;

use leadwatch::view::dashboard::ERRORS_TITLE;
use leadwatch::DashboardView;

/// Error alert, rendered only when the session has errors
#[component]
pub fn ErrorAlert(dashboard: Memo<DashboardView>) -> impl IntoView {
    move || {
        dashboard.with(|d| d.alert.clone()).map(|alert| {
            let note = alert.truncation_note();

            view! {
                <div class="bg-red-900/40 border border-red-600 text-red-200 rounded-lg px-4 py-3">
                    <div class="flex items-center space-x-2 font-semibold">
                        <span class="text-lg">"✕"</span>
                        <span>{ERRORS_TITLE}</span>
                        {note.map(|n| view! {
                            <span class="text-xs text-red-300 font-normal">{format!("({})", n)}</span>
                        })}
                    </div>
                    <ul class="mt-2 space-y-1 text-sm list-disc list-inside">
                        {alert.entries.into_iter().map(|entry| view! { <li>{entry}</li> }).collect_view()}
                    </ul>
                </div>
            }
        })
    }
}
