//! Lead Table Component
//!
//! Latest leads with per-row SERP panels. Rows are keyed by lead identity
//! so open panels survive a refresh that reorders the list.

use leptos::*;

use leadwatch::view::dashboard::LEADS_TITLE;
use leadwatch::view::lead_view::{
    COLUMNS, KNOWLEDGE_GRAPH_HEADING, NO_RESULTS, NO_SERP_DATA,
};
use leadwatch::{DashboardView, LeadRow, SerpPanel};

use super::tone_class;
use crate::state::global::GlobalState;

/// Lead table component
#[component]
pub fn LeadTable(dashboard: Memo<DashboardView>) -> impl IntoView {
    view! {
        <div class="overflow-x-auto">
            <h2 class="text-xl font-semibold mb-4">{LEADS_TITLE}</h2>
            <table class="w-full text-sm text-left">
                <thead class="text-gray-400 border-b border-gray-700">
                    <tr>
                        {COLUMNS.iter().map(|c| view! { <th class="py-2 px-3">{*c}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = dashboard.with(|d| d.rows.clone());
                        if rows.is_empty() {
                            view! {
                                <tr>
                                    <td colspan=COLUMNS.len() class="py-4 px-3 text-gray-400">"No leads"</td>
                                </tr>
                            }.into_view()
                        } else {
                            rows.into_iter().map(|row| view! { <Row row=row /> }).collect_view()
                        }
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn Row(row: LeadRow) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let key = row.key.clone();
    let on_toggle = move |_| state.toggle_expansion(&key);

    let contact = view! {
        <div>{row.email.clone()}</div>
        {row.website.clone().map(|site| view! {
            <a href=site.clone() target="_blank" class="text-primary-400 hover:underline">{site}</a>
        })}
    };

    let badge_class = format!("px-2 py-1 rounded text-xs bg-gray-700 {}", tone_class(row.badge.tone()));
    let expanded = row.expanded;

    view! {
        <tr class="border-b border-gray-700">
            <td class="py-2 px-3 font-medium" title=row.description.clone()>{row.company.clone()}</td>
            <td class="py-2 px-3">{row.industry.clone()}</td>
            <td class="py-2 px-3">{contact}</td>
            <td class="py-2 px-3"><span class=badge_class>{row.badge.label()}</span></td>
            <td class="py-2 px-3 text-gray-400">{row.added.clone()}</td>
            <td class="py-2 px-3">
                <button
                    on:click=on_toggle
                    class="px-3 py-1 rounded bg-gray-700 hover:bg-gray-600 text-xs"
                >
                    {if expanded { "Hide" } else { "Show" }}
                </button>
            </td>
        </tr>
        {expanded.then(|| view! {
            <tr class="bg-gray-900/50">
                <td colspan=COLUMNS.len() class="py-3 px-6">
                    <SerpDetails panel=row.serp.clone() />
                </td>
            </tr>
        })}
    }
}

/// Contents of an open SERP panel
#[component]
fn SerpDetails(panel: SerpPanel) -> impl IntoView {
    let heading = panel.results_heading();

    match panel {
        SerpPanel::Unavailable => view! {
            <p class="text-gray-400">{NO_SERP_DATA}</p>
        }.into_view(),
        SerpPanel::Details { top_results, knowledge_graph } => view! {
            <div class="space-y-3">
                {match heading {
                    Some(heading) => view! {
                        <div>
                            <h4 class="font-semibold mb-1">{heading}</h4>
                            <ol class="list-decimal list-inside space-y-1">
                                {top_results.into_iter().map(|result| view! {
                                    <li>
                                        <a href=result.link target="_blank" class="text-primary-400 hover:underline">
                                            {result.title}
                                        </a>
                                        <p class="text-gray-400 text-xs">{result.snippet}</p>
                                    </li>
                                }).collect_view()}
                            </ol>
                        </div>
                    }.into_view(),
                    None => view! { <p class="text-gray-400">{NO_RESULTS}</p> }.into_view(),
                }}
                {knowledge_graph.map(|graph| view! {
                    <div>
                        <h4 class="font-semibold mb-1">{KNOWLEDGE_GRAPH_HEADING}</h4>
                        <p><span class="text-gray-400">"Title: "</span>{graph.title}</p>
                        <p><span class="text-gray-400">"Type: "</span>{graph.kind}</p>
                        <p><span class="text-gray-400">"Description: "</span>{graph.description}</p>
                    </div>
                })}
            </div>
        }.into_view(),
    }
}
