//! Global Application State
//!
//! Reactive state management using Leptos signals.

use chrono::Local;
use leptos::*;

use leadwatch::{DashboardSession, DashboardView, ExpansionState, LeadKey, Tab};

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Session written by the refresh loop only
    pub session: RwSignal<DashboardSession>,
    /// Open SERP panels
    pub expansion: RwSignal<ExpansionState>,
    /// Selected dashboard tab
    pub tab: RwSignal<Tab>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        session: create_rw_signal(DashboardSession::default()),
        expansion: create_rw_signal(ExpansionState::new()),
        tab: create_rw_signal(Tab::default()),
    };

    provide_context(state);
}

impl GlobalState {
    /// Dashboard view-model, rebuilt when the session or expansion changes
    pub fn dashboard(&self) -> Memo<DashboardView> {
        let session = self.session;
        let expansion = self.expansion;

        create_memo(move |_| {
            session.with(|session| {
                expansion.with(|expansion| DashboardView::build(session, expansion, &Local))
            })
        })
    }

    /// Open or close one lead's SERP panel
    pub fn toggle_expansion(&self, key: &LeadKey) {
        self.expansion.update(|expansion| {
            expansion.toggle(key);
        });
    }
}
