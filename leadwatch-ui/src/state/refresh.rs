//! Browser Refresh Loop
//!
//! Runs the first fetch cycle on mount and one per period after that. The
//! timer is dropped when the owning component is cleaned up, and a result
//! arriving after cleanup is discarded.

use gloo_timers::callback::Interval;
use leptos::*;
use std::cell::Cell;
use std::rc::Rc;

use leadwatch::{CycleReport, Endpoints};

use crate::api;
use crate::state::global::GlobalState;

/// Refresh period: 4 hours
pub const REFRESH_PERIOD_MS: u32 = 4 * 60 * 60 * 1000;

/// Start refreshing `state` for the lifetime of the current owner
pub fn start_refresh_loop(state: GlobalState) {
    let endpoints = Rc::new(Endpoints::from_base(&api::get_api_base()));
    let alive = Rc::new(Cell::new(true));

    run_cycle(state, endpoints.clone(), alive.clone());

    let interval = {
        let alive = alive.clone();
        Interval::new(REFRESH_PERIOD_MS, move || {
            run_cycle(state, endpoints.clone(), alive.clone());
        })
    };

    on_cleanup(move || {
        alive.set(false);
        drop(interval);
    });
}

fn run_cycle(state: GlobalState, endpoints: Rc<Endpoints>, alive: Rc<Cell<bool>>) {
    let mut started = false;
    state.session.update(|session| started = session.begin_cycle());
    if !started {
        web_sys::console::log_1(&"Fetch already in flight, skipping cycle".into());
        return;
    }

    spawn_local(async move {
        let outcome = api::fetch_bundle(&endpoints).await;
        if !alive.get() {
            return;
        }

        let sampled_at = chrono::Local::now().naive_local();
        state.session.update(|session| match session.complete(outcome, sampled_at) {
            CycleReport::Applied { leads, backend_errors } => {
                web_sys::console::log_1(
                    &format!("Refresh cycle completed: {} leads, {} backend errors", leads, backend_errors)
                        .into(),
                );
            }
            CycleReport::Failed { message } => {
                web_sys::console::error_1(&message.into());
            }
        });
    });
}
