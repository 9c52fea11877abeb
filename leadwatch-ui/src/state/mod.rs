//! State Management
//!
//! Global dashboard state and the browser refresh loop.

pub mod global;
pub mod refresh;

pub use global::{provide_global_state, GlobalState};
pub use refresh::start_refresh_loop;
