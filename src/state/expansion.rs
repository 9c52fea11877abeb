//! Per-row SERP panel expansion
//!
//! Which lead rows have their SERP panel open. Rows are keyed by lead
//! identity, so reordering the lead list never moves an open panel to a
//! different lead.

use std::collections::HashSet;

use crate::models::{Lead, LeadKey};

/// Set of expanded rows; every row starts collapsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<LeadKey>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, key: &LeadKey) -> bool {
        self.expanded.contains(key)
    }

    /// Flip one row and return its new state
    pub fn toggle(&mut self, key: &LeadKey) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.clone());
            true
        }
    }

    pub fn expand(&mut self, key: LeadKey) {
        self.expanded.insert(key);
    }

    pub fn collapse(&mut self, key: &LeadKey) {
        self.expanded.remove(key);
    }

    /// Expand every lead in `leads`
    pub fn expand_all(&mut self, leads: &[Lead]) {
        self.expanded.extend(leads.iter().map(Lead::key));
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }
}
