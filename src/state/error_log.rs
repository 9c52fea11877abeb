//! Session error log
//!
//! Ordered, append-only list of human-readable failures shown in the
//! dashboard's error alert. Entries are never pruned or deduplicated.

use serde::{Deserialize, Serialize};

/// How errors delivered by the backend's error resource are merged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMergePolicy {
    /// Backend errors are appended after everything already logged
    #[default]
    Accumulate,
    /// A non-empty backend list replaces the log
    Replace,
}

/// Error history of one dashboard session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog {
    entries: Vec<String>,
    policy: ErrorMergePolicy,
    /// Backend-side total from the last merge that reported one
    backend_total: Option<u64>,
    /// Size of the list that came with `backend_total`
    backend_delivered: usize,
}

impl ErrorLog {
    pub fn new(policy: ErrorMergePolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
            backend_total: None,
            backend_delivered: 0,
        }
    }

    /// Add entries at the end, in arrival order
    pub fn append<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.extend(entries.into_iter().map(Into::into));
    }

    /// Merge the backend's error list according to the policy.
    ///
    /// An empty list leaves the log untouched under either policy.
    pub fn replace_from_backend(&mut self, entries: Vec<String>, total: Option<u64>) {
        if entries.is_empty() {
            return;
        }

        if let Some(total) = total {
            self.backend_total = Some(total);
            self.backend_delivered = entries.len();
        }

        match self.policy {
            ErrorMergePolicy::Accumulate => self.entries.extend(entries),
            ErrorMergePolicy::Replace => self.entries = entries,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn policy(&self) -> ErrorMergePolicy {
        self.policy
    }

    /// Error total last reported by the backend
    pub fn backend_total(&self) -> Option<u64> {
        self.backend_total
    }

    /// Number of entries the backend sent alongside [`Self::backend_total`]
    pub fn backend_delivered(&self) -> usize {
        self.backend_delivered
    }
}
