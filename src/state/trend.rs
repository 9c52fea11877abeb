//! Trend window
//!
//! Bounded FIFO of per-cycle stat samples feeding the two-line chart.

use serde::Serialize;
use std::collections::VecDeque;

use crate::models::Stats;

/// Samples kept by default: the five previous cycles plus the newest
pub const DEFAULT_TREND_WINDOW: usize = 6;

/// One point on the trend chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSample {
    /// Clock label of the cycle that produced the sample
    pub time: String,
    /// Total leads at that cycle
    pub leads: u64,
    /// Enriched leads at that cycle
    pub enriched: u64,
}

impl TrendSample {
    pub fn from_stats(time: impl Into<String>, stats: &Stats) -> Self {
        Self {
            time: time.into(),
            leads: stats.total_leads,
            enriched: stats.enriched_leads,
        }
    }
}

/// Sliding window of the most recent samples, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendSeries {
    samples: VecDeque<TrendSample>,
    capacity: usize,
}

impl TrendSeries {
    /// Window holding at most `capacity` samples (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest once the window is full
    pub fn record(&mut self, sample: TrendSample) {
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrendSample> {
        self.samples.iter()
    }

    pub fn to_vec(&self) -> Vec<TrendSample> {
        self.samples.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&TrendSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest value across both series, for chart scaling
    pub fn peak(&self) -> u64 {
        self.samples
            .iter()
            .map(|s| s.leads.max(s.enriched))
            .max()
            .unwrap_or(0)
    }
}

impl Default for TrendSeries {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_WINDOW)
    }
}
