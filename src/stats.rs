//! Counters collected while searching for candidates.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub lengths_tested: u64,
    pub starts_scanned: u64,
    /// Run comparisons, one per candidate occurrence position tried.
    pub comparisons: u64,
    /// Non-empty occurrence lists that were costed.
    pub candidates_considered: u64,
    pub best_updates: u64,
    /// Lowest cost among all considered candidates.
    pub min_considered_cost: Option<usize>,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_considered(&mut self, cost: usize) {
        self.candidates_considered += 1;
        self.min_considered_cost = Some(self.min_considered_cost.map_or(cost, |c| c.min(cost)));
    }

    /// Fold the counters of another pass into this one.
    pub fn merge(&mut self, other: &SearchStats) {
        self.lengths_tested += other.lengths_tested;
        self.starts_scanned += other.starts_scanned;
        self.comparisons += other.comparisons;
        self.candidates_considered += other.candidates_considered;
        self.best_updates += other.best_updates;
        self.min_considered_cost = match (self.min_considered_cost, other.min_considered_cost) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
    }
}
