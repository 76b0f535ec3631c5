//! Population census and bounded history
//!
//! A census is what a statistics header would draw: per-kind counts and
//! their share of the population. The history keeps the most recent samples.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::sim::{Kind, KindCounts};

/// Default number of samples kept by `PopulationHistory`
pub const DEFAULT_HISTORY_CAPACITY: usize = 1024;

/// Per-kind population counts at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub counts: KindCounts,
    pub total: u32,
}

impl Census {
    pub fn from_kinds(kinds: impl IntoIterator<Item = Kind>) -> Self {
        let mut counts = KindCounts::default();
        let mut total = 0u32;
        for kind in kinds {
            counts.set(kind, counts.get(kind) + 1);
            total += 1;
        }
        Self { counts, total }
    }

    /// Share of the population in percent; an empty census reports 0 for every kind
    pub fn percentage(&self, kind: Kind) -> f64 {
        let total = self.total.max(1) as f64;
        self.counts.get(kind) as f64 / total * 100.0
    }

    /// Number of kinds with at least one particle
    pub fn surviving_kinds(&self) -> usize {
        Kind::ALL.iter().filter(|&&k| self.counts.get(k) > 0).count()
    }

    /// A population with at most one kind can no longer change
    pub fn is_settled(&self) -> bool {
        self.surviving_kinds() <= 1
    }

    /// Most numerous kind; ties resolve to the earlier kind in `Kind::ALL`
    pub fn dominant(&self) -> Option<Kind> {
        if self.total == 0 {
            return None;
        }
        Kind::ALL
            .into_iter()
            .fold(None, |best: Option<Kind>, k| match best {
                Some(b) if self.counts.get(b) >= self.counts.get(k) => Some(b),
                _ => Some(k),
            })
    }
}

/// One census sample tagged with the tick it was taken after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub tick: u64,
    pub census: Census,
}

/// Most recent census samples, oldest first
#[derive(Debug, Clone)]
pub struct PopulationHistory {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl Default for PopulationHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl PopulationHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a sample, evicting the oldest once full
    pub fn record(&mut self, tick: u64, census: Census) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { tick, census });
    }

    pub fn latest(&self) -> Option<&Sample> {
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

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn is_settled(&self) -> bool {
        self.latest().is_some_and(|s| s.census.is_settled())
    }

    /// Counts of one kind over the retained window
    pub fn series(&self, kind: Kind) -> Vec<u32> {
        self.samples.iter().map(|s| s.census.counts.get(kind)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn census(paper: u32, rock: u32, scissors: u32) -> Census {
        let kinds = std::iter::repeat_n(Kind::Paper, paper as usize)
            .chain(std::iter::repeat_n(Kind::Rock, rock as usize))
            .chain(std::iter::repeat_n(Kind::Scissors, scissors as usize));
        Census::from_kinds(kinds)
    }

    #[test]
    fn test_census_counts() {
        let c = census(2, 3, 5);
        assert_eq!(c.counts, KindCounts::new(2, 3, 5));
        assert_eq!(c.total, 10);
        assert!((c.percentage(Kind::Scissors) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_census_has_zero_percentages() {
        let c = Census::default();
        for k in Kind::ALL {
            assert_eq!(c.percentage(k), 0.0);
        }
        assert!(c.is_settled());
        assert_eq!(c.dominant(), None);
    }

    #[test]
    fn test_settled_and_dominant() {
        assert!(!census(1, 1, 0).is_settled());
        assert!(census(0, 7, 0).is_settled());
        assert_eq!(census(4, 9, 9).dominant(), Some(Kind::Rock));
        assert_eq!(census(3, 1, 2).dominant(), Some(Kind::Paper));
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut h = PopulationHistory::with_capacity(3);
        for tick in 1..=5 {
            h.record(tick, census(tick as u32, 1, 1));
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.iter().next().map(|s| s.tick), Some(3));
        assert_eq!(h.latest().map(|s| s.tick), Some(5));
        assert_eq!(h.series(Kind::Paper), vec![3, 4, 5]);
    }

    #[test]
    fn test_history_settled_follows_latest() {
        let mut h = PopulationHistory::default();
        assert!(!h.is_settled());
        h.record(1, census(1, 1, 1));
        assert!(!h.is_settled());
        h.record(2, census(3, 0, 0));
        assert!(h.is_settled());
    }
}
