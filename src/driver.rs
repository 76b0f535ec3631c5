//! Fixed-cadence tick pump
//!
//! Hosts feed wall-clock time into `update`; the driver converts it into
//! whole ticks, never more than `MAX_SUBSTEPS` per call.

use crate::consts::*;
use crate::sim::{ParticleStore, StepSummary, step};
use crate::stats::PopulationHistory;

/// Owns a store and steps it at a fixed interval
#[derive(Debug, Clone)]
pub struct Driver {
    pub store: ParticleStore,
    pub history: PopulationHistory,
    tick_interval: f64,
    accumulator: f64,
    max_substeps: u32,
}

impl Driver {
    pub fn new(store: ParticleStore) -> Self {
        Self::with_interval(store, TICK_INTERVAL_SECS)
    }

    /// Non-positive or non-finite intervals fall back to `TICK_INTERVAL_SECS`
    pub fn with_interval(store: ParticleStore, tick_interval: f64) -> Self {
        let tick_interval = if tick_interval.is_finite() && tick_interval > 0.0 {
            tick_interval
        } else {
            log::warn!("Invalid tick interval {tick_interval}, using {TICK_INTERVAL_SECS}");
            TICK_INTERVAL_SECS
        };
        let mut history = PopulationHistory::default();
        history.record(store.time_ticks, store.census());
        Self {
            store,
            history,
            tick_interval,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn tick_interval(&self) -> f64 {
        self.tick_interval
    }

    /// Run one tick immediately and record its census
    pub fn tick(&mut self) -> StepSummary {
        let summary = step(&mut self.store);
        self.history
            .record(self.store.time_ticks, self.store.census());
        summary
    }

    /// Account for `elapsed_secs` of wall-clock time. Returns ticks run.
    pub fn update(&mut self, elapsed_secs: f64) -> u32 {
        if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 {
            return 0;
        }
        self.accumulator += elapsed_secs.min(MAX_FRAME_SECS);

        let mut substeps = 0;
        while self.accumulator >= self.tick_interval && substeps < self.max_substeps {
            self.tick();
            self.accumulator -= self.tick_interval;
            substeps += 1;
        }
        // Drop backlog the substep cap could not absorb
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.tick_interval);
        }
        substeps
    }

    pub fn is_settled(&self) -> bool {
        self.history.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{KindCounts, SimParams};

    fn driver(interval: f64) -> Driver {
        let mut store = ParticleStore::new(SimParams::default(), 21).unwrap();
        store.resize(KindCounts::uniform(5)).unwrap();
        Driver::with_interval(store, interval)
    }

    #[test]
    fn test_update_accumulates_partial_ticks() {
        let mut d = driver(0.25);
        assert_eq!(d.update(0.1), 0);
        assert_eq!(d.update(0.1), 0);
        assert_eq!(d.update(0.1), 1);
        assert_eq!(d.store.time_ticks, 1);
    }

    #[test]
    fn test_update_caps_frame_and_substeps() {
        let mut d = driver(0.001);
        // 5 seconds of lag is capped to MAX_FRAME_SECS, then to MAX_SUBSTEPS ticks
        assert_eq!(d.update(5.0), MAX_SUBSTEPS);
        assert!(d.accumulator <= d.tick_interval());
    }

    #[test]
    fn test_history_records_each_tick() {
        let mut d = driver(TICK_INTERVAL_SECS);
        assert_eq!(d.history.len(), 1);
        d.tick();
        d.tick();
        assert_eq!(d.history.len(), 3);
        assert_eq!(d.history.latest().map(|s| s.tick), Some(2));
        assert_eq!(d.history.latest().map(|s| s.census.total), Some(15));
    }

    #[test]
    fn test_bad_input_is_ignored() {
        let mut d = driver(0.01);
        assert_eq!(d.update(f64::NAN), 0);
        assert_eq!(d.update(-1.0), 0);
        assert_eq!(Driver::with_interval(d.store.clone(), 0.0).tick_interval(), TICK_INTERVAL_SECS);
    }
}
