// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Per-run search metadata.
//!
//! `RunStats` holds the counters that describe the current (or last) run:
//! start and stop timestamps, step count, improvement clocks, the smallest
//! strictly positive improvement delta observed, and the accepted and
//! rejected move counts. Everything is stored in atomics so that stop
//! criteria and external observers can read live values from other
//! threads while the step loop is the only writer. All per-run fields are
//! reset when a run starts; the best-evaluation mirror is retained across
//! runs, like the best solution it shadows.
//!
//! `StatsSnapshot` is the consistent, plain view handed to stop criteria.
//! Quantities that are not meaningful yet (before the first run, or while
//! initializing) are `None`.

use crate::constants::INVALID_DELTA;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

/// Atomic per-run counters; timestamps are milliseconds against the
/// owning control's epoch, `-1` meaning "not set".
#[derive(Debug)]
pub(crate) struct RunStats {
    start_ms: AtomicI64,
    stop_ms: AtomicI64,
    steps: AtomicI64,
    last_improvement_ms: AtomicI64,
    last_improvement_step: AtomicI64,
    accepted: AtomicI64,
    rejected: AtomicI64,
    min_delta_bits: AtomicU64,
    best_evaluation_bits: AtomicU64,
    has_best_evaluation: AtomicBool,
}

impl RunStats {
    pub(crate) fn new() -> Self {
        Self {
            start_ms: AtomicI64::new(-1),
            stop_ms: AtomicI64::new(-1),
            steps: AtomicI64::new(-1),
            last_improvement_ms: AtomicI64::new(-1),
            last_improvement_step: AtomicI64::new(-1),
            accepted: AtomicI64::new(-1),
            rejected: AtomicI64::new(-1),
            min_delta_bits: AtomicU64::new(INVALID_DELTA.to_bits()),
            best_evaluation_bits: AtomicU64::new(0),
            has_best_evaluation: AtomicBool::new(false),
        }
    }

    /// Resets every per-run field at the start of a run. The best
    /// evaluation mirror survives, as does the best solution it shadows.
    pub(crate) fn reset_for_run(&self, now_ms: i64) {
        self.start_ms.store(now_ms, Ordering::Relaxed);
        self.stop_ms.store(-1, Ordering::Relaxed);
        self.steps.store(0, Ordering::Relaxed);
        self.last_improvement_ms.store(-1, Ordering::Relaxed);
        self.last_improvement_step.store(-1, Ordering::Relaxed);
        self.accepted.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.min_delta_bits
            .store(INVALID_DELTA.to_bits(), Ordering::Relaxed);
    }

    pub(crate) fn set_stop(&self, now_ms: i64) {
        self.stop_ms.store(now_ms, Ordering::Relaxed);
    }

    pub(crate) fn on_step(&self) {
        self.steps.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn on_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn on_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an improvement of the best solution. `delta` is the
    /// absolute evaluation difference to the previous best, absent when
    /// there was no previous best. Only the step loop writes here, so the
    /// read-modify-write on the minimum needs no stronger ordering.
    pub(crate) fn on_improvement(&self, now_ms: i64, best_evaluation: f64, delta: Option<f64>) {
        self.last_improvement_ms.store(now_ms, Ordering::Relaxed);
        self.last_improvement_step
            .store(self.steps.load(Ordering::Relaxed).max(0), Ordering::Relaxed);
        if let Some(delta) = delta {
            let current = f64::from_bits(self.min_delta_bits.load(Ordering::Relaxed));
            if current == INVALID_DELTA || delta < current {
                self.min_delta_bits.store(delta.to_bits(), Ordering::Relaxed);
            }
        }
        self.best_evaluation_bits
            .store(best_evaluation.to_bits(), Ordering::Relaxed);
        self.has_best_evaluation.store(true, Ordering::Relaxed);
    }

    pub(crate) fn start_ms(&self) -> i64 {
        self.start_ms.load(Ordering::Relaxed)
    }

    pub(crate) fn stop_ms(&self) -> i64 {
        self.stop_ms.load(Ordering::Relaxed)
    }

    pub(crate) fn steps(&self) -> i64 {
        self.steps.load(Ordering::Relaxed)
    }

    pub(crate) fn accepted(&self) -> i64 {
        self.accepted.load(Ordering::Relaxed)
    }

    pub(crate) fn rejected(&self) -> i64 {
        self.rejected.load(Ordering::Relaxed)
    }

    pub(crate) fn last_improvement_ms(&self) -> i64 {
        self.last_improvement_ms.load(Ordering::Relaxed)
    }

    pub(crate) fn last_improvement_step(&self) -> i64 {
        self.last_improvement_step.load(Ordering::Relaxed)
    }

    pub(crate) fn min_delta(&self) -> f64 {
        f64::from_bits(self.min_delta_bits.load(Ordering::Relaxed))
    }

    pub(crate) fn best_evaluation(&self) -> Option<f64> {
        if self.has_best_evaluation.load(Ordering::Relaxed) {
            Some(f64::from_bits(
                self.best_evaluation_bits.load(Ordering::Relaxed),
            ))
        } else {
            None
        }
    }
}

/// A consistent, plain view of the live run metadata, handed to stop
/// criteria. Fields are `None` when the quantity is not (yet) meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsSnapshot {
    /// Time the current (or last) run has been going.
    pub runtime: Option<Duration>,
    /// Steps completed in the current (or last) run.
    pub steps: Option<u64>,
    /// Time since the last best-solution improvement; equals `runtime`
    /// when the run has not improved yet.
    pub time_without_improvement: Option<Duration>,
    /// Steps since the last best-solution improvement; equals `steps`
    /// when the run has not improved yet.
    pub steps_without_improvement: Option<u64>,
    /// Smallest strictly positive improvement delta observed so far.
    pub min_delta: Option<f64>,
    /// Evaluation of the best solution found so far, retained across runs.
    pub best_evaluation: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_carry_sentinels() {
        let stats = RunStats::new();
        assert_eq!(stats.start_ms(), -1);
        assert_eq!(stats.steps(), -1);
        assert_eq!(stats.accepted(), -1);
        assert_eq!(stats.rejected(), -1);
        assert_eq!(stats.min_delta(), INVALID_DELTA);
        assert_eq!(stats.best_evaluation(), None);
    }

    #[test]
    fn test_reset_clears_per_run_fields_but_keeps_best() {
        let stats = RunStats::new();
        stats.reset_for_run(10);
        stats.on_step();
        stats.on_accepted();
        stats.on_improvement(15, 42.0, Some(2.0));
        stats.set_stop(20);

        stats.reset_for_run(100);
        assert_eq!(stats.start_ms(), 100);
        assert_eq!(stats.stop_ms(), -1);
        assert_eq!(stats.steps(), 0);
        assert_eq!(stats.accepted(), 0);
        assert_eq!(stats.rejected(), 0);
        assert_eq!(stats.last_improvement_ms(), -1);
        assert_eq!(stats.min_delta(), INVALID_DELTA);
        // Retained across runs, like the best solution.
        assert_eq!(stats.best_evaluation(), Some(42.0));
    }

    #[test]
    fn test_min_delta_tracks_the_smallest_improvement() {
        let stats = RunStats::new();
        stats.reset_for_run(0);
        stats.on_improvement(1, 10.0, None);
        assert_eq!(stats.min_delta(), INVALID_DELTA);

        stats.on_improvement(2, 13.0, Some(3.0));
        assert_eq!(stats.min_delta(), 3.0);

        stats.on_improvement(3, 14.0, Some(1.0));
        assert_eq!(stats.min_delta(), 1.0);

        stats.on_improvement(4, 19.0, Some(5.0));
        assert_eq!(stats.min_delta(), 1.0);
    }

    #[test]
    fn test_counters_are_monotone() {
        let stats = RunStats::new();
        stats.reset_for_run(0);
        for expected in 1..=5 {
            stats.on_step();
            assert_eq!(stats.steps(), expected);
        }
        stats.on_accepted();
        stats.on_rejected();
        stats.on_rejected();
        assert_eq!(stats.accepted(), 1);
        assert_eq!(stats.rejected(), 2);
    }
}
