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

//! Thread-safe search control: status transitions and live metadata.
//!
//! `SearchControl` is the shared heart of a search. Status writes are
//! serialized by the per-search status lock, making every transition
//! linearizable; reads go through an atomic so the step loop can poll its
//! status without touching the lock (and, crucially, without establishing
//! a lock order against the run-space lock it holds during a step).
//! `request_stop` may be called from any thread; the step loop observes
//! the flipped status before its next step.
//!
//! The control also owns the per-run counters and derives the
//! `StatsSnapshot` view consumed by stop criteria, applying the status
//! rules: per-run quantities are absent before the first run and while a
//! run is initializing.

use crate::{
    err::SearchError,
    stats::{RunStats, StatsSnapshot},
    status::SearchStatus,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{Duration, Instant};

/// Shared status machine and run metadata of a single search.
#[derive(Debug)]
pub struct SearchControl {
    /// Serializes status writes. Never held while listeners fire.
    lock: Mutex<()>,
    status: AtomicU8,
    epoch: Instant,
    stats: RunStats,
}

impl SearchControl {
    pub(crate) fn new() -> Self {
        Self {
            lock: Mutex::new(()),
            status: AtomicU8::new(SearchStatus::Idle as u8),
            epoch: Instant::now(),
            stats: RunStats::new(),
        }
    }

    /// Returns the current search status.
    #[inline]
    pub fn status(&self) -> SearchStatus {
        SearchStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    /// Milliseconds elapsed since this control was created; the time base
    /// of every timestamp in the run stats.
    #[inline]
    pub(crate) fn now_ms(&self) -> i64 {
        self.epoch.elapsed().as_millis() as i64
    }

    #[inline]
    pub(crate) fn stats(&self) -> &RunStats {
        &self.stats
    }

    #[inline]
    fn set_status(&self, status: SearchStatus) {
        self.status.store(status as u8, Ordering::Release);
    }

    /// Runs `f` under the status lock if the search is idle; fails with
    /// `NotIdle` (or `Disposed`) otherwise. Holding the lock for the whole
    /// mutation closes the race against a concurrent `start()`.
    pub(crate) fn with_idle<R>(
        &self,
        operation: &'static str,
        f: impl FnOnce() -> R,
    ) -> Result<R, SearchError> {
        let _guard = self.lock.lock();
        match self.status() {
            SearchStatus::Idle => Ok(f()),
            SearchStatus::Disposed => Err(SearchError::Disposed { operation }),
            status => Err(SearchError::NotIdle { operation, status }),
        }
    }

    /// Transition `Idle -> Initializing`; the entry point of `start()`.
    pub(crate) fn begin_run(&self, operation: &'static str) -> Result<(), SearchError> {
        let _guard = self.lock.lock();
        match self.status() {
            SearchStatus::Idle => {
                self.set_status(SearchStatus::Initializing);
                Ok(())
            }
            SearchStatus::Disposed => Err(SearchError::Disposed { operation }),
            status => Err(SearchError::NotIdle { operation, status }),
        }
    }

    /// Transition `Initializing -> Running`. Returns `false` when a stop
    /// was requested during initialization, in which case the step loop is
    /// skipped entirely.
    pub(crate) fn enter_running(&self) -> bool {
        let _guard = self.lock.lock();
        if self.status() == SearchStatus::Initializing {
            self.set_status(SearchStatus::Running);
            true
        } else {
            false
        }
    }

    /// Requests a cooperative stop from any thread. Flips an initializing
    /// or running search to `Terminating`; idempotent in every other
    /// state. Returns whether the status changed.
    pub fn request_stop(&self) -> bool {
        let _guard = self.lock.lock();
        match self.status() {
            SearchStatus::Initializing | SearchStatus::Running => {
                self.set_status(SearchStatus::Terminating);
                true
            }
            _ => false,
        }
    }

    /// Returns an active search to `Idle` at the end of a run (or after a
    /// failed initialization).
    pub(crate) fn return_to_idle(&self) {
        let _guard = self.lock.lock();
        debug_assert!(
            self.status().is_active(),
            "called `SearchControl::return_to_idle` while {}",
            self.status()
        );
        self.set_status(SearchStatus::Idle);
    }

    /// Transition `Idle -> Disposed`. Returns `Ok(true)` when the search
    /// was disposed by this call, `Ok(false)` when it already was.
    pub(crate) fn dispose(&self, operation: &'static str) -> Result<bool, SearchError> {
        let _guard = self.lock.lock();
        match self.status() {
            SearchStatus::Disposed => Ok(false),
            SearchStatus::Idle => {
                self.set_status(SearchStatus::Disposed);
                Ok(true)
            }
            status => Err(SearchError::NotIdle { operation, status }),
        }
    }

    /// Takes a consistent snapshot of the live run metadata, applying the
    /// status rules for quantities that are not meaningful yet.
    pub fn snapshot(&self) -> StatsSnapshot {
        let status = self.status();
        let stats = self.stats();
        let best_evaluation = stats.best_evaluation();

        let start = stats.start_ms();
        if start < 0 || status == SearchStatus::Initializing {
            return StatsSnapshot {
                best_evaluation,
                ..StatsSnapshot::default()
            };
        }

        let end = match status {
            SearchStatus::Running | SearchStatus::Terminating => self.now_ms(),
            _ => {
                let stop = stats.stop_ms();
                if stop < 0 {
                    self.now_ms()
                } else {
                    stop
                }
            }
        };

        let runtime = Duration::from_millis((end - start).max(0) as u64);
        let steps = stats.steps().max(0) as u64;

        let last_improvement = stats.last_improvement_ms();
        let time_without_improvement = if last_improvement < 0 {
            runtime
        } else {
            Duration::from_millis((end - last_improvement).max(0) as u64)
        };

        let last_improvement_step = stats.last_improvement_step();
        let steps_without_improvement = if last_improvement_step < 0 {
            steps
        } else {
            steps.saturating_sub(last_improvement_step as u64)
        };

        let min_delta = stats.min_delta();
        let min_delta = (min_delta >= 0.0).then_some(min_delta);

        StatsSnapshot {
            runtime: Some(runtime),
            steps: Some(steps),
            time_without_improvement: Some(time_without_improvement),
            steps_without_improvement: Some(steps_without_improvement),
            min_delta,
            best_evaluation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_walk() {
        let control = SearchControl::new();
        assert_eq!(control.status(), SearchStatus::Idle);

        control.begin_run("start search").unwrap();
        assert_eq!(control.status(), SearchStatus::Initializing);

        assert!(control.enter_running());
        assert_eq!(control.status(), SearchStatus::Running);

        assert!(control.request_stop());
        assert_eq!(control.status(), SearchStatus::Terminating);

        control.return_to_idle();
        assert_eq!(control.status(), SearchStatus::Idle);

        assert!(control.dispose("dispose search").unwrap());
        assert_eq!(control.status(), SearchStatus::Disposed);
        // Repeated disposal is permitted and a no-op.
        assert!(!control.dispose("dispose search").unwrap());
    }

    #[test]
    fn test_begin_run_requires_idle() {
        let control = SearchControl::new();
        control.begin_run("start search").unwrap();
        let err = control.begin_run("start search").unwrap_err();
        assert_eq!(
            err,
            SearchError::NotIdle {
                operation: "start search",
                status: SearchStatus::Initializing,
            }
        );
    }

    #[test]
    fn test_request_stop_is_idempotent_and_ignores_idle() {
        let control = SearchControl::new();
        assert!(!control.request_stop());
        assert_eq!(control.status(), SearchStatus::Idle);

        control.begin_run("start search").unwrap();
        control.enter_running();
        assert!(control.request_stop());
        assert!(!control.request_stop());
        assert_eq!(control.status(), SearchStatus::Terminating);
    }

    #[test]
    fn test_stop_during_initialization_skips_running() {
        let control = SearchControl::new();
        control.begin_run("start search").unwrap();
        assert!(control.request_stop());
        assert!(!control.enter_running());
        assert_eq!(control.status(), SearchStatus::Terminating);
    }

    #[test]
    fn test_with_idle_gates_on_status() {
        let control = SearchControl::new();
        assert_eq!(control.with_idle("mutate", || 5).unwrap(), 5);

        control.begin_run("start search").unwrap();
        assert!(matches!(
            control.with_idle("mutate", || 5),
            Err(SearchError::NotIdle { .. })
        ));
        control.return_to_idle();

        control.dispose("dispose search").unwrap();
        assert!(matches!(
            control.with_idle("mutate", || 5),
            Err(SearchError::Disposed { .. })
        ));
    }

    #[test]
    fn test_dispose_fails_while_active() {
        let control = SearchControl::new();
        control.begin_run("start search").unwrap();
        assert!(matches!(
            control.dispose("dispose search"),
            Err(SearchError::NotIdle { .. })
        ));
    }

    #[test]
    fn test_snapshot_is_empty_before_first_run() {
        let control = SearchControl::new();
        let snapshot = control.snapshot();
        assert_eq!(snapshot.runtime, None);
        assert_eq!(snapshot.steps, None);
        assert_eq!(snapshot.min_delta, None);
        assert_eq!(snapshot.best_evaluation, None);
    }

    #[test]
    fn test_snapshot_reports_live_run_quantities() {
        let control = SearchControl::new();
        control.begin_run("start search").unwrap();
        control.stats().reset_for_run(control.now_ms());
        control.enter_running();

        control.stats().on_step();
        control.stats().on_step();
        control
            .stats()
            .on_improvement(control.now_ms(), 10.0, Some(2.5));
        control.stats().on_step();

        let snapshot = control.snapshot();
        assert!(snapshot.runtime.is_some());
        assert_eq!(snapshot.steps, Some(3));
        assert_eq!(snapshot.steps_without_improvement, Some(1));
        assert_eq!(snapshot.min_delta, Some(2.5));
        assert_eq!(snapshot.best_evaluation, Some(10.0));
    }

    #[test]
    fn test_snapshot_is_empty_while_initializing() {
        let control = SearchControl::new();
        control.begin_run("start search").unwrap();
        control.stats().reset_for_run(control.now_ms());
        let snapshot = control.snapshot();
        assert_eq!(snapshot.runtime, None);
        assert_eq!(snapshot.steps, None);
    }
}
