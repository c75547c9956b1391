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

//! The stop-criterion checker.
//!
//! The checker owns the stop criteria of a search together with the check
//! period. While a search runs, a single background thread wakes every
//! period, snapshots the live metadata and asks each criterion whether
//! the search should stop; on the first affirmative answer it requests a
//! cooperative stop and exits. Independently of the period, the step loop
//! polls `stop_criterion_satisfied` after every step, so short budgets
//! react with single-step latency even under a long period.
//!
//! Cancellation goes through a condition variable rather than a plain
//! sleep, so `stop_checking` returns as soon as the worker observes the
//! flag; it must complete before the search returns to idle. The checker
//! never mutates search state other than through `request_stop`.

use crate::{control::SearchControl, criteria::stop_criterion::StopCriterion};
use parking_lot::{Condvar, Mutex};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// Default period between two background criterion checks.
pub const DEFAULT_CHECK_PERIOD: Duration = Duration::from_secs(1);

struct CancelToken {
    cancelled: Mutex<bool>,
    signal: Condvar,
}

impl CancelToken {
    fn new() -> Self {
        Self {
            cancelled: Mutex::new(false),
            signal: Condvar::new(),
        }
    }
}

/// Periodic background checker plus synchronous poll for the stop
/// criteria of one search.
pub struct StopCriterionChecker {
    criteria: Vec<Arc<dyn StopCriterion>>,
    period: Duration,
    cancel: Arc<CancelToken>,
    handle: Option<JoinHandle<()>>,
}

impl StopCriterionChecker {
    /// Creates a checker without criteria, using the default check
    /// period.
    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
            period: DEFAULT_CHECK_PERIOD,
            cancel: Arc::new(CancelToken::new()),
            handle: None,
        }
    }

    /// Adds a stop criterion.
    pub fn add(&mut self, criterion: Arc<dyn StopCriterion>) {
        self.criteria.push(criterion);
    }

    /// Removes a previously added criterion, matched by identity.
    /// Returns whether the criterion was present.
    pub fn remove(&mut self, criterion: &Arc<dyn StopCriterion>) -> bool {
        let before = self.criteria.len();
        self.criteria
            .retain(|registered| !Arc::ptr_eq(registered, criterion));
        self.criteria.len() != before
    }

    /// Returns the number of registered criteria.
    #[inline]
    pub fn num_criteria(&self) -> usize {
        self.criteria.len()
    }

    /// Sets the period between two background checks.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn set_period(&mut self, period: Duration) {
        assert!(
            !period.is_zero(),
            "called `StopCriterionChecker::set_period` with a zero duration, expected a positive period"
        );
        self.period = period;
    }

    /// Returns the period between two background checks.
    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the background worker is currently alive.
    #[inline]
    pub fn is_checking(&self) -> bool {
        self.handle.is_some()
    }

    /// Starts the background worker. A no-op when no criteria are
    /// registered; the step loop's synchronous poll is a no-op then as
    /// well, so such a search only terminates through its own step logic
    /// or an external stop request.
    pub fn start_checking(&mut self, control: Arc<SearchControl>) {
        debug_assert!(
            self.handle.is_none(),
            "called `StopCriterionChecker::start_checking` while already checking"
        );
        self.stop_checking();
        if self.criteria.is_empty() {
            return;
        }

        self.cancel = Arc::new(CancelToken::new());
        let cancel = Arc::clone(&self.cancel);
        let criteria = self.criteria.clone();
        let period = self.period;

        let spawned = std::thread::Builder::new()
            .name("wander-stop-criterion-checker".to_string())
            .spawn(move || {
                loop {
                    {
                        let mut cancelled = cancel.cancelled.lock();
                        if !*cancelled {
                            let _ = cancel.signal.wait_for(&mut cancelled, period);
                        }
                        if *cancelled {
                            break;
                        }
                    }
                    if !control.status().is_active() {
                        break;
                    }
                    let snapshot = control.snapshot();
                    if let Some(criterion) = criteria
                        .iter()
                        .find(|criterion| satisfied(criterion.as_ref(), &snapshot))
                    {
                        debug!(
                            criterion = criterion.name(),
                            "stop criterion satisfied, requesting stop"
                        );
                        control.request_stop();
                        break;
                    }
                }
            });

        match spawned {
            Ok(handle) => self.handle = Some(handle),
            // The search still polls criteria synchronously every step.
            Err(error) => warn!(%error, "failed to spawn stop criterion checker"),
        }
    }

    /// Cancels and joins the background worker. Idempotent; returns only
    /// once the worker has exited.
    pub fn stop_checking(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        {
            let mut cancelled = self.cancel.cancelled.lock();
            *cancelled = true;
        }
        self.cancel.signal.notify_all();
        if handle.join().is_err() {
            warn!("stop criterion checker thread panicked");
        }
    }

    /// Synchronously evaluates the criteria against the current metadata;
    /// called by the step loop after every step.
    pub fn stop_criterion_satisfied(&self, control: &SearchControl) -> bool {
        if self.criteria.is_empty() {
            return false;
        }
        let snapshot = control.snapshot();
        self.criteria
            .iter()
            .any(|criterion| satisfied(criterion.as_ref(), &snapshot))
    }
}

impl Default for StopCriterionChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StopCriterionChecker {
    fn drop(&mut self) {
        self.stop_checking();
    }
}

impl std::fmt::Debug for StopCriterionChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self
            .criteria
            .iter()
            .map(|criterion| criterion.name())
            .collect::<Vec<&str>>()
            .join(", ");
        f.debug_struct("StopCriterionChecker")
            .field("criteria", &names)
            .field("period", &self.period)
            .field("checking", &self.is_checking())
            .finish()
    }
}

/// Evaluates one criterion, treating a panic as "should stop" so a broken
/// criterion fails safe.
fn satisfied(criterion: &dyn StopCriterion, snapshot: &crate::stats::StatsSnapshot) -> bool {
    match catch_unwind(AssertUnwindSafe(|| criterion.search_should_stop(snapshot))) {
        Ok(should_stop) => should_stop,
        Err(_) => {
            warn!(
                criterion = criterion.name(),
                "stop criterion panicked, treating as satisfied"
            );
            true
        }
    }
}
