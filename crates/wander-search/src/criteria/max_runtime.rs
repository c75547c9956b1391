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

//! Wall-clock runtime limit.
//!
//! Terminates a run once it has been going for at least the configured
//! duration. The reaction latency is bounded by the checker period plus
//! the duration of a single step, since the criterion is also polled
//! synchronously after every step.

use crate::{criteria::stop_criterion::StopCriterion, stats::StatsSnapshot};
use std::time::Duration;

/// Stops the search after a maximum wall-clock runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxRuntime {
    limit: Duration,
}

impl MaxRuntime {
    /// Creates a runtime limit criterion.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero.
    #[inline]
    pub fn new(limit: Duration) -> Self {
        assert!(
            !limit.is_zero(),
            "called `MaxRuntime::new` with a zero duration, expected a positive runtime limit"
        );
        Self { limit }
    }

    /// Returns the configured runtime limit.
    #[inline]
    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl StopCriterion for MaxRuntime {
    fn name(&self) -> &str {
        "MaxRuntime"
    }

    fn search_should_stop(&self, stats: &StatsSnapshot) -> bool {
        stats.runtime.is_some_and(|runtime| runtime >= self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_once_runtime_reaches_limit() {
        let criterion = MaxRuntime::new(Duration::from_millis(100));

        let before = StatsSnapshot {
            runtime: Some(Duration::from_millis(99)),
            ..StatsSnapshot::default()
        };
        assert!(!criterion.search_should_stop(&before));

        let at = StatsSnapshot {
            runtime: Some(Duration::from_millis(100)),
            ..StatsSnapshot::default()
        };
        assert!(criterion.search_should_stop(&at));
    }

    #[test]
    fn test_ignores_searches_without_runtime() {
        let criterion = MaxRuntime::new(Duration::from_millis(100));
        assert!(!criterion.search_should_stop(&StatsSnapshot::default()));
    }

    #[test]
    #[should_panic(expected = "zero duration")]
    fn test_zero_limit_is_rejected() {
        let _ = MaxRuntime::new(Duration::ZERO);
    }
}
