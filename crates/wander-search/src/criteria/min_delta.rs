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

//! Convergence limit on improvement size.
//!
//! Terminates a run once the smallest strictly positive improvement
//! observed so far drops below the configured threshold, meaning the
//! improvements have become too small to be worth chasing. Runs that have
//! not improved at all are never stopped by this criterion.

use crate::{criteria::stop_criterion::StopCriterion, stats::StatsSnapshot};

/// Stops the search once improvements become smaller than a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinDelta {
    threshold: f64,
}

impl MinDelta {
    /// Creates a minimum-delta criterion.
    ///
    /// # Panics
    ///
    /// Panics if `threshold` is not a positive finite value.
    #[inline]
    pub fn new(threshold: f64) -> Self {
        assert!(
            threshold.is_finite() && threshold > 0.0,
            "called `MinDelta::new` with threshold {}, expected a positive finite value",
            threshold
        );
        Self { threshold }
    }

    /// Returns the configured threshold.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl StopCriterion for MinDelta {
    fn name(&self) -> &str {
        "MinDelta"
    }

    fn search_should_stop(&self, stats: &StatsSnapshot) -> bool {
        stats.min_delta.is_some_and(|delta| delta < self.threshold)
    }
}
