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

//! Step count limit.

use crate::{criteria::stop_criterion::StopCriterion, stats::StatsSnapshot};

/// Stops the search after a maximum number of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxSteps {
    limit: u64,
}

impl MaxSteps {
    /// Creates a step limit criterion.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero.
    #[inline]
    pub fn new(limit: u64) -> Self {
        assert!(
            limit > 0,
            "called `MaxSteps::new` with limit 0, expected a positive step limit"
        );
        Self { limit }
    }

    /// Returns the configured step limit.
    #[inline]
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl StopCriterion for MaxSteps {
    fn name(&self) -> &str {
        "MaxSteps"
    }

    fn search_should_stop(&self, stats: &StatsSnapshot) -> bool {
        stats.steps.is_some_and(|steps| steps >= self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_at_the_configured_step_count() {
        let criterion = MaxSteps::new(10);

        let below = StatsSnapshot {
            steps: Some(9),
            ..StatsSnapshot::default()
        };
        assert!(!criterion.search_should_stop(&below));

        let at = StatsSnapshot {
            steps: Some(10),
            ..StatsSnapshot::default()
        };
        assert!(criterion.search_should_stop(&at));
    }

    #[test]
    fn test_ignores_searches_without_steps() {
        let criterion = MaxSteps::new(10);
        assert!(!criterion.search_should_stop(&StatsSnapshot::default()));
    }

    #[test]
    #[should_panic(expected = "limit 0")]
    fn test_zero_limit_is_rejected() {
        let _ = MaxSteps::new(0);
    }
}
