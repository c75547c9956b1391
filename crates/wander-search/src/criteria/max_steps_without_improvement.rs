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

//! Stagnation limit on step count.

use crate::{criteria::stop_criterion::StopCriterion, stats::StatsSnapshot};

/// Stops the search after a maximum number of steps without improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxStepsWithoutImprovement {
    limit: u64,
}

impl MaxStepsWithoutImprovement {
    /// Creates a stagnation step limit criterion.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero.
    #[inline]
    pub fn new(limit: u64) -> Self {
        assert!(
            limit > 0,
            "called `MaxStepsWithoutImprovement::new` with limit 0, expected a positive limit"
        );
        Self { limit }
    }

    /// Returns the configured stagnation limit.
    #[inline]
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl StopCriterion for MaxStepsWithoutImprovement {
    fn name(&self) -> &str {
        "MaxStepsWithoutImprovement"
    }

    fn search_should_stop(&self, stats: &StatsSnapshot) -> bool {
        stats
            .steps_without_improvement
            .is_some_and(|stagnation| stagnation >= self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triggers_on_stagnation() {
        let criterion = MaxStepsWithoutImprovement::new(100);

        let improving = StatsSnapshot {
            steps_without_improvement: Some(99),
            ..StatsSnapshot::default()
        };
        assert!(!criterion.search_should_stop(&improving));

        let stagnant = StatsSnapshot {
            steps_without_improvement: Some(100),
            ..StatsSnapshot::default()
        };
        assert!(criterion.search_should_stop(&stagnant));
    }

    #[test]
    fn test_ignores_searches_without_metadata() {
        let criterion = MaxStepsWithoutImprovement::new(100);
        assert!(!criterion.search_should_stop(&StatsSnapshot::default()));
    }
}
