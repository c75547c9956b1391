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

//! Objective evaluations and optimization orientation.
//!
//! An `Evaluation` wraps the real-valued objective of a solution. Whether a
//! larger or a smaller value is preferable is not a property of the value
//! itself but of the problem, expressed through `Orientation`. All engine
//! code compares evaluations through `Orientation::delta`, which normalizes
//! the sign so that a positive delta always means "the new value is
//! better". This keeps a single comparison path for maximizing and
//! minimizing problems alike.

use crate::validation::PenalizingValidation;

/// Direction in which the objective is optimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Larger evaluations are better.
    #[default]
    Maximize,
    /// Smaller evaluations are better.
    Minimize,
}

impl Orientation {
    /// Signed improvement of `new` relative to `old`, oriented so that a
    /// positive result always means that `new` is preferable.
    #[inline]
    pub fn delta(self, new: f64, old: f64) -> f64 {
        match self {
            Orientation::Maximize => new - old,
            Orientation::Minimize => old - new,
        }
    }

    /// Whether `new` is a strict improvement over `old`.
    #[inline]
    pub fn improves(self, new: f64, old: f64) -> bool {
        self.delta(new, old) > 0.0
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Maximize => write!(f, "maximize"),
            Orientation::Minimize => write!(f, "minimize"),
        }
    }
}

/// The evaluated objective value of a solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    value: f64,
}

impl Evaluation {
    /// Wraps a raw objective value.
    #[inline]
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// Returns the raw objective value.
    #[inline]
    pub fn value(self) -> f64 {
        self.value
    }

    /// Composes a penalizing validation into this evaluation. The penalty
    /// pushes the value in the unfavourable direction: it is subtracted
    /// when maximizing and added when minimizing, so a violated penalizing
    /// constraint always makes a solution look worse.
    #[inline]
    pub fn with_penalty(self, validation: &PenalizingValidation, orientation: Orientation) -> Self {
        let value = match orientation {
            Orientation::Maximize => self.value - validation.penalty(),
            Orientation::Minimize => self.value + validation.penalty(),
        };
        Self { value }
    }
}

impl From<f64> for Evaluation {
    #[inline]
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_is_oriented_towards_improvement() {
        assert_eq!(Orientation::Maximize.delta(5.0, 3.0), 2.0);
        assert_eq!(Orientation::Maximize.delta(3.0, 5.0), -2.0);
        assert_eq!(Orientation::Minimize.delta(3.0, 5.0), 2.0);
        assert_eq!(Orientation::Minimize.delta(5.0, 3.0), -2.0);
    }

    #[test]
    fn test_improves_is_strict() {
        assert!(Orientation::Maximize.improves(5.0, 3.0));
        assert!(!Orientation::Maximize.improves(3.0, 3.0));
        assert!(!Orientation::Maximize.improves(2.0, 3.0));
        assert!(Orientation::Minimize.improves(2.0, 3.0));
        assert!(!Orientation::Minimize.improves(3.0, 3.0));
    }

    #[test]
    fn test_penalty_pushes_in_unfavourable_direction() {
        let evaluation = Evaluation::new(10.0);
        let violated = PenalizingValidation::with_penalty(4.0);

        let maximized = evaluation.with_penalty(&violated, Orientation::Maximize);
        assert_eq!(maximized.value(), 6.0);

        let minimized = evaluation.with_penalty(&violated, Orientation::Minimize);
        assert_eq!(minimized.value(), 14.0);
    }

    #[test]
    fn test_passed_validation_leaves_evaluation_untouched() {
        let evaluation = Evaluation::new(10.0);
        let passed = PenalizingValidation::PASSED;

        assert_eq!(
            evaluation
                .with_penalty(&passed, Orientation::Maximize)
                .value(),
            10.0
        );
        assert_eq!(
            evaluation
                .with_penalty(&passed, Orientation::Minimize)
                .value(),
            10.0
        );
    }
}
