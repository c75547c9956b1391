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

//! Validation outcomes and constraint traits.
//!
//! Two flavours of constraints exist. A mandatory `Constraint` decides
//! whether a solution is acceptable at all: solutions failing one are
//! *rejected* and can never become the best solution of a search. A
//! `PenalizingConstraint` never rejects; instead it assigns a nonnegative
//! penalty that the problem folds into the evaluation, softly steering the
//! search away from violations. A penalizing validation passes exactly
//! when its penalty is zero.

/// Outcome of a mandatory constraint check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Validation(bool);

impl Validation {
    /// A validation that passed.
    pub const PASSED: Validation = Validation(true);

    /// A validation that failed.
    pub const FAILED: Validation = Validation(false);

    /// Wraps a raw validation outcome.
    #[inline]
    pub fn new(passed: bool) -> Self {
        Self(passed)
    }

    /// Whether the validated solution is acceptable.
    #[inline]
    pub fn passed(self) -> bool {
        self.0
    }
}

impl std::fmt::Display for Validation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 {
            write!(f, "passed")
        } else {
            write!(f, "failed")
        }
    }
}

/// Outcome of a penalizing constraint check.
///
/// The penalty is zero if and only if the validation passed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenalizingValidation {
    penalty: f64,
}

impl PenalizingValidation {
    /// A validation that passed, carrying no penalty.
    pub const PASSED: PenalizingValidation = PenalizingValidation { penalty: 0.0 };

    /// Creates a validation with the given penalty. A penalty of zero
    /// denotes a passed validation.
    ///
    /// # Panics
    ///
    /// Panics if `penalty` is negative or not finite.
    #[inline]
    pub fn with_penalty(penalty: f64) -> Self {
        assert!(
            penalty.is_finite() && penalty >= 0.0,
            "called `PenalizingValidation::with_penalty` with invalid penalty {}, expected a finite nonnegative value",
            penalty
        );
        Self { penalty }
    }

    /// Returns the assigned penalty.
    #[inline]
    pub fn penalty(self) -> f64 {
        self.penalty
    }

    /// Whether the validated solution satisfies the constraint.
    #[inline]
    pub fn passed(self) -> bool {
        self.penalty == 0.0
    }
}

impl std::fmt::Display for PenalizingValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.passed() {
            write!(f, "passed")
        } else {
            write!(f, "failed (penalty: {})", self.penalty)
        }
    }
}

/// A mandatory constraint on solutions of type `S`.
///
/// Solutions failing a mandatory constraint are rejected outright.
pub trait Constraint<S>: Send + Sync {
    /// Validates the given solution.
    fn validate(&self, solution: &S) -> Validation;
}

/// A penalizing constraint on solutions of type `S`.
///
/// Violations do not reject a solution; they assign a penalty that the
/// problem composes into the evaluation.
pub trait PenalizingConstraint<S>: Send + Sync {
    /// Validates the given solution, assigning a penalty on violation.
    fn validate(&self, solution: &S) -> PenalizingValidation;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_outcomes() {
        assert!(Validation::PASSED.passed());
        assert!(!Validation::FAILED.passed());
        assert!(Validation::new(true).passed());
        assert!(!Validation::new(false).passed());
    }

    #[test]
    fn test_penalizing_validation_passes_iff_penalty_is_zero() {
        assert!(PenalizingValidation::PASSED.passed());
        assert_eq!(PenalizingValidation::PASSED.penalty(), 0.0);

        let violated = PenalizingValidation::with_penalty(2.5);
        assert!(!violated.passed());
        assert_eq!(violated.penalty(), 2.5);

        let zero = PenalizingValidation::with_penalty(0.0);
        assert!(zero.passed());
    }

    #[test]
    #[should_panic(expected = "invalid penalty")]
    fn test_negative_penalty_is_rejected() {
        let _ = PenalizingValidation::with_penalty(-1.0);
    }
}
