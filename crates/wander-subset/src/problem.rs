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

//! The subset selection problem.
//!
//! Scores one real value per ID and evaluates a solution as the sum of
//! scores over the selected IDs, maximizing by default. The selection
//! size is constrained to a fixed value or a `[min, max]` range through
//! mandatory validation, and arbitrary penalizing constraints can be
//! attached; their penalties are folded into the evaluation in the
//! orientation's unfavourable direction.
//!
//! Swap moves are evaluated incrementally: when the problem carries no
//! penalizing constraints, the neighbour's value is the current value
//! plus the score difference of the swapped pair, with no move
//! application needed. Swap validation is always incremental, since a
//! swap cannot
//! change the selection size. Other move types fall back to full
//! apply/compute/undo evaluation.

use crate::{moves::SwapMove, solution::SubsetSolution};
use rand::{Rng, RngCore};
use std::any::Any;
use wander_core::{
    eval::{Evaluation, Orientation},
    moves::Move,
    problem::Problem,
    validation::{PenalizingConstraint, Validation},
};

/// Error raised when constructing a misconfigured subset problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsetProblemError {
    /// The score list is empty, leaving no universe to select from.
    NoScores,
    /// The minimum subset size is zero.
    ZeroSubsetSize,
    /// The minimum subset size exceeds the maximum.
    InvalidSizeRange {
        /// Configured minimum size.
        min: usize,
        /// Configured maximum size.
        max: usize,
    },
    /// The maximum subset size exceeds the universe.
    SizeExceedsUniverse {
        /// Configured maximum size.
        max: usize,
        /// Size of the ID universe.
        universe: usize,
    },
}

impl std::fmt::Display for SubsetProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubsetProblemError::NoScores => {
                write!(f, "no scores provided, the ID universe is empty")
            }
            SubsetProblemError::ZeroSubsetSize => {
                write!(f, "subset size must be at least 1")
            }
            SubsetProblemError::InvalidSizeRange { min, max } => {
                write!(
                    f,
                    "inconsistent subset size range: minimum {} exceeds maximum {}",
                    min, max
                )
            }
            SubsetProblemError::SizeExceedsUniverse { max, universe } => {
                write!(
                    f,
                    "subset size {} exceeds the universe of {} IDs",
                    max, universe
                )
            }
        }
    }
}

impl std::error::Error for SubsetProblemError {}

/// Select a subset of IDs maximizing (or minimizing) the sum of their
/// scores, subject to a subset-size constraint and optional penalizing
/// constraints.
pub struct SubsetProblem {
    scores: Vec<f64>,
    min_size: usize,
    max_size: usize,
    orientation: Orientation,
    penalizing_constraints: Vec<Box<dyn PenalizingConstraint<SubsetSolution>>>,
}

impl SubsetProblem {
    /// Creates a fixed-size subset problem over `scores.len()` IDs,
    /// maximizing the score sum.
    pub fn new(scores: Vec<f64>, size: usize) -> Result<Self, SubsetProblemError> {
        Self::with_size_range(scores, size, size)
    }

    /// Creates a subset problem whose selection size may vary within
    /// `[min_size, max_size]`, maximizing the score sum.
    pub fn with_size_range(
        scores: Vec<f64>,
        min_size: usize,
        max_size: usize,
    ) -> Result<Self, SubsetProblemError> {
        if scores.is_empty() {
            return Err(SubsetProblemError::NoScores);
        }
        if min_size == 0 {
            return Err(SubsetProblemError::ZeroSubsetSize);
        }
        if min_size > max_size {
            return Err(SubsetProblemError::InvalidSizeRange {
                min: min_size,
                max: max_size,
            });
        }
        if max_size > scores.len() {
            return Err(SubsetProblemError::SizeExceedsUniverse {
                max: max_size,
                universe: scores.len(),
            });
        }
        Ok(Self {
            scores,
            min_size,
            max_size,
            orientation: Orientation::Maximize,
            penalizing_constraints: Vec::new(),
        })
    }

    /// Turns this into a minimizing problem.
    pub fn minimizing(mut self) -> Self {
        self.orientation = Orientation::Minimize;
        self
    }

    /// Sets the optimization orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Attaches a penalizing constraint; its penalty is folded into every
    /// evaluation. Full instead of incremental evaluation is used for all
    /// moves from then on.
    pub fn add_penalizing_constraint(
        &mut self,
        constraint: Box<dyn PenalizingConstraint<SubsetSolution>>,
    ) {
        self.penalizing_constraints.push(constraint);
    }

    /// Size of the ID universe.
    #[inline]
    pub fn universe_size(&self) -> usize {
        self.scores.len()
    }

    /// The per-ID scores.
    #[inline]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Minimum selection size.
    #[inline]
    pub fn min_subset_size(&self) -> usize {
        self.min_size
    }

    /// Maximum selection size.
    #[inline]
    pub fn max_subset_size(&self) -> usize {
        self.max_size
    }

    /// Whether the selection size is fixed.
    #[inline]
    pub fn has_fixed_size(&self) -> bool {
        self.min_size == self.max_size
    }

    fn raw_score(&self, solution: &SubsetSolution) -> f64 {
        solution.selected_ids().map(|id| self.scores[id]).sum()
    }
}

impl std::fmt::Debug for SubsetProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubsetProblem")
            .field("universe_size", &self.universe_size())
            .field("min_size", &self.min_size)
            .field("max_size", &self.max_size)
            .field("orientation", &self.orientation)
            .field(
                "penalizing_constraints",
                &self.penalizing_constraints.len(),
            )
            .finish()
    }
}

impl Problem for SubsetProblem {
    type Solution = SubsetSolution;

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn evaluate(&self, solution: &SubsetSolution) -> Evaluation {
        let mut evaluation = Evaluation::new(self.raw_score(solution));
        for constraint in &self.penalizing_constraints {
            evaluation = evaluation.with_penalty(&constraint.validate(solution), self.orientation);
        }
        evaluation
    }

    fn validate(&self, solution: &SubsetSolution) -> Validation {
        let size = solution.num_selected();
        Validation::new(size >= self.min_size && size <= self.max_size)
    }

    fn random_solution(&self, rng: &mut dyn RngCore) -> SubsetSolution {
        let size = if self.has_fixed_size() {
            self.min_size
        } else {
            rng.random_range(self.min_size..=self.max_size)
        };
        let ids = rand::seq::index::sample(rng, self.universe_size(), size);
        SubsetSolution::with_selection(self.universe_size(), ids)
    }

    fn evaluate_move<M>(
        &self,
        mv: &M,
        current: &mut SubsetSolution,
        current_evaluation: &Evaluation,
    ) -> Evaluation
    where
        M: Move<SubsetSolution>,
    {
        if self.penalizing_constraints.is_empty() {
            let any: &dyn Any = mv;
            if let Some(swap) = any.downcast_ref::<SwapMove>() {
                return Evaluation::new(
                    current_evaluation.value() + self.scores[swap.added()]
                        - self.scores[swap.deleted()],
                );
            }
        }
        mv.apply(current);
        let evaluation = self.evaluate(current);
        mv.undo(current);
        evaluation
    }

    fn validate_move<M>(
        &self,
        mv: &M,
        current: &mut SubsetSolution,
        current_validation: &Validation,
    ) -> Validation
    where
        M: Move<SubsetSolution>,
    {
        // A swap never changes the selection size, so the neighbour
        // validates exactly like the current solution.
        let any: &dyn Any = mv;
        if any.downcast_ref::<SwapMove>().is_some() {
            return *current_validation;
        }
        mv.apply(current);
        let validation = self.validate(current);
        mv.undo(current);
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use wander_core::validation::PenalizingValidation;

    fn scores_zero_to_nine() -> Vec<f64> {
        (0..10).map(|id| id as f64).collect()
    }

    #[test]
    fn test_constructor_validates_its_configuration() {
        assert_eq!(
            SubsetProblem::new(Vec::new(), 1).unwrap_err(),
            SubsetProblemError::NoScores
        );
        assert_eq!(
            SubsetProblem::new(vec![1.0, 2.0], 0).unwrap_err(),
            SubsetProblemError::ZeroSubsetSize
        );
        assert_eq!(
            SubsetProblem::with_size_range(vec![1.0, 2.0], 2, 1).unwrap_err(),
            SubsetProblemError::InvalidSizeRange { min: 2, max: 1 }
        );
        assert_eq!(
            SubsetProblem::new(vec![1.0, 2.0], 3).unwrap_err(),
            SubsetProblemError::SizeExceedsUniverse {
                max: 3,
                universe: 2
            }
        );
    }

    #[test]
    fn test_evaluation_sums_selected_scores() {
        let problem = SubsetProblem::new(scores_zero_to_nine(), 3).unwrap();
        let solution = SubsetSolution::with_selection(10, [7, 8, 9]);
        assert_eq!(problem.evaluate(&solution).value(), 24.0);
    }

    #[test]
    fn test_validation_enforces_the_size_range() {
        let problem = SubsetProblem::with_size_range(scores_zero_to_nine(), 2, 4).unwrap();

        let too_small = SubsetSolution::with_selection(10, [1]);
        assert!(!problem.validate(&too_small).passed());
        assert!(problem.reject(&too_small));

        let fits = SubsetSolution::with_selection(10, [1, 2, 3]);
        assert!(problem.validate(&fits).passed());

        let too_large = SubsetSolution::with_selection(10, [0, 1, 2, 3, 4]);
        assert!(!problem.validate(&too_large).passed());
    }

    #[test]
    fn test_random_solutions_respect_the_size_constraint() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        let fixed = SubsetProblem::new(scores_zero_to_nine(), 3).unwrap();
        for _ in 0..50 {
            let solution = fixed.random_solution(&mut rng);
            assert_eq!(solution.num_selected(), 3);
            assert!(!fixed.reject(&solution));
        }

        let ranged = SubsetProblem::with_size_range(scores_zero_to_nine(), 2, 5).unwrap();
        for _ in 0..50 {
            let solution = ranged.random_solution(&mut rng);
            assert!((2..=5).contains(&solution.num_selected()));
        }
    }

    #[test]
    fn test_swap_delta_evaluation_matches_full_evaluation() {
        let problem = SubsetProblem::new(scores_zero_to_nine(), 3).unwrap();
        let mut current = SubsetSolution::with_selection(10, [0, 1, 2]);
        let current_evaluation = problem.evaluate(&current);
        let untouched = current.clone();

        let mv = SwapMove::new(9, 0);
        let delta_evaluation = problem.evaluate_move(&mv, &mut current, &current_evaluation);

        assert_eq!(current, untouched);
        let neighbour = SubsetSolution::with_selection(10, [9, 1, 2]);
        assert_eq!(
            delta_evaluation.value(),
            problem.evaluate(&neighbour).value()
        );
    }

    #[test]
    fn test_swap_validation_is_inherited_from_the_current_solution() {
        let problem = SubsetProblem::new(scores_zero_to_nine(), 3).unwrap();
        let mut current = SubsetSolution::with_selection(10, [0, 1, 2]);
        let current_validation = problem.validate(&current);

        let mv = SwapMove::new(5, 1);
        let validation = problem.validate_move(&mv, &mut current, &current_validation);
        assert!(validation.passed());
    }

    struct ForbidId {
        id: usize,
        penalty: f64,
    }

    impl PenalizingConstraint<SubsetSolution> for ForbidId {
        fn validate(&self, solution: &SubsetSolution) -> PenalizingValidation {
            if solution.is_selected(self.id) {
                PenalizingValidation::with_penalty(self.penalty)
            } else {
                PenalizingValidation::PASSED
            }
        }
    }

    #[test]
    fn test_penalties_push_the_evaluation_in_the_unfavourable_direction() {
        let mut maximizing = SubsetProblem::new(scores_zero_to_nine(), 3).unwrap();
        maximizing.add_penalizing_constraint(Box::new(ForbidId {
            id: 9,
            penalty: 2.5,
        }));
        let solution = SubsetSolution::with_selection(10, [7, 8, 9]);
        assert_eq!(maximizing.evaluate(&solution).value(), 21.5);

        let mut minimizing = SubsetProblem::new(scores_zero_to_nine(), 3)
            .unwrap()
            .minimizing();
        minimizing.add_penalizing_constraint(Box::new(ForbidId {
            id: 9,
            penalty: 2.5,
        }));
        assert_eq!(minimizing.evaluate(&solution).value(), 26.5);
    }

    #[test]
    fn test_penalizing_constraints_disable_the_swap_shortcut() {
        let mut problem = SubsetProblem::new(scores_zero_to_nine(), 3).unwrap();
        problem.add_penalizing_constraint(Box::new(ForbidId {
            id: 9,
            penalty: 2.5,
        }));

        let mut current = SubsetSolution::with_selection(10, [0, 1, 2]);
        let current_evaluation = problem.evaluate(&current);

        // Swapping 9 in must include its penalty, which only the full
        // evaluation path can see.
        let mv = SwapMove::new(9, 0);
        let evaluation = problem.evaluate_move(&mv, &mut current, &current_evaluation);
        assert_eq!(evaluation.value(), 3.0 - 0.0 + 9.0 - 2.5);
    }
}
