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

//! The problem contract.
//!
//! A problem owns the objective and the constraints. It evaluates and
//! validates full solutions, constructs random solutions, and declares the
//! optimization orientation. On top of that it offers *delta* variants that
//! evaluate or validate the neighbour obtained by applying a move to the
//! current solution. The default delta implementations fall back to full
//! evaluation by applying the move, computing, and undoing it; problems
//! that can do better override them with incremental arithmetic and
//! recognize their concrete move types by downcasting.
//!
//! Problems are shared-immutable: a single instance may be consulted by
//! any number of concurrently running searches, which is why the trait
//! requires `Send + Sync` and takes `&self` everywhere.

use crate::{
    eval::{Evaluation, Orientation},
    moves::Move,
    solution::Solution,
    validation::Validation,
};
use rand::RngCore;

/// A discrete optimization problem over solutions of type
/// `Self::Solution`.
pub trait Problem: Send + Sync {
    /// The solution type of this problem.
    type Solution: Solution;

    /// The direction in which the objective is optimized.
    fn orientation(&self) -> Orientation;

    /// Evaluates the given solution, penalizing constraint violations
    /// where the problem defines penalizing constraints.
    fn evaluate(&self, solution: &Self::Solution) -> Evaluation;

    /// Validates the given solution against the mandatory constraints.
    fn validate(&self, solution: &Self::Solution) -> Validation;

    /// Whether the given solution fails mandatory validation. Rejected
    /// solutions are ineligible to become the best solution of a search.
    #[inline]
    fn reject(&self, solution: &Self::Solution) -> bool {
        !self.validate(solution).passed()
    }

    /// Constructs a random solution, drawn from the given generator so
    /// that runs are reproducible under a fixed seed.
    fn random_solution(&self, rng: &mut dyn RngCore) -> Self::Solution;

    /// Evaluates the neighbour obtained by applying `mv` to `current`.
    ///
    /// The default implementation applies the move, evaluates the modified
    /// solution and undoes the move again. Overrides may compute the
    /// neighbour's evaluation incrementally from `current_evaluation`; in
    /// either case `current` must be observationally unchanged when this
    /// method returns.
    fn evaluate_move<M>(
        &self,
        mv: &M,
        current: &mut Self::Solution,
        _current_evaluation: &Evaluation,
    ) -> Evaluation
    where
        M: Move<Self::Solution>,
        Self: Sized,
    {
        mv.apply(current);
        let evaluation = self.evaluate(current);
        mv.undo(current);
        evaluation
    }

    /// Validates the neighbour obtained by applying `mv` to `current`.
    ///
    /// Same discipline as [`Problem::evaluate_move`]: the default applies,
    /// validates and undoes; overrides must leave `current` unchanged.
    fn validate_move<M>(
        &self,
        mv: &M,
        current: &mut Self::Solution,
        _current_validation: &Validation,
    ) -> Validation
    where
        M: Move<Self::Solution>,
        Self: Sized,
    {
        mv.apply(current);
        let validation = self.validate(current);
        mv.undo(current);
        validation
    }
}
