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

//! Tabu search metaheuristic.
//!
//! Tabu search escapes local optima by accepting the best admissible move
//! of each step even when it worsens the current solution, while a
//! bounded short-term memory of recently applied moves forbids undoing
//! the escape immediately. A move is admissible when it is not tabu, or
//! when it satisfies the aspiration criterion: a tabu move that would
//! beat the best solution found so far is always allowed through.
//!
//! # Mechanics
//!
//! 1. The memory is a FIFO of the last `tenure` applied moves, backed by
//!    a hash set for constant-time membership tests. Moves compare by
//!    value, so a swap re-introducing a recently swapped pair is caught.
//! 2. Each step enumerates the neighbourhood, filters for admissibility
//!    and accepts the move with the largest delta, positive or not.
//! 3. When nothing is admissible, the search has painted itself into a
//!    corner and stops.
//!
//! The memory is cleared at the start of each run; the current and best
//! solutions are retained across runs as usual.

use crate::meta::metaheuristic::Metaheuristic;
use crate::search::Step;
use std::collections::{HashSet, VecDeque};
use tracing::debug;
use wander_core::{neigh::Neighbourhood, problem::Problem};

/// Best-admissible-move search with a bounded tabu memory over moves.
///
/// A tenure of 7 to 20 is a common starting point for subset problems.
#[derive(Debug, Clone)]
pub struct TabuSearch<M> {
    tenure: usize,
    queue: VecDeque<M>,
    set: HashSet<M>,
}

impl<M> TabuSearch<M>
where
    M: Clone + Eq + std::hash::Hash,
{
    /// Creates a tabu search with the given memory size.
    ///
    /// # Panics
    ///
    /// Panics if `tenure` is 0.
    pub fn new(tenure: usize) -> Self {
        assert!(
            tenure > 0,
            "called `TabuSearch::new` with tenure 0, but tenure must be greater than 0"
        );
        Self {
            tenure,
            queue: VecDeque::with_capacity(tenure),
            set: HashSet::with_capacity(tenure),
        }
    }

    /// Returns the configured memory size.
    #[inline]
    pub fn tenure(&self) -> usize {
        self.tenure
    }

    #[inline]
    fn is_tabu(&self, mv: &M) -> bool {
        self.set.contains(mv)
    }

    /// Records an applied move, expiring the oldest entry when full.
    fn make_tabu(&mut self, mv: M) {
        if self.queue.len() >= self.tenure {
            if let Some(oldest) = self.queue.pop_front() {
                self.set.remove(&oldest);
            }
        }
        if self.set.insert(mv.clone()) {
            self.queue.push_back(mv);
        }
    }

    fn clear(&mut self) {
        self.queue.clear();
        self.set.clear();
    }
}

impl<P, N> Metaheuristic<P, N> for TabuSearch<N::Move>
where
    P: Problem,
    N: Neighbourhood<P::Solution>,
{
    fn name(&self) -> &str {
        "TabuSearch"
    }

    fn search_started(&mut self) {
        self.clear();
    }

    fn search_step(&mut self, step: &mut Step<'_, P, N>) {
        let moves = step.all_moves(0);
        let best_evaluation = step.best_evaluation();

        let admissible: Vec<N::Move> = moves
            .into_iter()
            .filter(|mv| {
                if !self.is_tabu(mv) {
                    return true;
                }
                // Aspiration: a tabu move that beats the best solution
                // found so far is admissible regardless.
                step.validate_move(mv)
                    && best_evaluation.is_none_or(|best| {
                        step.orientation().delta(step.evaluate_move(mv), best) > 0.0
                    })
            })
            .collect();

        match step.move_with_largest_delta(&admissible, false) {
            Some(mv) => {
                self.make_tabu(mv.clone());
                step.accept_move(mv);
            }
            None => {
                debug!("no admissible move left, stopping tabu search");
                step.stop();
            }
        }
    }
}
