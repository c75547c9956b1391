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

//! Variable neighbourhood descent metaheuristic.
//!
//! Works through an ordered list of neighbourhoods, typically sorted from
//! cheap to expensive. Each step performs a steepest-descent move in the
//! active neighbourhood; on improvement the strategy falls back to the
//! first neighbourhood, and on exhaustion it advances to the next. Once
//! every neighbourhood is exhausted the current solution is a local
//! optimum with respect to all of them, and the search stops.

use crate::meta::metaheuristic::Metaheuristic;
use crate::search::Step;
use tracing::debug;
use wander_core::{neigh::Neighbourhood, problem::Problem};

/// Best-improvement descent over an ordered list of neighbourhoods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariableNeighbourhoodDescent {
    index: usize,
}

impl VariableNeighbourhoodDescent {
    /// Creates a new variable neighbourhood descent strategy.
    #[inline]
    pub fn new() -> Self {
        Self { index: 0 }
    }
}

impl<P, N> Metaheuristic<P, N> for VariableNeighbourhoodDescent
where
    P: Problem,
    N: Neighbourhood<P::Solution>,
{
    fn name(&self) -> &str {
        "VariableNeighbourhoodDescent"
    }

    fn search_started(&mut self) {
        self.index = 0;
    }

    fn search_step(&mut self, step: &mut Step<'_, P, N>) {
        let moves = step.all_moves(self.index);
        match step.move_with_largest_delta(&moves, true) {
            Some(mv) => {
                step.accept_move(mv);
                self.index = 0;
            }
            None => {
                self.index += 1;
                if self.index >= step.num_neighbourhoods() {
                    debug!("all neighbourhoods exhausted, stopping search at local optimum");
                    step.stop();
                } else {
                    debug!(
                        neighbourhood = self.index,
                        "neighbourhood exhausted, advancing"
                    );
                }
            }
        }
    }
}
