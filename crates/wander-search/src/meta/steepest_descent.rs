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

//! Steepest descent (best-improvement) metaheuristic.
//!
//! Each step enumerates the full neighbourhood, selects the valid move
//! with the largest strictly positive delta and accepts it. When no such
//! move exists the current solution is a local optimum under the move
//! set, and the search stops itself. Steepest descent is the one
//! strategy here that terminates with a proof of local optimality rather
//! than by budget.
//!
//! Enumerating every move makes a step linear in the neighbourhood size;
//! on fixed-size subset problems this is the product of selected and
//! unselected counts.

use crate::meta::metaheuristic::Metaheuristic;
use crate::search::Step;
use tracing::debug;
use wander_core::{neigh::Neighbourhood, problem::Problem};

/// Accepts the best strictly improving move, stopping at local optima.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SteepestDescent;

impl SteepestDescent {
    /// Creates a new steepest descent strategy.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<P, N> Metaheuristic<P, N> for SteepestDescent
where
    P: Problem,
    N: Neighbourhood<P::Solution>,
{
    fn name(&self) -> &str {
        "SteepestDescent"
    }

    fn search_step(&mut self, step: &mut Step<'_, P, N>) {
        let moves = step.all_moves(0);
        match step.move_with_largest_delta(&moves, true) {
            Some(mv) => step.accept_move(mv),
            None => {
                debug!("no improving move left, stopping search at local optimum");
                step.stop();
            }
        }
    }
}
