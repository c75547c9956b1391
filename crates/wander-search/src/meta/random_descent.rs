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

//! Random descent (first-improvement) metaheuristic.
//!
//! Each step draws a single random move from the neighbourhood and
//! accepts it exactly when it yields a valid, strictly better neighbour.
//! Worsening and equal moves are rejected, so the current solution walks
//! monotonically downhill (in oriented terms: uphill) until a stop
//! criterion fires. Because only one random neighbour is inspected per
//! step, random descent never proves local optimality; it is the cheap
//! baseline to pair with time or stagnation budgets.
//!
//! The search stops itself only when the neighbourhood cannot produce a
//! move at all.

use crate::meta::metaheuristic::Metaheuristic;
use crate::search::Step;
use tracing::debug;
use wander_core::{neigh::Neighbourhood, problem::Problem};

/// Accepts any randomly drawn move that improves the current solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomDescent;

impl RandomDescent {
    /// Creates a new random descent strategy.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<P, N> Metaheuristic<P, N> for RandomDescent
where
    P: Problem,
    N: Neighbourhood<P::Solution>,
{
    fn name(&self) -> &str {
        "RandomDescent"
    }

    fn search_step(&mut self, step: &mut Step<'_, P, N>) {
        match step.random_move(0) {
            Some(mv) => {
                if step.is_improvement(&mv) {
                    step.accept_move(mv);
                } else {
                    step.reject_move(&mv);
                }
            }
            None => {
                debug!("neighbourhood produced no move, stopping search");
                step.stop();
            }
        }
    }
}

