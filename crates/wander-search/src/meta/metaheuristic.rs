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

//! The metaheuristic interface.
//!
//! A metaheuristic decides what happens within a single step of the
//! search loop: which moves to consider, which to accept, and when the
//! search has converged. It interacts with the engine exclusively through
//! the `Step` primitives, which keeps strategy code independent of the
//! lifecycle, caching and bookkeeping concerns the engine owns.

use crate::{err::SearchError, search::Step};
use wander_core::{neigh::Neighbourhood, problem::Problem};

/// A search strategy, executing one algorithm-specific step at a time.
pub trait Metaheuristic<P, N>: Send
where
    P: Problem,
    N: Neighbourhood<P::Solution>,
{
    /// Returns the name of this metaheuristic; doubles as the default
    /// search name.
    fn name(&self) -> &str;

    /// Validates the configuration against the search's neighbourhoods
    /// during initialization. The engine has already verified that the
    /// neighbourhood list is non-empty.
    fn validate(&self, _neighbourhoods: &[N]) -> Result<(), SearchError> {
        Ok(())
    }

    /// Called when a run starts, before the first step. Strategies reset
    /// per-run state such as memory structures here.
    fn search_started(&mut self) {}

    /// Executes a single step of the search.
    fn search_step(&mut self, step: &mut Step<'_, P, N>);
}
