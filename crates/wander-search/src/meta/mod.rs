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

//! The metaheuristics.
//!
//! Each metaheuristic implements a single step of the search against the
//! primitives exposed by `Step`; the engine supplies the loop, the
//! lifecycle, the counters and the stop-criterion machinery around it.

pub mod metaheuristic;
pub mod parallel_tempering;
pub mod random_descent;
pub mod steepest_descent;
pub mod tabu_search;
pub mod variable_neighbourhood;

pub use metaheuristic::Metaheuristic;
pub use parallel_tempering::ParallelTempering;
pub use random_descent::RandomDescent;
pub use steepest_descent::SteepestDescent;
pub use tabu_search::TabuSearch;
pub use variable_neighbourhood::VariableNeighbourhoodDescent;
