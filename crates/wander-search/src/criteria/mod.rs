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

//! Stop criteria: predicates over live search metadata.
//!
//! A stop criterion inspects a `StatsSnapshot` of the running search and
//! decides whether the search should terminate. Criteria are evaluated on
//! two paths: synchronously by the step loop after every step, and
//! periodically by the background checker thread. They are therefore
//! `Send + Sync` and purely read-only.

pub mod max_runtime;
pub mod max_steps;
pub mod max_steps_without_improvement;
pub mod max_time_without_improvement;
pub mod min_delta;
pub mod stop_criterion;

pub use max_runtime::MaxRuntime;
pub use max_steps::MaxSteps;
pub use max_steps_without_improvement::MaxStepsWithoutImprovement;
pub use max_time_without_improvement::MaxTimeWithoutImprovement;
pub use min_delta::MinDelta;
pub use stop_criterion::StopCriterion;
