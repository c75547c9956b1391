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

//! # Wander Search
//!
//! The local search engine of the Wander ecosystem. This crate drives
//! problems defined through `wander-core`: it owns the search lifecycle
//! (status state machine, listeners, best-solution tracking), the
//! neighbourhood-search step loop with its current solution and
//! accepted/rejected accounting, the evaluated-move cache that amortizes
//! repeated move evaluation within a step, and the stop-criterion
//! machinery with its periodic background checker.
//!
//! ## Modules
//!
//! - `status` / `err`: The search status state machine and the error
//!   taxonomy of lifecycle violations.
//! - `control` / `stats`: Thread-safe status transitions and the per-run
//!   metadata counters readable from any thread.
//! - `criteria` / `checker`: Stop criterion predicates over live search
//!   metadata, polled synchronously every step and periodically from a
//!   cooperating background thread.
//! - `listener`: Callback interface observing lifecycle events, new best
//!   solutions and current-solution modifications.
//! - `cache`: The advisory evaluated-move cache with its single-slot
//!   default implementation.
//! - `search`: `LocalSearch`, the neighbourhood search engine, and the
//!   `Step` context exposing the move primitives to metaheuristics.
//! - `meta`: The metaheuristics: random descent, steepest descent, tabu
//!   search, variable neighbourhood descent and parallel tempering.
//!
//! A search blocks the calling thread in `start()` for the duration of a
//! run and may be shared across threads: `stop()` and all getters are safe
//! to call concurrently, while configuration mutators require the search
//! to be idle.

pub mod cache;
pub mod checker;
pub mod constants;
pub mod control;
pub mod criteria;
pub mod err;
pub mod listener;
pub mod meta;
pub mod search;
pub mod stats;
pub mod status;
