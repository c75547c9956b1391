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

//! # Wander Core
//!
//! Problem model for the Wander local search ecosystem. This crate defines
//! the vocabulary shared by every search strategy: solutions, reversible
//! moves, neighbourhoods that generate them, objective evaluations with an
//! explicit optimization orientation, and mandatory as well as penalizing
//! constraints.
//!
//! ## Modules
//!
//! - `eval`: Objective evaluations (`Evaluation`) and the maximize/minimize
//!   `Orientation` that normalizes improvement deltas to "positive is
//!   better".
//! - `validation`: Validation outcomes (`Validation`,
//!   `PenalizingValidation`) and the constraint traits that produce them.
//! - `solution`: The `Solution` marker trait: deep copy through `Clone`,
//!   observational equality through `PartialEq`.
//! - `moves`: The `Move<S>` trait for reversible in-place perturbations,
//!   value-hashable so they can serve as cache keys.
//! - `neigh`: The `Neighbourhood<S>` trait with random sampling and full
//!   enumeration of the legal move set.
//! - `problem`: The `Problem` trait combining objective, constraints and
//!   random solution construction, with overridable delta variants for
//!   incremental move evaluation.
//!
//! The engine crates never inspect solution internals; everything they need
//! is expressed through these traits.

pub mod eval;
pub mod moves;
pub mod neigh;
pub mod problem;
pub mod solution;
pub mod validation;
