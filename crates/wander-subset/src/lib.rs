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

//! # Wander Subset
//!
//! The subset selection domain, the canonical concrete instantiation of
//! the Wander problem model: a universe of integer IDs is partitioned
//! into a selected and an unselected part, moves swap IDs across that
//! boundary, and the objective sums per-ID scores over the selection.
//!
//! ## Modules
//!
//! - `solution`: `SubsetSolution`, the selection stored as a bit set with
//!   the partition invariants held by construction.
//! - `moves`: `SwapMove`, the reversible swap of one selected against one
//!   unselected ID.
//! - `neigh`: `SingleSwapNeighbourhood`, generating swap moves for
//!   fixed-size subset problems, with optional immovable IDs.
//! - `problem`: `SubsetProblem`, the score-sum objective with subset-size
//!   validation, optional penalizing constraints and incremental swap
//!   evaluation.

pub mod moves;
pub mod neigh;
pub mod problem;
pub mod solution;
