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

//! Reversible solution perturbations.
//!
//! A move mutates a solution in place and carries its own inverse: applying
//! a move and then undoing it must restore the solution to its observable
//! pre-state. This apply/undo discipline lets the engine evaluate a
//! neighbour without copying the current solution, which is what makes the
//! step loop cheap.
//!
//! Moves are small values, typically a pair of indices. They are compared
//! and hashed by value so the evaluated-move cache can key on them, and
//! they are `'static` so problem implementations can recognize concrete
//! move types (via `Any` downcasting) to provide incremental delta
//! evaluation.

/// A reversible in-place perturbation of solutions of type `S`.
///
/// # Contract
///
/// `apply` followed by `undo` must restore the solution observationally
/// bit-exact: the solution compares equal (`PartialEq`) to its pre-state.
/// A move may only be applied to solutions it is legal for; applying an
/// illegal move is a caller bug.
pub trait Move<S>: Clone + Eq + std::hash::Hash + std::fmt::Debug + Send + 'static {
    /// Applies this move to the given solution.
    fn apply(&self, solution: &mut S);

    /// Undoes this move, assuming it was the last move applied.
    fn undo(&self, solution: &mut S);
}
