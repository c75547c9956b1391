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

//! Neighbourhoods: the legal move set of a solution.
//!
//! A neighbourhood maps a solution to the set of moves that may be applied
//! to it, either by drawing one move at random with an unbiased
//! distribution or by enumerating the full set. Neighbourhoods hold no
//! per-search state and take the random generator as an argument, so a
//! single instance can serve any number of concurrently running searches.
//!
//! The enumeration order of `all_moves` is deliberately part of the
//! contract: downstream selection ("best move wins, first encountered
//! breaks ties") inherits its determinism from it.

use crate::moves::Move;
use rand::RngCore;

/// A neighbourhood over solutions of type `S`, generating moves of one
/// concrete type.
pub trait Neighbourhood<S> {
    /// The type of moves generated by this neighbourhood.
    type Move: Move<S>;

    /// Draws a single move, unbiased over the legal move set for
    /// `solution`. Returns `None` if and only if that set is empty.
    fn random_move(&self, solution: &S, rng: &mut dyn RngCore) -> Option<Self::Move>;

    /// Enumerates every legal move for `solution`. May return an empty
    /// vector. The enumeration order is deterministic for a given solution.
    fn all_moves(&self, solution: &S) -> Vec<Self::Move>;
}

impl<S, N> Neighbourhood<S> for &N
where
    N: Neighbourhood<S> + ?Sized,
{
    type Move = N::Move;

    #[inline]
    fn random_move(&self, solution: &S, rng: &mut dyn RngCore) -> Option<Self::Move> {
        (**self).random_move(solution, rng)
    }

    #[inline]
    fn all_moves(&self, solution: &S) -> Vec<Self::Move> {
        (**self).all_moves(solution)
    }
}

impl<S, N> Neighbourhood<S> for Box<N>
where
    N: Neighbourhood<S> + ?Sized,
{
    type Move = N::Move;

    #[inline]
    fn random_move(&self, solution: &S, rng: &mut dyn RngCore) -> Option<Self::Move> {
        (**self).random_move(solution, rng)
    }

    #[inline]
    fn all_moves(&self, solution: &S) -> Vec<Self::Move> {
        (**self).all_moves(solution)
    }
}
