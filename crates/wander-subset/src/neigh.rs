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

//! The single-swap neighbourhood.
//!
//! Generates every move that exchanges one selected ID against one
//! unselected ID, keeping the selection size constant: the natural
//! neighbourhood of fixed-size subset problems. A set of fixed IDs may be
//! provided; fixed IDs are never swapped in or out, so an initially
//! selected fixed ID stays selected forever.
//!
//! The neighbourhood holds no mutable state and takes the random
//! generator as an argument, so one instance can serve concurrently
//! running searches.

use crate::{moves::SwapMove, solution::SubsetSolution};
use rand::seq::IndexedRandom;
use rand::RngCore;
use std::collections::HashSet;
use wander_core::neigh::Neighbourhood;

/// Generates swap moves between the selected and unselected part of a
/// subset solution, sparing a configurable set of fixed IDs.
#[derive(Debug, Clone, Default)]
pub struct SingleSwapNeighbourhood {
    fixed: HashSet<usize>,
}

impl SingleSwapNeighbourhood {
    /// Creates a neighbourhood swapping freely among all IDs.
    pub fn new() -> Self {
        Self {
            fixed: HashSet::new(),
        }
    }

    /// Creates a neighbourhood that never swaps the given fixed IDs.
    pub fn with_fixed_ids(fixed: impl IntoIterator<Item = usize>) -> Self {
        Self {
            fixed: fixed.into_iter().collect(),
        }
    }

    /// Returns the fixed IDs of this neighbourhood.
    #[inline]
    pub fn fixed_ids(&self) -> &HashSet<usize> {
        &self.fixed
    }

    /// Swappable deletion and addition candidates for `solution`, in
    /// ascending ID order.
    fn candidates(&self, solution: &SubsetSolution) -> (Vec<usize>, Vec<usize>) {
        let deletions: Vec<usize> = solution
            .selected_ids()
            .filter(|id| !self.fixed.contains(id))
            .collect();
        let additions: Vec<usize> = solution
            .unselected_ids()
            .filter(|id| !self.fixed.contains(id))
            .collect();
        (deletions, additions)
    }
}

impl Neighbourhood<SubsetSolution> for SingleSwapNeighbourhood {
    type Move = SwapMove;

    fn random_move(&self, solution: &SubsetSolution, rng: &mut dyn RngCore) -> Option<SwapMove> {
        let (deletions, additions) = self.candidates(solution);
        let del = *deletions.choose(rng)?;
        let add = *additions.choose(rng)?;
        Some(SwapMove::new(add, del))
    }

    fn all_moves(&self, solution: &SubsetSolution) -> Vec<SwapMove> {
        let (deletions, additions) = self.candidates(solution);
        if deletions.is_empty() || additions.is_empty() {
            return Vec::new();
        }
        let mut moves = Vec::with_capacity(deletions.len() * additions.len());
        for &del in &deletions {
            for &add in &additions {
                moves.push(SwapMove::new(add, del));
            }
        }
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_all_moves_enumerates_the_cartesian_product() {
        let neighbourhood = SingleSwapNeighbourhood::new();
        let solution = SubsetSolution::with_selection(5, [0, 1]);

        let moves = neighbourhood.all_moves(&solution);
        assert_eq!(moves.len(), 2 * 3);
        for mv in &moves {
            assert!(solution.is_selected(mv.deleted()));
            assert!(!solution.is_selected(mv.added()));
        }
    }

    #[test]
    fn test_random_moves_are_legal() {
        let neighbourhood = SingleSwapNeighbourhood::new();
        let solution = SubsetSolution::with_selection(10, [2, 4, 6]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..200 {
            let mv = neighbourhood.random_move(&solution, &mut rng).unwrap();
            assert!(solution.is_selected(mv.deleted()));
            assert!(!solution.is_selected(mv.added()));
        }
    }

    #[test]
    fn test_random_move_eventually_covers_the_move_set() {
        let neighbourhood = SingleSwapNeighbourhood::new();
        let solution = SubsetSolution::with_selection(4, [0, 1]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(neighbourhood.random_move(&solution, &mut rng).unwrap());
        }
        // 2 deletions x 2 additions; an unbiased sampler visits them all.
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_fixed_ids_are_never_swapped() {
        let neighbourhood = SingleSwapNeighbourhood::with_fixed_ids([3, 0]);
        let solution = SubsetSolution::with_selection(5, [0, 1, 3]);
        let mut rng = ChaCha8Rng::seed_from_u64(23);

        let moves = neighbourhood.all_moves(&solution);
        // Only 1 may leave and only 2 and 4 may enter the selection.
        assert_eq!(moves.len(), 2);
        for mv in &moves {
            assert_eq!(mv.deleted(), 1);
            assert!(mv.added() == 2 || mv.added() == 4);
        }

        for _ in 0..100 {
            let mv = neighbourhood.random_move(&solution, &mut rng).unwrap();
            assert_ne!(mv.added(), 3);
            assert_ne!(mv.deleted(), 3);
            assert_ne!(mv.added(), 0);
            assert_ne!(mv.deleted(), 0);
        }
    }

    #[test]
    fn test_empty_move_sets_yield_nothing() {
        let neighbourhood = SingleSwapNeighbourhood::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        // Everything selected: no addition candidates.
        let full = SubsetSolution::with_selection(3, [0, 1, 2]);
        assert!(neighbourhood.all_moves(&full).is_empty());
        assert_eq!(neighbourhood.random_move(&full, &mut rng), None);

        // Nothing selected: no deletion candidates.
        let empty = SubsetSolution::new(3);
        assert!(neighbourhood.all_moves(&empty).is_empty());
        assert_eq!(neighbourhood.random_move(&empty, &mut rng), None);

        // All swappable IDs fixed.
        let pinned = SingleSwapNeighbourhood::with_fixed_ids([0, 1, 2]);
        let solution = SubsetSolution::with_selection(3, [0]);
        assert!(pinned.all_moves(&solution).is_empty());
        assert_eq!(pinned.random_move(&solution, &mut rng), None);
    }
}
