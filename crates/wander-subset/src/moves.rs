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

//! Swap moves on subset solutions.
//!
//! A swap removes one ID from the selection and adds another, keeping the
//! selection size constant. Swaps are compared and hashed over their two
//! operative fields, which makes them usable as evaluated-move cache keys
//! and tabu memory entries.

use crate::solution::SubsetSolution;
use wander_core::moves::Move;

/// Removes `del` from the selection and adds `add` in its place; the
/// inverse operation restores the previous selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapMove {
    add: usize,
    del: usize,
}

impl SwapMove {
    /// Creates a swap adding `add` to and removing `del` from the
    /// selection.
    ///
    /// # Panics
    ///
    /// Panics if `add` and `del` are the same ID.
    #[inline]
    pub fn new(add: usize, del: usize) -> Self {
        assert!(
            add != del,
            "called `SwapMove::new` with identical IDs {}, a swap must move two distinct IDs",
            add
        );
        Self { add, del }
    }

    /// The ID added to the selection.
    #[inline]
    pub fn added(&self) -> usize {
        self.add
    }

    /// The ID removed from the selection.
    #[inline]
    pub fn deleted(&self) -> usize {
        self.del
    }
}

impl Move<SubsetSolution> for SwapMove {
    fn apply(&self, solution: &mut SubsetSolution) {
        let deleted = solution.deselect(self.del);
        debug_assert!(
            deleted,
            "called `SwapMove::apply` deleting ID {} which is not selected",
            self.del
        );
        let added = solution.select(self.add);
        debug_assert!(
            added,
            "called `SwapMove::apply` adding ID {} which is already selected",
            self.add
        );
    }

    fn undo(&self, solution: &mut SubsetSolution) {
        let deleted = solution.deselect(self.add);
        debug_assert!(
            deleted,
            "called `SwapMove::undo` on a solution this move was not applied to (ID {} not selected)",
            self.add
        );
        let added = solution.select(self.del);
        debug_assert!(
            added,
            "called `SwapMove::undo` on a solution this move was not applied to (ID {} already selected)",
            self.del
        );
    }
}

impl std::fmt::Display for SwapMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "swap(+{}, -{})", self.add, self.del)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_swaps_the_ids() {
        let mut solution = SubsetSolution::with_selection(5, [0, 1]);
        SwapMove::new(3, 1).apply(&mut solution);

        assert!(solution.is_selected(0));
        assert!(!solution.is_selected(1));
        assert!(solution.is_selected(3));
        assert_eq!(solution.num_selected(), 2);
    }

    #[test]
    fn test_undo_restores_the_observable_state() {
        let original = SubsetSolution::with_selection(6, [0, 2, 4]);
        let mut solution = original.clone();

        let mv = SwapMove::new(5, 2);
        mv.apply(&mut solution);
        assert_ne!(solution, original);
        mv.undo(&mut solution);
        assert_eq!(solution, original);
    }

    #[test]
    fn test_apply_undo_round_trip_over_many_moves() {
        let original = SubsetSolution::with_selection(10, [0, 1, 2, 3, 4]);
        let mut solution = original.clone();

        // Swaps of every selected against every unselected ID.
        for del in 0..5 {
            for add in 5..10 {
                let mv = SwapMove::new(add, del);
                mv.apply(&mut solution);
                mv.undo(&mut solution);
            }
        }
        assert_eq!(solution, original);
    }

    #[test]
    fn test_swap_preserves_selection_size() {
        let mut solution = SubsetSolution::with_selection(8, [0, 1, 2]);
        for (add, del) in [(3, 0), (4, 1), (0, 2)] {
            SwapMove::new(add, del).apply(&mut solution);
            assert_eq!(solution.num_selected(), 3);
        }
    }

    #[test]
    fn test_value_equality_and_hashing() {
        use std::collections::HashSet;

        let mut moves = HashSet::new();
        moves.insert(SwapMove::new(1, 2));
        moves.insert(SwapMove::new(1, 2));
        moves.insert(SwapMove::new(2, 1));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    #[should_panic(expected = "identical IDs")]
    fn test_degenerate_swap_is_rejected() {
        let _ = SwapMove::new(3, 3);
    }
}
