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

//! Subset solutions.
//!
//! A `SubsetSolution` partitions the universe `0..universe_size` into a
//! selected and an unselected part. The selection is a single bit set
//! with a tracked cardinality, so the partition invariants (selected and
//! unselected are disjoint and together cover the universe) hold by
//! construction and cannot be violated by any sequence of operations.

use fixedbitset::FixedBitSet;

/// A partition of the ID universe `0..universe_size` into selected and
/// unselected IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubsetSolution {
    selected: FixedBitSet,
    num_selected: usize,
}

impl SubsetSolution {
    /// Creates a solution over `0..universe_size` with nothing selected.
    ///
    /// # Panics
    ///
    /// Panics if `universe_size` is 0.
    pub fn new(universe_size: usize) -> Self {
        assert!(
            universe_size > 0,
            "called `SubsetSolution::new` with an empty universe"
        );
        Self {
            selected: FixedBitSet::with_capacity(universe_size),
            num_selected: 0,
        }
    }

    /// Creates a solution over `0..universe_size` with the given IDs
    /// selected.
    ///
    /// # Panics
    ///
    /// Panics if `universe_size` is 0 or any ID is out of bounds.
    pub fn with_selection(universe_size: usize, ids: impl IntoIterator<Item = usize>) -> Self {
        let mut solution = Self::new(universe_size);
        for id in ids {
            assert!(
                id < universe_size,
                "called `SubsetSolution::with_selection` with ID {} outside the universe 0..{}",
                id,
                universe_size
            );
            solution.select(id);
        }
        solution
    }

    /// Size of the ID universe.
    #[inline]
    pub fn universe_size(&self) -> usize {
        self.selected.len()
    }

    /// Number of selected IDs.
    #[inline]
    pub fn num_selected(&self) -> usize {
        self.num_selected
    }

    /// Number of unselected IDs.
    #[inline]
    pub fn num_unselected(&self) -> usize {
        self.universe_size() - self.num_selected
    }

    /// Whether the given ID is selected.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `id` is out of bounds.
    #[inline]
    pub fn is_selected(&self, id: usize) -> bool {
        debug_assert!(
            id < self.universe_size(),
            "called `SubsetSolution::is_selected` with ID {} outside the universe 0..{}",
            id,
            self.universe_size()
        );
        self.selected.contains(id)
    }

    /// Selects the given ID. Returns `false` when it was selected
    /// already.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `id` is out of bounds.
    pub fn select(&mut self, id: usize) -> bool {
        debug_assert!(
            id < self.universe_size(),
            "called `SubsetSolution::select` with ID {} outside the universe 0..{}",
            id,
            self.universe_size()
        );
        if self.selected.put(id) {
            false
        } else {
            self.num_selected += 1;
            true
        }
    }

    /// Deselects the given ID. Returns `false` when it was not selected.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `id` is out of bounds.
    pub fn deselect(&mut self, id: usize) -> bool {
        debug_assert!(
            id < self.universe_size(),
            "called `SubsetSolution::deselect` with ID {} outside the universe 0..{}",
            id,
            self.universe_size()
        );
        if self.selected.contains(id) {
            self.selected.set(id, false);
            self.num_selected -= 1;
            true
        } else {
            false
        }
    }

    /// Iterates the selected IDs in ascending order.
    #[inline]
    pub fn selected_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.ones()
    }

    /// Iterates the unselected IDs in ascending order.
    #[inline]
    pub fn unselected_ids(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.universe_size()).filter(move |&id| !self.selected.contains(id))
    }
}

impl std::fmt::Display for SubsetSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (position, id) in self.selected_ids().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", id)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_solution_selects_nothing() {
        let solution = SubsetSolution::new(5);
        assert_eq!(solution.universe_size(), 5);
        assert_eq!(solution.num_selected(), 0);
        assert_eq!(solution.num_unselected(), 5);
        assert_eq!(solution.selected_ids().count(), 0);
        assert_eq!(solution.unselected_ids().count(), 5);
    }

    #[test]
    fn test_select_and_deselect_report_changes() {
        let mut solution = SubsetSolution::new(5);
        assert!(solution.select(2));
        assert!(!solution.select(2));
        assert_eq!(solution.num_selected(), 1);

        assert!(solution.deselect(2));
        assert!(!solution.deselect(2));
        assert_eq!(solution.num_selected(), 0);
    }

    #[test]
    fn test_partition_covers_the_universe() {
        let solution = SubsetSolution::with_selection(8, [1, 3, 5]);
        let selected: Vec<usize> = solution.selected_ids().collect();
        let unselected: Vec<usize> = solution.unselected_ids().collect();

        assert_eq!(selected, vec![1, 3, 5]);
        assert_eq!(unselected, vec![0, 2, 4, 6, 7]);
        assert_eq!(selected.len() + unselected.len(), solution.universe_size());
        for id in &selected {
            assert!(!unselected.contains(id));
        }
    }

    #[test]
    fn test_equality_is_observational() {
        let mut first = SubsetSolution::new(6);
        first.select(1);
        first.select(4);

        let second = SubsetSolution::with_selection(6, [4, 1]);
        assert_eq!(first, second);

        let third = SubsetSolution::with_selection(6, [1, 3]);
        assert_ne!(first, third);
    }

    #[test]
    fn test_display_lists_selected_ids() {
        let solution = SubsetSolution::with_selection(10, [7, 8, 9]);
        assert_eq!(solution.to_string(), "{7, 8, 9}");
    }

    #[test]
    #[should_panic(expected = "empty universe")]
    fn test_empty_universe_is_rejected() {
        let _ = SubsetSolution::new(0);
    }

    #[test]
    #[should_panic(expected = "outside the universe")]
    fn test_out_of_bounds_selection_is_rejected() {
        let _ = SubsetSolution::with_selection(3, [3]);
    }
}
