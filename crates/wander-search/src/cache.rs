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

//! The evaluated-move cache.
//!
//! Within one step an algorithm typically touches the same move more than
//! once: it validates it, evaluates it, and often re-queries the chosen
//! move when accepting it. The cache memoizes evaluation and rejection
//! results against the *current* solution so those repeat queries cost a
//! key comparison instead of a full (or delta) evaluation.
//!
//! The cache is strictly advisory: a miss is always permitted, and the
//! engine clears the cache whenever the current solution changes, so a
//! hit is always consistent with the current solution. The default
//! implementation holds a single slot (the last move written), which
//! captures the common case without any allocation. Any bounded map can
//! be substituted; correctness does not depend on capacity.
//!
//! The cache is only ever accessed from the thread driving its search, so
//! implementations need no internal synchronization.

/// Advisory memo of move evaluations and rejections against the current
/// solution of a neighbourhood search.
pub trait EvaluatedMoveCache<M>: Send {
    /// Caches the evaluation of the neighbour reached by `mv`.
    fn cache_evaluation(&mut self, mv: M, evaluation: f64);

    /// Returns the cached evaluation for `mv`, if any.
    fn cached_evaluation(&self, mv: &M) -> Option<f64>;

    /// Caches whether the neighbour reached by `mv` is rejected.
    fn cache_rejection(&mut self, mv: M, rejected: bool);

    /// Returns the cached rejection flag for `mv`, if any.
    fn cached_rejection(&self, mv: &M) -> Option<bool>;

    /// Drops every cached value; called whenever the current solution
    /// changes.
    fn clear(&mut self);
}

/// The default single-slot cache: remembers the evaluation and rejection
/// of the last move written. Writing a different move evicts both values.
#[derive(Debug, Clone, Default)]
pub struct SingleEvaluatedMoveCache<M> {
    key: Option<M>,
    evaluation: Option<f64>,
    rejected: Option<bool>,
}

impl<M> SingleEvaluatedMoveCache<M> {
    /// Creates an empty single-slot cache.
    #[inline]
    pub fn new() -> Self {
        Self {
            key: None,
            evaluation: None,
            rejected: None,
        }
    }

    #[inline]
    fn holds(&self, mv: &M) -> bool
    where
        M: Eq,
    {
        self.key.as_ref() == Some(mv)
    }
}

impl<M> EvaluatedMoveCache<M> for SingleEvaluatedMoveCache<M>
where
    M: Eq + Send,
{
    fn cache_evaluation(&mut self, mv: M, evaluation: f64) {
        if !self.holds(&mv) {
            self.key = Some(mv);
            self.rejected = None;
        }
        self.evaluation = Some(evaluation);
    }

    fn cached_evaluation(&self, mv: &M) -> Option<f64> {
        if self.holds(mv) {
            self.evaluation
        } else {
            None
        }
    }

    fn cache_rejection(&mut self, mv: M, rejected: bool) {
        if !self.holds(&mv) {
            self.key = Some(mv);
            self.evaluation = None;
        }
        self.rejected = Some(rejected);
    }

    fn cached_rejection(&self, mv: &M) -> Option<bool> {
        if self.holds(mv) {
            self.rejected
        } else {
            None
        }
    }

    fn clear(&mut self) {
        self.key = None;
        self.evaluation = None;
        self.rejected = None;
    }
}
