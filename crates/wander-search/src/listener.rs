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

//! Search event listeners.
//!
//! Listeners observe the lifecycle of a search: run start and stop,
//! status transitions, completed steps, new best solutions and, for
//! neighbourhood searches, modifications of the current solution. Every
//! callback has a default no-op implementation, so listeners override
//! exactly the events they care about.
//!
//! Listeners can only be added or removed while the search is idle, which
//! is why no locking discipline is imposed on the listener itself: all
//! callbacks of one search fire from at most one thread at a time.

use crate::status::SearchStatus;

/// Observer of search events over solutions of type `S`.
///
/// All methods default to no-ops.
pub trait SearchListener<S>: Send {
    /// A run of the search has started (fired while initializing).
    fn search_started(&mut self) {}

    /// The run has finished; the search is about to return to idle.
    fn search_stopped(&mut self) {}

    /// The search status changed. Transitions performed by other threads
    /// (a stop request) are reported when the search thread observes them.
    fn status_changed(&mut self, _status: SearchStatus) {}

    /// A new best solution was found.
    fn new_best_solution(&mut self, _solution: &S, _evaluation: f64) {}

    /// A step of the search loop completed.
    fn step_completed(&mut self, _steps: u64) {}

    /// The current solution of a neighbourhood search was modified.
    fn modified_current_solution(&mut self, _solution: &S, _evaluation: f64) {}
}

/// Handle identifying a registered listener, returned by
/// `add_search_listener` and consumed by `remove_search_listener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registration order collection of listeners with stable handles.
pub(crate) struct ListenerSet<S> {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn SearchListener<S>>)>,
}

impl<S> ListenerSet<S> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, listener: Box<dyn SearchListener<S>>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    pub(crate) fn for_each(&mut self, mut f: impl FnMut(&mut dyn SearchListener<S>)) {
        for (_, listener) in &mut self.listeners {
            f(listener.as_mut());
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingListener {
        started: u64,
    }

    impl SearchListener<i64> for CountingListener {
        fn search_started(&mut self) {
            self.started += 1;
        }
    }

    #[test]
    fn test_add_and_remove_by_handle() {
        let mut set: ListenerSet<i64> = ListenerSet::new();
        let first = set.add(Box::new(CountingListener::default()));
        let second = set.add(Box::new(CountingListener::default()));
        assert_ne!(first, second);
        assert_eq!(set.len(), 2);

        assert!(set.remove(first));
        assert_eq!(set.len(), 1);
        // Removing twice reports failure.
        assert!(!set.remove(first));
        assert!(set.remove(second));
    }

    #[test]
    fn test_for_each_visits_every_listener() {
        let mut set: ListenerSet<i64> = ListenerSet::new();
        set.add(Box::new(CountingListener::default()));
        set.add(Box::new(CountingListener::default()));

        let mut visited = 0;
        set.for_each(|listener| {
            listener.search_started();
            visited += 1;
        });
        assert_eq!(visited, 2);
    }
}
