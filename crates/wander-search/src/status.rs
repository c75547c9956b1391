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

//! The search status state machine.
//!
//! A search walks a small, fixed state machine:
//!
//! ```text
//! Idle ──start()──▶ Initializing ──init ok──▶ Running ──stop──▶ Terminating ──▶ Idle
//!   │                     │
//!   │                     └──init fails──▶ Idle
//!   └──dispose()──▶ Disposed (terminal)
//! ```
//!
//! Termination is cooperative: requesting a stop merely moves the status
//! to `Terminating`; the step loop observes the status and winds down
//! before the search returns to `Idle`. Disposing is only permitted while
//! idle and is terminal.

/// Status of a search instance.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    /// Not running and ready to be started (or disposed).
    Idle = 0,
    /// `start()` was called; the run is being initialized.
    Initializing = 1,
    /// The step loop is executing.
    Running = 2,
    /// A stop was requested; the step loop is winding down.
    Terminating = 3,
    /// The search has been disposed and can no longer be used.
    Disposed = 4,
}

impl SearchStatus {
    /// Whether the search is currently performing a run (initializing,
    /// running or terminating).
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(
            self,
            SearchStatus::Initializing | SearchStatus::Running | SearchStatus::Terminating
        )
    }

    /// Decodes a status from its `u8` representation.
    ///
    /// # Panics
    ///
    /// Panics if `raw` does not encode a status.
    #[inline]
    pub(crate) fn from_u8(raw: u8) -> SearchStatus {
        match raw {
            0 => SearchStatus::Idle,
            1 => SearchStatus::Initializing,
            2 => SearchStatus::Running,
            3 => SearchStatus::Terminating,
            4 => SearchStatus::Disposed,
            _ => unreachable!("invalid search status encoding: {}", raw),
        }
    }
}

impl std::fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchStatus::Idle => write!(f, "idle"),
            SearchStatus::Initializing => write!(f, "initializing"),
            SearchStatus::Running => write!(f, "running"),
            SearchStatus::Terminating => write!(f, "terminating"),
            SearchStatus::Disposed => write!(f, "disposed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_states() {
        assert!(!SearchStatus::Idle.is_active());
        assert!(SearchStatus::Initializing.is_active());
        assert!(SearchStatus::Running.is_active());
        assert!(SearchStatus::Terminating.is_active());
        assert!(!SearchStatus::Disposed.is_active());
    }

    #[test]
    fn test_u8_round_trip() {
        for status in [
            SearchStatus::Idle,
            SearchStatus::Initializing,
            SearchStatus::Running,
            SearchStatus::Terminating,
            SearchStatus::Disposed,
        ] {
            assert_eq!(SearchStatus::from_u8(status as u8), status);
        }
    }
}
