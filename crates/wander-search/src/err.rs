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

//! Search lifecycle errors.
//!
//! These errors cover violations of the search lifecycle contract:
//! misconfiguration discovered while initializing a run, mutators invoked
//! while the search is not idle, and any use of a disposed search. Errors
//! raised by user problem code are panics in this crate (the step loop
//! unwinds them to the caller of `start()` after restoring a consistent
//! idle state) and therefore have no variant here.

use crate::status::SearchStatus;

/// Error raised by search lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The search is misconfigured; surfaced from `start()` during
    /// initialization. The search returns to idle.
    Init(String),
    /// An idle-only operation was invoked while the search was active.
    NotIdle {
        /// The operation that was attempted.
        operation: &'static str,
        /// The status the search was in.
        status: SearchStatus,
    },
    /// An operation was invoked on a disposed search.
    Disposed {
        /// The operation that was attempted.
        operation: &'static str,
    },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::Init(reason) => {
                write!(f, "cannot initialize search: {}", reason)
            }
            SearchError::NotIdle { operation, status } => {
                write!(
                    f,
                    "cannot {} while search is {}; operation requires an idle search",
                    operation, status
                )
            }
            SearchError::Disposed { operation } => {
                write!(f, "cannot {}: search has been disposed", operation)
            }
        }
    }
}

impl std::error::Error for SearchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages_name_the_operation() {
        let not_idle = SearchError::NotIdle {
            operation: "set current solution",
            status: SearchStatus::Running,
        };
        let rendered = not_idle.to_string();
        assert!(rendered.contains("set current solution"));
        assert!(rendered.contains("running"));

        let disposed = SearchError::Disposed {
            operation: "start search",
        };
        assert!(disposed.to_string().contains("disposed"));

        let init = SearchError::Init("no neighbourhoods configured".to_string());
        assert!(init.to_string().contains("no neighbourhoods"));
    }
}
