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

//! Sentinel constants for metadata getters.
//!
//! Count and duration getters on a search return these distinguished
//! negative values whenever the requested quantity is not meaningful in
//! the current status, e.g. the accepted-move count while the search is
//! still initializing, or any per-run quantity before the first run.

/// Returned from count getters (steps, accepted moves, rejected moves)
/// when no meaningful count is available.
pub const INVALID_COUNT: i64 = -1;

/// Returned from millisecond duration getters (runtime, time without
/// improvement) when no meaningful duration is available.
pub const INVALID_MILLIS: i64 = -1;

/// Returned from the minimum-delta getter before any strictly positive
/// improvement delta has been observed.
pub const INVALID_DELTA: f64 = -1.0;
