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

//! The solution contract.
//!
//! Solutions are opaque to the engine. The only capabilities the search
//! machinery relies on are deep copies (`Clone`), observational equality
//! (`PartialEq`) and the ability to hand solutions to another thread
//! (`Send`). Any owned value type satisfying those bounds is a solution;
//! the blanket implementation makes this explicit so user types need no
//! boilerplate.

/// Marker trait for solution types.
///
/// The engine deep-copies solutions at ownership boundaries (taking a
/// starting point in, handing the best solution out) and compares them only
/// through `PartialEq`. It never inspects their internal structure.
pub trait Solution: Clone + PartialEq + std::fmt::Debug + Send + 'static {}

impl<T> Solution for T where T: Clone + PartialEq + std::fmt::Debug + Send + 'static {}
