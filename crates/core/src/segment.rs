// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-window segment scheduling
//!
//! Alternative to slot scheduling: each run processes a contiguous window of
//! the catalog and advances a persisted offset. The offset advances by the
//! number of items actually processed, not by the window size, so items whose
//! lookup failed keep their position and are retried on the next pass.

/// A half-open range `[start, end)` of catalog positions for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    /// Select the window for this run
    ///
    /// A persisted `start` outside `[0, len)` resets to 0, which is also how
    /// a fully-advanced cursor wraps around on the run after it reaches the
    /// end of the catalog.
    pub fn select(start: usize, window: usize, len: usize) -> Segment {
        if len == 0 {
            return Segment { start: 0, end: 0 };
        }
        let start = if start >= len { 0 } else { start };
        Segment {
            start,
            end: (start + window).min(len),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Cursor value to persist after `processed` items completed
    /// successfully
    pub fn advanced(&self, processed: usize) -> usize {
        self.start + processed.min(self.len())
    }
}

#[cfg(test)]
#[path = "segment_tests.rs"]
mod tests;
