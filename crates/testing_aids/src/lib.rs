// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! An unpublished crate containing testing utilities for use within this repo.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

mod log;

pub use log::*;

/// Counts invocations across clones.
///
/// Hand a clone to a factory closure and assert on the original afterwards.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    count: Arc<AtomicUsize>,
}

impl CallCounter {
    /// Creates a counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one invocation and returns the number of invocations so far, including this one.
    pub fn hit(&self) -> usize {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns the number of recorded invocations.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Asserts that exactly `expected` invocations were recorded.
    ///
    /// # Panics
    ///
    /// Panics if the count differs.
    #[track_caller]
    pub fn assert_count(&self, expected: usize) {
        let actual = self.count();
        assert_eq!(actual, expected, "expected {expected} call(s), recorded {actual}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_count() {
        let counter = CallCounter::new();
        let clone = counter.clone();

        assert_eq!(clone.hit(), 1);
        assert_eq!(counter.hit(), 2);

        counter.assert_count(2);
    }

    #[test]
    #[should_panic(expected = "expected 1 call(s), recorded 0")]
    fn assert_count_reports_mismatch() {
        CallCounter::new().assert_count(1);
    }
}
