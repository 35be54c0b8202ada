//! Lazy counting used by the health endpoint to simulate asynchronous work.
//!
//! The counter walks a closed, stepped integer range and sleeps briefly before
//! emitting each element. Nothing runs until the returned future is polled, and
//! dropping the future (for example when the client disconnects) stops the loop
//! at its next sleep.

use std::time::Duration;

/// Delay inserted before each emitted number.
pub const COUNT_DELAY: Duration = Duration::from_millis(10);

/// A closed integer range `[start, end]` walked by `step`.
///
/// A zero step, or a step whose sign moves away from `end`, describes an empty
/// range. Iteration stops before any value that would overflow `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountingRange {
    pub start: i64,
    pub end: i64,
    pub step: i64,
}

impl CountingRange {
    pub fn new(start: i64, end: i64, step: i64) -> Self {
        Self { start, end, step }
    }

    /// Whether the range yields no values at all.
    pub fn is_empty(&self) -> bool {
        match self.step {
            0 => true,
            s if s > 0 => self.start > self.end,
            _ => self.start < self.end,
        }
    }

    pub fn iter(&self) -> CountingIter {
        CountingIter {
            next: (!self.is_empty()).then_some(self.start),
            end: self.end,
            step: self.step,
        }
    }
}

/// Iterator over a [`CountingRange`].
#[derive(Debug, Clone)]
pub struct CountingIter {
    next: Option<i64>,
    end: i64,
    step: i64,
}

impl Iterator for CountingIter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let current = self.next?;
        self.next = current.checked_add(self.step).filter(|n| {
            if self.step > 0 {
                *n <= self.end
            } else {
                *n >= self.end
            }
        });
        Some(current)
    }
}

/// Count through `range`, yielding to the runtime before each number.
///
/// The caller always receives the complete sequence; the laziness is only in
/// when the work happens.
#[tracing::instrument(level = "debug")]
pub async fn count_numbers_lazy(range: CountingRange) -> Vec<i64> {
    let mut numbers = Vec::new();
    for n in range.iter() {
        tokio::time::sleep(COUNT_DELAY).await;
        numbers.push(n);
    }
    tracing::debug!(total = numbers.len(), "counting finished");
    numbers
}
