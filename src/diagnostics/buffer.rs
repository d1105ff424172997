// SPDX-License-Identifier: MPL-2.0
//! Fixed-size event log backing [`Diagnostics`](super::Diagnostics).

use crate::config::{
    DEFAULT_DIAGNOSTICS_CAPACITY, MAX_DIAGNOSTICS_CAPACITY, MIN_DIAGNOSTICS_CAPACITY,
};
use std::collections::VecDeque;

/// Number of events kept, clamped to
/// `MIN_DIAGNOSTICS_CAPACITY..=MAX_DIAGNOSTICS_CAPACITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_DIAGNOSTICS_CAPACITY, MAX_DIAGNOSTICS_CAPACITY))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(DEFAULT_DIAGNOSTICS_CAPACITY)
    }
}

/// Bounded FIFO of diagnostic events.
///
/// Once full, each push drops the oldest entry and bumps [`evicted`], so a
/// reader can tell a quiet log from one that overflowed.
///
/// ```
/// use portal_front::diagnostics::CircularBuffer;
///
/// let mut buffer: CircularBuffer<&str> = CircularBuffer::with_raw_capacity(2);
/// buffer.push("redirect");
/// buffer.push("csrf");
/// buffer.push("storage");
///
/// assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), ["csrf", "storage"]);
/// assert_eq!(buffer.evicted(), 1);
/// ```
///
/// [`evicted`]: CircularBuffer::evicted
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    entries: VecDeque<T>,
    capacity: usize,
    evicted: u64,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Skips the configured bounds (tests use tiny buffers). Zero becomes one.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_DIAGNOSTICS_CAPACITY)),
            capacity,
            evicted: 0,
        }
    }

    pub fn push(&mut self, entry: T) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
            self.evicted += 1;
        }
        self.entries.push_back(entry);
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.entries.iter()
    }

    /// Up to `count` entries, newest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &T> {
        self.entries.iter().rev().take(count)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries dropped to make room since creation or the last [`clear`].
    ///
    /// [`clear`]: CircularBuffer::clear
    #[must_use]
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.evicted = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_capacity_clamps_to_valid_range() {
        assert_eq!(BufferCapacity::new(0).value(), MIN_DIAGNOSTICS_CAPACITY);
        assert_eq!(
            BufferCapacity::new(1_000_000).value(),
            MAX_DIAGNOSTICS_CAPACITY
        );
        assert_eq!(
            BufferCapacity::default().value(),
            DEFAULT_DIAGNOSTICS_CAPACITY
        );
    }

    #[test]
    fn push_evicts_oldest_at_capacity() {
        let mut buffer = CircularBuffer::with_raw_capacity(3);
        for i in 0..5 {
            buffer.push(i);
        }
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.evicted(), 2);
    }

    #[test]
    fn recent_is_newest_first() {
        let mut buffer = CircularBuffer::with_raw_capacity(4);
        for i in 0..4 {
            buffer.push(i);
        }
        assert_eq!(buffer.recent(2).copied().collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(buffer.recent(10).count(), 4);
    }

    #[test]
    fn zero_raw_capacity_is_raised_to_one() {
        let mut buffer = CircularBuffer::with_raw_capacity(0);
        buffer.push("a");
        buffer.push("b");
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buffer = CircularBuffer::new(BufferCapacity::default());
        buffer.push(1);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.evicted(), 0);
    }
}
