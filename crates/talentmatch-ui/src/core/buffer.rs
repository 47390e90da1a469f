//! Bounded scrollback for streamed log records.
//!
//! # Design
//! - FIFO eviction: the oldest record is dropped once the capacity is reached.
//! - Capacity is fixed at construction and never zero.
//! - Every record gets an arrival sequence number that is never reused, so views can
//!   key rows on it across evictions and clears.

use std::collections::VecDeque;

use talentmatch_events::LogRecord;

/// Default number of records kept in memory.
pub const DEFAULT_CAPACITY: usize = 500;

/// Insertion-ordered ring of log records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogBuffer {
    records: VecDeque<LogRecord>,
    capacity: usize,
    first_seq: u64,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl LogBuffer {
    /// Build an empty buffer holding at most `capacity` records (minimum one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
            first_seq: 0,
        }
    }

    /// Append a record, returning the evicted one when the buffer was full.
    pub fn push(&mut self, record: LogRecord) -> Option<LogRecord> {
        let evicted = if self.records.len() >= self.capacity {
            self.first_seq = self.first_seq.wrapping_add(1);
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Drop every buffered record.
    pub fn clear(&mut self) {
        self.first_seq = self.next_seq();
        self.records.clear();
    }

    /// Sequence number the next pushed record will get.
    #[must_use]
    pub fn next_seq(&self) -> u64 {
        self.first_seq.wrapping_add(self.records.len() as u64)
    }

    /// Records with their arrival sequence numbers, oldest first.
    pub fn iter_sequenced(&self) -> impl Iterator<Item = (u64, &LogRecord)> {
        (self.first_seq..).zip(self.records.iter())
    }

    /// Copy the records into a buffer with a different capacity, keeping the most
    /// recent ones and their sequence numbers.
    #[must_use]
    pub fn resized(&self, capacity: usize) -> Self {
        let mut next = Self::with_capacity(capacity);
        next.first_seq = self.first_seq;
        for record in &self.records {
            next.push(record.clone());
        }
        next
    }

    /// Number of buffered records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of records kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records in arrival order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        self.records.iter()
    }

    /// Owned snapshot in arrival order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<LogRecord> {
        self.records.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(idx: usize) -> LogRecord {
        LogRecord::new(format!("T{idx}"), format!("message {idx}"))
    }

    #[test]
    fn overflow_keeps_most_recent_records_in_order() {
        let mut buffer = LogBuffer::default();
        for idx in 1..=505 {
            buffer.push(record(idx));
        }
        assert_eq!(buffer.len(), 500);
        let stamps: Vec<_> = buffer.iter().map(|r| r.timestamp.clone()).collect();
        let expected: Vec<_> = (6..=505).map(|idx| format!("T{idx}")).collect();
        assert_eq!(stamps, expected);
    }

    #[test]
    fn push_reports_evicted_record() {
        let mut buffer = LogBuffer::with_capacity(2);
        assert!(buffer.push(record(1)).is_none());
        assert!(buffer.push(record(2)).is_none());
        assert_eq!(buffer.push(record(3)), Some(record(1)));
        assert_eq!(buffer.to_vec(), vec![record(2), record(3)]);
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let mut buffer = LogBuffer::with_capacity(7);
        for idx in 0..100 {
            buffer.push(record(idx));
            assert!(buffer.len() <= buffer.capacity());
        }
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut buffer = LogBuffer::with_capacity(0);
        buffer.push(record(1));
        buffer.push(record(2));
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.to_vec(), vec![record(2)]);
    }

    #[test]
    fn sequence_numbers_survive_eviction_and_clear() {
        let mut buffer = LogBuffer::with_capacity(3);
        for idx in 0..5 {
            buffer.push(record(idx));
        }
        let seqs: Vec<u64> = buffer.iter_sequenced().map(|(seq, _)| seq).collect();
        assert_eq!(seqs, vec![2, 3, 4]);

        buffer.clear();
        assert_eq!(buffer.next_seq(), 5);
        buffer.push(record(9));
        let first = buffer.iter_sequenced().next().map(|(seq, rec)| (seq, rec.clone()));
        assert_eq!(first, Some((5, record(9))));
    }

    #[test]
    fn resizing_keeps_recent_records_and_their_sequence() {
        let mut buffer = LogBuffer::with_capacity(4);
        for idx in 0..4 {
            buffer.push(record(idx));
        }
        let smaller = buffer.resized(2);
        let seqs: Vec<u64> = smaller.iter_sequenced().map(|(seq, _)| seq).collect();
        assert_eq!(seqs, vec![2, 3]);
        assert_eq!(smaller.to_vec(), vec![record(2), record(3)]);
    }

    #[test]
    fn clear_empties_buffer() {
        let mut buffer = LogBuffer::default();
        buffer.push(record(1));
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), DEFAULT_CAPACITY);
    }
}
