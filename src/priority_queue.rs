//! Frequency-ordered priority queue used to build Huffman trees.
//!
//! Entries are ordered by `(frequency, sequence)` where `sequence` is the
//! insertion counter, so entries with equal frequency come out oldest first.
//! Tree shape, and therefore every code, depends on this order.

use std::cmp::Ordering;
use std::fmt;

use crate::error::Result;
use crate::min_heap::MinHeap;

struct QueueEntry<T> {
    frequency: u64,
    sequence: u64,
    item: T,
}

impl<T> QueueEntry<T> {
    fn key(&self) -> (u64, u64) {
        (self.frequency, self.sequence)
    }
}

impl<T> PartialEq for QueueEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for QueueEntry<T> {}

impl<T> PartialOrd for QueueEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for QueueEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // sequence numbers are unique, so this is a total order
        self.key().cmp(&other.key())
    }
}

/// Min-priority queue keyed by frequency with FIFO tie-breaking.
pub struct PriorityQueue<T> {
    heap: MinHeap<QueueEntry<T>>,
    next_sequence: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        PriorityQueue {
            heap: MinHeap::new(),
            next_sequence: 0,
        }
    }

    /// Number of entries, O(1).
    pub fn size(&self) -> usize {
        self.heap.heap_size()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Frequency of the entry `extract_min` would return next.
    pub fn peek_frequency(&self) -> Option<u64> {
        self.heap.peek().map(|entry| entry.frequency)
    }

    /// Add `item` with priority `frequency`, O(log n).
    pub fn insert(&mut self, item: T, frequency: u64) -> Result<()> {
        let sequence = self.next_sequence;
        self.heap.insert(QueueEntry {
            frequency,
            sequence,
            item,
        })?;
        self.next_sequence += 1;
        Ok(())
    }

    /// Remove the lowest-frequency entry, earliest-inserted first on ties.
    ///
    /// Fails with [`HuffmanError::EmptyQueue`](crate::HuffmanError::EmptyQueue)
    /// when nothing is left.
    pub fn extract_min(&mut self) -> Result<(T, u64)> {
        let entry = self.heap.extract_min()?;
        Ok((entry.item, entry.frequency))
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Bulk construction in O(n); sequence numbers follow iteration order.
impl<T> FromIterator<(T, u64)> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = (T, u64)>>(iter: I) -> Self {
        let entries: Vec<QueueEntry<T>> = iter
            .into_iter()
            .zip(0u64..)
            .map(|((item, frequency), sequence)| QueueEntry {
                frequency,
                sequence,
                item,
            })
            .collect();
        let next_sequence = entries.len() as u64;
        PriorityQueue {
            heap: MinHeap::build(entries),
            next_sequence,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<&QueueEntry<T>> = self.heap.iter().collect();
        entries.sort();
        f.debug_list()
            .entries(
                entries
                    .into_iter()
                    .map(|e| (e.frequency, e.sequence, &e.item)),
            )
            .finish()
    }
}
