//! Recency Index Module
//!
//! Orders keys by their last access for least-recently-accessed eviction.

use std::collections::BTreeMap;

// == Recency Index ==
/// Keys ordered by a strictly increasing access sequence number.
///
/// The smallest sequence number is the least recently accessed key. Entries
/// read or written at the same clock instant still get distinct sequence
/// numbers, so eviction order is deterministic.
#[derive(Debug, Default)]
pub struct RecencyIndex {
    /// access_seq -> key
    order: BTreeMap<u64, String>,
    /// Next sequence number to hand out
    next_seq: u64,
}

impl RecencyIndex {
    // == Constructor ==
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Marks `key` as most recently accessed.
    ///
    /// `previous` is the sequence number the key held before, if it was
    /// already tracked. Returns the key's new sequence number.
    pub fn record(&mut self, key: &str, previous: Option<u64>) -> u64 {
        if let Some(seq) = previous {
            self.order.remove(&seq);
        }
        self.next_seq += 1;
        self.order.insert(self.next_seq, key.to_string());
        self.next_seq
    }

    // == Forget ==
    /// Stops tracking the key stored under `seq`.
    pub fn forget(&mut self, seq: u64) {
        self.order.remove(&seq);
    }

    // == Pop Least Recent ==
    /// Removes and returns the least recently accessed key.
    pub fn pop_least_recent(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    // == Peek Least Recent ==
    /// Returns the least recently accessed key without removing it.
    pub fn peek_least_recent(&self) -> Option<&str> {
        self.order.first_key_value().map(|(_, key)| key.as_str())
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
