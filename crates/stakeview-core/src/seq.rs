//! Snapshot ordering primitives
//!
//! Polls can overlap or complete out of order at the chain boundary.
//! Ordering is restored with a monotone sequence number stamped on every
//! poll and a holder that only ever replaces its value with a
//! higher-sequenced one, so a late-arriving stale result is discarded
//! instead of overwriting fresher state.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Issues monotonically increasing snapshot sequence numbers.
///
/// Sequence numbers start at 1; 0 is reserved for "nothing published yet".
#[derive(Debug, Default)]
pub struct SnapshotSequence {
    next: AtomicU64,
}

impl SnapshotSequence {
    /// Create a new sequence starting before 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next sequence number
    pub fn issue(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Highest sequence number issued so far
    pub fn last_issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

/// Holds the highest-sequenced value offered so far.
pub struct LatestWins<T> {
    slot: RwLock<Option<(u64, T)>>,
}

impl<T> LatestWins<T> {
    /// Create an empty holder
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Publish `value` under `seq`.
    ///
    /// Returns `false` and drops the value if an equal-or-higher sequence
    /// has already been published.
    pub fn offer(&self, seq: u64, value: T) -> bool {
        let mut slot = self.slot.write();
        match slot.as_ref() {
            Some((published, _)) if *published >= seq => false,
            _ => {
                *slot = Some((seq, value));
                true
            }
        }
    }

    /// Sequence number of the published value, 0 when empty
    pub fn published_seq(&self) -> u64 {
        self.slot.read().as_ref().map(|(seq, _)| *seq).unwrap_or(0)
    }
}

impl<T: Clone> LatestWins<T> {
    /// Latest published value with its sequence number
    pub fn latest(&self) -> Option<(u64, T)> {
        self.slot.read().clone()
    }
}

impl<T> Default for LatestWins<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotone() {
        let seq = SnapshotSequence::new();

        let a = seq.issue();
        let b = seq.issue();
        let c = seq.issue();

        assert_eq!((a, b, c), (1, 2, 3));
        assert_eq!(seq.last_issued(), 3);
    }

    #[test]
    fn test_latest_wins_accepts_newer() {
        let holder = LatestWins::new();

        assert!(holder.offer(1, "first"));
        assert!(holder.offer(2, "second"));
        assert_eq!(holder.latest(), Some((2, "second")));
    }

    #[test]
    fn test_latest_wins_discards_stale() {
        let holder = LatestWins::new();

        assert!(holder.offer(5, "newer"));
        // An older poll completing late must not overwrite fresher state
        assert!(!holder.offer(3, "stale"));
        assert!(!holder.offer(5, "duplicate"));

        assert_eq!(holder.latest(), Some((5, "newer")));
        assert_eq!(holder.published_seq(), 5);
    }

    #[test]
    fn test_empty_holder() {
        let holder: LatestWins<u32> = LatestWins::new();

        assert_eq!(holder.published_seq(), 0);
        assert!(holder.latest().is_none());
    }
}
