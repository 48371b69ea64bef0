use std::sync::atomic::{AtomicU64, Ordering};

/// A per-instance message id source, initialized at 0.
///
/// Each caller owns exactly one of these. Ids are handed out in strictly
/// increasing order regardless of how the calls they tag eventually settle.
#[derive(Debug, Default)]
pub struct MessageIdCounter {
    next: AtomicU64,
}

impl MessageIdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the next id.
    #[inline]
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// The id the next call to [`MessageIdCounter::next_id`] will return.
    #[inline]
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_increments() {
        let counter = MessageIdCounter::new();
        assert_eq!(counter.peek(), 0);
        assert_eq!(counter.next_id(), 0);
        assert_eq!(counter.next_id(), 1);
        assert_eq!(counter.next_id(), 2);
        assert_eq!(counter.peek(), 3);
    }

    #[test]
    fn instances_do_not_share_state() {
        let a = MessageIdCounter::new();
        let b = MessageIdCounter::new();
        a.next_id();
        a.next_id();
        assert_eq!(b.next_id(), 0);
        assert_eq!(a.next_id(), 2);
    }
}
