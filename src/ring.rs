//! Lock-free SPSC byte ring with an overwrite-oldest policy.
//!
//! One ring per transfer direction bridges the interrupt domain and the
//! main-loop domain:
//!
//! ```text
//! RX:  rx interrupt ──push──▶ RingBuffer ──pop──▶ main loop
//! TX:  main loop    ──push──▶ RingBuffer ──pop──▶ tx interrupt
//! ```
//!
//! The producer never waits for room. When it laps the consumer the
//! oldest unread byte is discarded, which bounds the interrupt handler's
//! worst-case latency at the cost of losing data under sustained
//! overload. That trade-off is part of the contract, not an error.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Fixed-capacity circular FIFO byte store.
///
/// # Safety
///
/// Uses `UnsafeCell` for the slot array but is safe to share because:
/// - Exactly one producer calls [`push`](Self::push) and exactly one
///   consumer calls [`pop`](Self::pop), in different execution contexts
/// - Both indices are free-running `u32` values, published with
///   release/acquire ordering
/// - The read index is the only contended word; both sides move it with
///   `compare_exchange` so a lapped consumer and a lapping producer can
///   never both claim the same slot
///
/// A byte being overwritten while the consumer reads it yields the fresh
/// value instead of the stale one. Either is a valid byte, consistent
/// with the overwrite-oldest contract.
pub struct RingBuffer<const N: usize> {
    /// Slot storage, indexed by masked free-running positions.
    slots: UnsafeCell<[u8; N]>,
    /// Next write position (producer side).
    write_idx: AtomicU32,
    /// Next read position. Normally advanced by the consumer, nudged
    /// forward by the producer when it laps.
    read_idx: AtomicU32,
}

// SAFETY: single producer, single consumer, atomic index coordination.
unsafe impl<const N: usize> Sync for RingBuffer<N> {}
unsafe impl<const N: usize> Send for RingBuffer<N> {}

impl<const N: usize> RingBuffer<N> {
    /// Mask for wrapping a free-running index to a slot.
    /// N must be a power of two.
    const MASK: usize = N - 1;

    /// Create an empty ring.
    ///
    /// # Panics
    ///
    /// Panics at compile time if `N` is zero or not a power of two.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "ring capacity must be a power of two");

        Self {
            slots: UnsafeCell::new([0u8; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
        }
    }

    /// Push a byte, discarding the oldest unread byte when full.
    ///
    /// Producer side only. Completes in O(1) and never blocks, so it is
    /// safe to call from an interrupt handler.
    #[inline]
    pub fn push(&self, byte: u8) {
        let write = self.write_idx.load(Ordering::Relaxed);

        // SAFETY: single producer; this slot is outside the readable
        // window until the index store below publishes it.
        unsafe {
            (*self.slots.get())[(write as usize) & Self::MASK] = byte;
        }

        let next = write.wrapping_add(1);
        self.write_idx.store(next, Ordering::Release);

        // Lapped the consumer: reclaim the oldest slot. A failed
        // exchange means the consumer popped concurrently and there is
        // room again.
        let read = self.read_idx.load(Ordering::Acquire);
        if next.wrapping_sub(read) > N as u32 {
            let _ = self.read_idx.compare_exchange(
                read,
                read.wrapping_add(1),
                Ordering::AcqRel,
                Ordering::Relaxed,
            );
        }
    }

    /// Pop the oldest byte, or `None` when the ring is empty.
    ///
    /// Consumer side only. Never blocks.
    #[inline]
    pub fn pop(&self) -> Option<u8> {
        loop {
            let read = self.read_idx.load(Ordering::Acquire);
            let write = self.write_idx.load(Ordering::Acquire);

            if read == write {
                return None;
            }

            let byte = unsafe { (*self.slots.get())[(read as usize) & Self::MASK] };

            // Claim the slot. Failure means the producer lapped us and
            // reclaimed it; retry on the new oldest byte.
            if self
                .read_idx
                .compare_exchange(
                    read,
                    read.wrapping_add(1),
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_ok()
            {
                return Some(byte);
            }
        }
    }

    /// Number of unread bytes. Clamped to the capacity: between the
    /// producer's index store and its lap correction the raw distance
    /// can transiently read one past `N`.
    #[inline]
    pub fn len(&self) -> usize {
        let write = self.write_idx.load(Ordering::Acquire);
        let read = self.read_idx.load(Ordering::Acquire);
        (write.wrapping_sub(read) as usize).min(N)
    }

    /// True when no unread bytes are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the next push will discard the oldest byte.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Fixed capacity of the ring.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Drop all unread bytes, returning the ring to empty.
    #[inline]
    pub fn clear(&self) {
        let write = self.write_idx.load(Ordering::Acquire);
        self.read_idx.store(write, Ordering::Release);
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_fifo_order() {
        let ring = RingBuffer::<8>::new();

        for b in [0x10u8, 0x20, 0x30] {
            ring.push(b);
        }

        assert_eq!(ring.pop(), Some(0x10));
        assert_eq!(ring.pop(), Some(0x20));
        assert_eq!(ring.pop(), Some(0x30));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_ring_count_tracks_net_pushes() {
        let ring = RingBuffer::<8>::new();

        assert!(ring.is_empty());
        assert_eq!(ring.capacity(), 8);

        for b in 0..5u8 {
            ring.push(b);
        }
        assert_eq!(ring.len(), 5);

        ring.pop();
        ring.pop();
        assert_eq!(ring.len(), 3);

        ring.push(99);
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_ring_overwrite_drops_exactly_oldest() {
        let ring = RingBuffer::<4>::new();

        // 6 pushes into a 4-slot ring: bytes 0 and 1 are lost.
        for b in 0..6u8 {
            ring.push(b);
        }

        assert_eq!(ring.len(), 4);
        assert!(ring.is_full());
        assert_eq!(ring.pop(), Some(2));
        assert_eq!(ring.pop(), Some(3));
        assert_eq!(ring.pop(), Some(4));
        assert_eq!(ring.pop(), Some(5));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_ring_count_never_exceeds_capacity() {
        let ring = RingBuffer::<4>::new();

        for b in 0..100u8 {
            ring.push(b);
            assert!(ring.len() <= 4);
        }
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_ring_wraparound_keeps_order() {
        let ring = RingBuffer::<4>::new();

        // Interleave pushes and pops so the indices wrap several times.
        for round in 0..20u8 {
            ring.push(round);
            ring.push(round.wrapping_add(100));
            assert_eq!(ring.pop(), Some(round));
            assert_eq!(ring.pop(), Some(round.wrapping_add(100)));
        }
        assert!(ring.is_empty());
    }

    #[test]
    fn test_ring_clear() {
        let ring = RingBuffer::<8>::new();

        ring.push(1);
        ring.push(2);
        ring.clear();

        assert!(ring.is_empty());
        assert_eq!(ring.pop(), None);

        // Still usable after reset.
        ring.push(7);
        assert_eq!(ring.pop(), Some(7));
    }

    #[test]
    fn test_ring_spsc_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let ring = Arc::new(RingBuffer::<64>::new());
        let producer_ring = Arc::clone(&ring);

        let producer = thread::spawn(move || {
            for b in 0..=255u8 {
                producer_ring.push(b);
                // Stay under capacity so nothing is dropped.
                while producer_ring.len() > 32 {
                    thread::yield_now();
                }
            }
        });

        let mut received = Vec::new();
        while received.len() < 256 {
            if let Some(b) = ring.pop() {
                received.push(b);
            }
        }
        producer.join().unwrap();

        let expected: Vec<u8> = (0..=255u8).collect();
        assert_eq!(received, expected);
    }
}
