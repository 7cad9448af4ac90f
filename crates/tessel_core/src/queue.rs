//! # Bounded Queue
//!
//! A fixed-capacity FIFO with a destructive overflow policy: pushing onto a
//! full queue throws away everything pending, starts a fresh queue of the
//! same capacity and then appends the new item.
//!
//! ## Thread Safety
//!
//! Any number of producers may push while one consumer pops. The channel
//! is swapped out under a write lock, and the fullness check is repeated
//! once the lock is held, so two pushers racing on a full queue flush it
//! only once and neither loses its own item.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::RwLock;

/// What happened to a pushed item.
///
/// Pushing never fails; this is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The item was appended.
    Queued,
    /// The queue was full. Its contents were discarded and the item was
    /// appended to the fresh queue.
    Flushed,
    /// An identical UI-refresh request was already pending; nothing was queued.
    Deduplicated,
}

struct Channel<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
}

impl<T> Channel<T> {
    fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }
}

/// Fixed-capacity FIFO that flushes itself on overflow.
pub struct BoundedQueue<T> {
    /// Name used in overflow warnings.
    name: &'static str,
    capacity: usize,
    channel: RwLock<Channel<T>>,
    /// Number of overflow flushes since creation.
    flushes: AtomicU64,
}

impl<T> BoundedQueue<T> {
    /// Creates an empty queue.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            name,
            capacity,
            channel: RwLock::new(Channel::with_capacity(capacity)),
            flushes: AtomicU64::new(0),
        }
    }

    /// Appends an item, flushing the queue first if it is full.
    pub fn push(&self, item: T) -> PushOutcome {
        let item = {
            let channel = self.channel.read();
            match channel.sender.try_send(item) {
                Ok(()) => return PushOutcome::Queued,
                Err(TrySendError::Full(item) | TrySendError::Disconnected(item)) => item,
            }
        };

        let mut channel = self.channel.write();
        let outcome = if channel.sender.is_full() {
            *channel = Channel::with_capacity(self.capacity);
            self.flushes.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                queue = self.name,
                capacity = self.capacity,
                "event queue overflow, all pending events flushed"
            );
            PushOutcome::Flushed
        } else {
            // Another pusher flushed between our two lock acquisitions.
            PushOutcome::Queued
        };

        // Nobody else can send while we hold the write lock and the
        // channel has room.
        let sent = channel.sender.try_send(item);
        debug_assert!(sent.is_ok(), "send under write lock failed");
        outcome
    }

    /// Removes and returns the oldest item, or `None` if empty.
    #[must_use]
    pub fn pop(&self) -> Option<T> {
        self.channel.read().receiver.try_recv().ok()
    }

    /// Removes and returns every pending item in FIFO order.
    #[must_use]
    pub fn drain(&self) -> Vec<T> {
        let channel = self.channel.read();
        let mut items = Vec::with_capacity(channel.receiver.len());
        while let Ok(item) = channel.receiver.try_recv() {
            items.push(item);
        }
        items
    }

    /// Discards every pending item.
    pub fn clear(&self) {
        *self.channel.write() = Channel::with_capacity(self.capacity);
    }

    /// Number of pending items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.channel.read().receiver.len()
    }

    /// Returns true if nothing is pending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channel.read().receiver.is_empty()
    }

    /// Maximum number of pending items.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of overflow flushes since the queue was created.
    #[must_use]
    pub fn overflow_count(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }
}

impl<T> std::fmt::Debug for BoundedQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedQueue")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("overflow_count", &self.overflow_count())
            .finish()
    }
}
