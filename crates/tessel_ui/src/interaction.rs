//! # Interaction Stream
//!
//! Widgets report activations and value changes here. The host is the only
//! consumer and reads at its own pace; the engine never looks at this
//! stream. Same bounded, flush-on-overflow behaviour as the engine streams,
//! without the internal/external split or refresh dedup.

use tessel_core::{BoundedQueue, ElementId, PushOutcome, DEFAULT_INTERACTION_CAPACITY};

/// What a widget did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    /// No particular interaction.
    None,
    /// The widget was activated (button pressed, item chosen).
    Activate,
    /// The widget's value changed.
    Change,
}

/// A widget interaction. The origin is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionEvent {
    /// The widget that raised the event.
    pub origin: ElementId,
    /// What happened.
    pub kind: InteractionKind,
    /// Free-form payload, e.g. the new value.
    pub message: String,
}

/// Bounded FIFO of widget interactions.
#[derive(Debug)]
pub struct InteractionQueue {
    queue: BoundedQueue<InteractionEvent>,
}

impl InteractionQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: BoundedQueue::new("interaction", capacity),
        }
    }

    /// Records an interaction. Flushes the queue first if it is full.
    pub fn push(
        &self,
        origin: ElementId,
        kind: InteractionKind,
        message: impl Into<String>,
    ) -> PushOutcome {
        self.queue.push(InteractionEvent {
            origin,
            kind,
            message: message.into(),
        })
    }

    /// Removes and returns the oldest interaction.
    #[must_use]
    pub fn pop(&self) -> Option<InteractionEvent> {
        self.queue.pop()
    }

    /// Discards every pending interaction.
    pub fn clear(&self) {
        self.queue.clear();
    }

    /// Number of pending interactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of overflow flushes so far.
    #[must_use]
    pub fn overflow_count(&self) -> u64 {
        self.queue.overflow_count()
    }
}

impl Default for InteractionQueue {
    fn default() -> Self {
        Self::new(DEFAULT_INTERACTION_CAPACITY)
    }
}
