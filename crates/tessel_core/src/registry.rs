//! Event kind registry.
//!
//! Hands out host-defined kinds above the reserved range and records which
//! kinds the engine consumes itself.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::event::EventKind;

/// Allocates custom event kinds and answers internal/external routing.
///
/// The internal set is fixed when the registry is built. Host kinds are
/// always external.
#[derive(Debug)]
pub struct EventTypeRegistry {
    /// Number of custom kinds handed out so far.
    custom_count: AtomicU32,
    /// Kinds routed to the engine's internal stream.
    internal: HashSet<EventKind>,
}

impl EventTypeRegistry {
    /// Creates a registry with the engine's internal kinds marked.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            custom_count: AtomicU32::new(0),
            internal: HashSet::with_capacity(EventKind::MAX_BUILTIN.raw() as usize),
        };
        registry.mark_internal(EventKind::QUIT);
        registry.mark_internal(EventKind::CHANGE_STATE);
        registry
    }

    fn mark_internal(&mut self, kind: EventKind) {
        self.internal.insert(kind);
    }

    /// Returns a fresh kind, strictly greater than every kind returned before.
    ///
    /// The first call returns `MAX_BUILTIN + 1`.
    pub fn register_custom_kind(&self) -> EventKind {
        let n = self.custom_count.fetch_add(1, Ordering::Relaxed) + 1;
        let kind = EventKind(EventKind::MAX_BUILTIN.raw() + n);
        tracing::debug!(kind = kind.raw(), "registered custom event kind");
        kind
    }

    /// Returns true if events of this kind go to the internal stream.
    #[inline]
    #[must_use]
    pub fn is_internal(&self, kind: EventKind) -> bool {
        self.internal.contains(&kind)
    }

    /// Returns true if `kind` was handed out by this registry.
    #[must_use]
    pub fn is_custom(&self, kind: EventKind) -> bool {
        let max = EventKind::MAX_BUILTIN.raw();
        kind.raw() > max && kind.raw() - max <= self.custom_kind_count()
    }

    /// Number of custom kinds registered so far.
    #[must_use]
    pub fn custom_kind_count(&self) -> u32 {
        self.custom_count.load(Ordering::Relaxed)
    }
}

impl Default for EventTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
