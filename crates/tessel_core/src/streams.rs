//! # Dual Event Streams
//!
//! Events are split into two bounded queues:
//!
//! ```text
//!                 push(event)
//!                      │
//!          UPDATE_UI? ─┤── key already pending ──> dropped
//!                      │
//!        ┌─────────────┴─────────────┐
//!   internal kind               everything else
//!        │                           │
//!  ┌─────▼──────┐             ┌──────▼─────┐
//!  │  internal  │             │  external  │
//!  │  (engine)  │             │   (host)   │
//!  └─────┬──────┘             └──────┬─────┘
//!        │                           │
//!  drained once per frame     popped at the host's pace
//! ```
//!
//! The engine drains its own stream every frame regardless of whether the
//! host ever reads the external one, so a quiet host can never starve a
//! quit or state-change request.
//!
//! UI layout changes tend to request the same repaint many times per
//! frame. Only one `UPDATE_UI` event per message key may be pending in the
//! external stream; the key is released when that event is popped, or
//! when an overflow flush or clear discards it.

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::event::{Event, EventKind};
use crate::queue::{BoundedQueue, PushOutcome};
use crate::registry::EventTypeRegistry;

/// Default capacity of each engine stream.
pub const DEFAULT_STREAM_CAPACITY: usize = 1000;

/// The internal and external event streams plus refresh bookkeeping.
#[derive(Debug)]
pub struct DualEventQueue {
    internal: BoundedQueue<Event>,
    external: BoundedQueue<Event>,
    /// Message keys of the `UPDATE_UI` events currently in `external`.
    ///
    /// Held across every external push, pop and clear, so the set always
    /// matches the refresh events actually queued.
    pending_refresh: Mutex<HashSet<String>>,
}

impl DualEventQueue {
    /// Creates both streams with the same capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            internal: BoundedQueue::new("internal", capacity),
            external: BoundedQueue::new("external", capacity),
            pending_refresh: Mutex::new(HashSet::with_capacity(100)),
        }
    }

    /// Routes an event to its stream.
    ///
    /// Never fails. A refresh for a key that is already pending is dropped
    /// and reported as [`PushOutcome::Deduplicated`]. Kinds that are neither
    /// built in nor registered are still delivered to the host, with a
    /// warning.
    pub fn push(&self, registry: &EventTypeRegistry, event: Event) -> PushOutcome {
        let kind = event.kind();
        if registry.is_internal(kind) {
            return self.internal.push(event);
        }
        if !kind.is_builtin() && !registry.is_custom(kind) {
            tracing::warn!(kind = %kind, "pushing unregistered event kind");
        }

        // Any external push may flush, so the pending set is locked for
        // every one of them and cleared in the same step as the flush.
        let mut pending = self.pending_refresh.lock();
        let refresh_key = if event.is_ui_refresh() {
            if pending.contains(event.message()) {
                return PushOutcome::Deduplicated;
            }
            Some(event.message().to_owned())
        } else {
            None
        };

        let outcome = self.external.push(event);
        if outcome == PushOutcome::Flushed {
            // Every refresh we were tracking was just thrown away.
            pending.clear();
        }
        if let Some(key) = refresh_key {
            pending.insert(key);
        }
        outcome
    }

    /// Pops the oldest host-visible event.
    ///
    /// Popping a refresh event releases its key for future requests.
    #[must_use]
    pub fn pop_external(&self) -> Option<Event> {
        let mut pending = self.pending_refresh.lock();
        let event = self.external.pop()?;
        if event.kind() == EventKind::UPDATE_UI {
            pending.remove(event.message());
        }
        Some(event)
    }

    /// Pops the oldest engine-internal event.
    #[must_use]
    pub fn pop_internal(&self) -> Option<Event> {
        self.internal.pop()
    }

    /// Discards every pending host-visible event.
    pub fn clear_external(&self) {
        let mut pending = self.pending_refresh.lock();
        self.external.clear();
        pending.clear();
    }

    /// Discards every pending engine-internal event.
    pub fn clear_internal(&self) {
        self.internal.clear();
    }

    /// Number of pending host-visible events.
    #[must_use]
    pub fn external_len(&self) -> usize {
        self.external.len()
    }

    /// Number of pending engine-internal events.
    #[must_use]
    pub fn internal_len(&self) -> usize {
        self.internal.len()
    }

    /// Returns true if a refresh for `key` is waiting in the external stream.
    #[must_use]
    pub fn is_refresh_pending(&self, key: &str) -> bool {
        self.pending_refresh.lock().contains(key)
    }

    /// Overflow flushes of the (internal, external) streams so far.
    #[must_use]
    pub fn overflow_count(&self) -> (u64, u64) {
        (self.internal.overflow_count(), self.external.overflow_count())
    }
}

impl Default for DualEventQueue {
    fn default() -> Self {
        Self::new(DEFAULT_STREAM_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ElementId;

    fn setup(capacity: usize) -> (EventTypeRegistry, DualEventQueue) {
        (EventTypeRegistry::new(), DualEventQueue::new(capacity))
    }

    #[test]
    fn test_external_fifo() {
        let (registry, queue) = setup(3);
        for msg in ["A", "B", "C"] {
            queue.push(&registry, Event::new(EventKind::BUTTON_PRESS, msg));
        }

        assert_eq!(queue.pop_external().unwrap().message(), "A");
        assert_eq!(queue.pop_external().unwrap().message(), "B");
        assert_eq!(queue.pop_external().unwrap().message(), "C");
        assert!(queue.pop_external().is_none());
    }

    #[test]
    fn test_refresh_dedup() {
        let (registry, queue) = setup(10);
        let first = queue.push(&registry, Event::new(EventKind::UPDATE_UI, "hp_bar"));
        let second = queue.push(&registry, Event::new(EventKind::UPDATE_UI, "hp_bar"));

        assert_eq!(first, PushOutcome::Queued);
        assert_eq!(second, PushOutcome::Deduplicated);
        assert_eq!(queue.external_len(), 1);

        assert_eq!(queue.pop_external().unwrap().message(), "hp_bar");
        assert!(queue.pop_external().is_none());
    }

    #[test]
    fn test_refresh_window_closes_on_pop() {
        let (registry, queue) = setup(10);
        queue.push(&registry, Event::new(EventKind::UPDATE_UI, "hp_bar"));
        assert!(queue.is_refresh_pending("hp_bar"));

        let _ = queue.pop_external();
        assert!(!queue.is_refresh_pending("hp_bar"));

        let again = queue.push(&registry, Event::new(EventKind::UPDATE_UI, "hp_bar"));
        assert_eq!(again, PushOutcome::Queued);
        assert_eq!(queue.pop_external().unwrap().message(), "hp_bar");
    }

    #[test]
    fn test_distinct_refresh_keys_coexist() {
        let (registry, queue) = setup(10);
        queue.push(&registry, Event::new(EventKind::UPDATE_UI, "hp_bar"));
        queue.push(&registry, Event::new(EventKind::UPDATE_UI, "mana_bar"));
        queue.push(&registry, Event::from_element(EventKind::UPDATE_UI, "hp_bar", ElementId(3)));
        assert_eq!(queue.external_len(), 2);
    }

    #[test]
    fn test_internal_external_isolation() {
        let (registry, queue) = setup(10);
        let custom = registry.register_custom_kind();

        queue.push(&registry, Event::new(EventKind::QUIT, ""));
        queue.push(&registry, Event::new(custom, "score"));
        queue.push(&registry, Event::new(EventKind::CHANGE_STATE, "menu"));
        queue.push(&registry, Event::new(EventKind::ANIMATION_DONE, "fade"));

        let external: Vec<_> = std::iter::from_fn(|| queue.pop_external()).collect();
        let internal: Vec<_> = std::iter::from_fn(|| queue.pop_internal()).collect();

        assert_eq!(
            external.iter().map(Event::kind).collect::<Vec<_>>(),
            vec![custom, EventKind::ANIMATION_DONE]
        );
        assert_eq!(
            internal.iter().map(Event::kind).collect::<Vec<_>>(),
            vec![EventKind::QUIT, EventKind::CHANGE_STATE]
        );
    }

    #[test]
    fn test_overflow_scenario() {
        let (registry, queue) = setup(2);
        queue.push(&registry, Event::new(EventKind::BUTTON_PRESS, "X"));
        queue.push(&registry, Event::new(EventKind::BUTTON_PRESS, "Y"));
        let outcome = queue.push(&registry, Event::new(EventKind::BUTTON_PRESS, "Z"));

        assert_eq!(outcome, PushOutcome::Flushed);
        assert_eq!(queue.external_len(), 1);
        assert_eq!(queue.overflow_count(), (0, 1));
        assert_eq!(queue.pop_external().unwrap().message(), "Z");
    }

    #[test]
    fn test_overflow_releases_flushed_refresh_keys() {
        let (registry, queue) = setup(2);
        queue.push(&registry, Event::new(EventKind::UPDATE_UI, "hp_bar"));
        queue.push(&registry, Event::new(EventKind::BUTTON_PRESS, "Y"));
        queue.push(&registry, Event::new(EventKind::BUTTON_PRESS, "Z"));
        assert!(!queue.is_refresh_pending("hp_bar"));

        queue.push(&registry, Event::new(EventKind::BUTTON_PRESS, "W"));
        let outcome = queue.push(&registry, Event::new(EventKind::UPDATE_UI, "hp_bar"));
        assert_eq!(outcome, PushOutcome::Flushed);
        assert!(queue.is_refresh_pending("hp_bar"));
    }

    #[test]
    fn test_internal_overflow() {
        let (registry, queue) = setup(2);
        for _ in 0..3 {
            queue.push(&registry, Event::new(EventKind::QUIT, ""));
        }

        assert_eq!(queue.overflow_count(), (1, 0));
        assert_eq!(queue.internal_len(), 1);
        assert_eq!(queue.external_len(), 0);
    }

    #[test]
    fn test_unregistered_kind_goes_external() {
        let (registry, queue) = setup(4);
        let stray = EventKind(EventKind::MAX_BUILTIN.raw() + 40);
        assert!(!registry.is_custom(stray));

        assert_eq!(queue.push(&registry, Event::new(stray, "?")), PushOutcome::Queued);
        assert_eq!(queue.internal_len(), 0);
        assert_eq!(queue.pop_external().unwrap().kind(), stray);
    }

    #[test]
    fn test_pending_refresh_tracks_queue_under_contention() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(EventTypeRegistry::new());
        let queue = Arc::new(DualEventQueue::new(4));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let registry = Arc::clone(&registry);
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..500 {
                        if t % 2 == 0 {
                            let key = format!("panel_{}", i % 3);
                            queue.push(&registry, Event::new(EventKind::UPDATE_UI, key));
                        } else {
                            queue.push(&registry, Event::new(EventKind::BUTTON_PRESS, "x"));
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Every pending key has exactly one queued refresh, and vice versa.
        let keys = ["panel_0", "panel_1", "panel_2"];
        let pending: Vec<bool> = keys.iter().map(|k| queue.is_refresh_pending(k)).collect();
        let mut queued = [0usize; 3];
        while let Some(event) = queue.pop_external() {
            if event.is_ui_refresh() {
                let idx = keys.iter().position(|k| *k == event.message()).unwrap();
                queued[idx] += 1;
            }
        }
        for (idx, key) in keys.iter().enumerate() {
            assert_eq!(queued[idx], usize::from(pending[idx]), "key {key}");
            assert!(!queue.is_refresh_pending(key));
        }
    }

    #[test]
    fn test_clear_is_per_stream() {
        let (registry, queue) = setup(10);
        queue.push(&registry, Event::new(EventKind::QUIT, ""));
        queue.push(&registry, Event::new(EventKind::UPDATE_UI, "map"));

        queue.clear_external();
        assert_eq!(queue.external_len(), 0);
        assert_eq!(queue.internal_len(), 1);
        assert!(!queue.is_refresh_pending("map"));

        queue.push(&registry, Event::new(EventKind::BUTTON_PRESS, "ok"));
        queue.clear_internal();
        assert_eq!(queue.internal_len(), 0);
        assert_eq!(queue.external_len(), 1);
    }
}
