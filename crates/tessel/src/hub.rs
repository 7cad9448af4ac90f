//! # Event Hub
//!
//! The one object every producer and consumer of events talks to. It owns
//! the kind registry, the internal/external streams and the interaction
//! stream. Share it with `Arc`; every method takes `&self`.
//!
//! ```text
//!   widgets ──push_ui_event──┐         ┌──pop_external_event──> host
//!   states ───push_event─────┼─> Hub ──┼──pop_interaction_event──> host
//!   widgets ─push_interaction┘         └──pop_internal_event──> FrameLoop
//! ```

use tessel_core::{
    DualEventQueue, ElementId, EngineConfig, Event, EventKind, EventTypeRegistry, PushOutcome,
};
use tessel_ui::{InteractionEvent, InteractionKind, InteractionQueue};

/// Owned event context for one engine instance.
#[derive(Debug)]
pub struct EventHub {
    registry: EventTypeRegistry,
    streams: DualEventQueue,
    interactions: InteractionQueue,
}

impl EventHub {
    /// Creates a hub with the capacities from `config`.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            registry: EventTypeRegistry::new(),
            streams: DualEventQueue::new(config.event_capacity),
            interactions: InteractionQueue::new(config.interaction_capacity),
        }
    }

    // =========================================================================
    // Vocabulary
    // =========================================================================

    /// Allocates a new host-defined event kind. Host kinds are always external.
    pub fn register_custom_kind(&self) -> EventKind {
        self.registry.register_custom_kind()
    }

    /// The kind registry.
    #[must_use]
    pub fn registry(&self) -> &EventTypeRegistry {
        &self.registry
    }

    // =========================================================================
    // Engine streams
    // =========================================================================

    /// Emits a generic event.
    pub fn push_event(&self, kind: EventKind, message: impl Into<String>) -> PushOutcome {
        self.streams.push(&self.registry, Event::new(kind, message))
    }

    /// Emits an event on behalf of a UI element.
    pub fn push_ui_event(
        &self,
        kind: EventKind,
        message: impl Into<String>,
        origin: ElementId,
    ) -> PushOutcome {
        self.streams
            .push(&self.registry, Event::from_element(kind, message, origin))
    }

    /// Pops the oldest host-visible event.
    #[must_use]
    pub fn pop_external_event(&self) -> Option<Event> {
        self.streams.pop_external()
    }

    /// Pops the oldest engine-internal event. Called by the frame loop.
    #[must_use]
    pub fn pop_internal_event(&self) -> Option<Event> {
        self.streams.pop_internal()
    }

    /// Discards all pending host-visible events.
    pub fn clear_external_events(&self) {
        self.streams.clear_external();
    }

    /// Discards all pending engine-internal events.
    pub fn clear_internal_events(&self) {
        self.streams.clear_internal();
    }

    /// The internal/external streams.
    #[must_use]
    pub fn streams(&self) -> &DualEventQueue {
        &self.streams
    }

    // =========================================================================
    // Interaction stream
    // =========================================================================

    /// Records a widget interaction.
    pub fn push_interaction(
        &self,
        origin: ElementId,
        kind: InteractionKind,
        message: impl Into<String>,
    ) -> PushOutcome {
        self.interactions.push(origin, kind, message)
    }

    /// Pops the oldest widget interaction.
    #[must_use]
    pub fn pop_interaction_event(&self) -> Option<InteractionEvent> {
        self.interactions.pop()
    }

    /// Discards all pending widget interactions.
    pub fn clear_interaction_events(&self) {
        self.interactions.clear();
    }

    /// The interaction stream.
    #[must_use]
    pub fn interactions(&self) -> &InteractionQueue {
        &self.interactions
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
