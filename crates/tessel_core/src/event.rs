//! # Events
//!
//! The unit of traffic on every stream: a kind, a free-form message and,
//! for events raised by a UI element, the element that raised it.

use std::fmt;

/// Identifier of an event kind.
///
/// The low range `0..MAX_BUILTIN` is reserved for the engine's own kinds.
/// Host applications obtain further kinds from
/// [`EventTypeRegistry::register_custom_kind`](crate::EventTypeRegistry::register_custom_kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventKind(pub u32);

impl EventKind {
    /// Some UI region needs to be repainted. Deduplicated by message.
    pub const UPDATE_UI: Self = Self(0);
    /// The active state must be swapped. Internal.
    pub const CHANGE_STATE: Self = Self(1);
    /// Shut the frame loop down. Internal.
    pub const QUIT: Self = Self(2);
    /// Focus moved between UI fields.
    pub const TAB_FIELD: Self = Self(3);
    /// An animation finished this frame.
    pub const ANIMATION_DONE: Self = Self(4);
    /// A button was pressed.
    pub const BUTTON_PRESS: Self = Self(5);
    /// A list selection was cycled.
    pub const LIST_CYCLE: Self = Self(6);
    /// End of the reserved range. Never emitted.
    pub const MAX_BUILTIN: Self = Self(7);

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns true if this kind lies inside the reserved range.
    #[inline]
    #[must_use]
    pub const fn is_builtin(self) -> bool {
        self.0 <= Self::MAX_BUILTIN.0
    }

    /// Name of a built-in kind, `None` for host-registered kinds.
    #[must_use]
    pub const fn builtin_name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("update_ui"),
            1 => Some("change_state"),
            2 => Some("quit"),
            3 => Some("tab_field"),
            4 => Some("animation_done"),
            5 => Some("button_press"),
            6 => Some("list_cycle"),
            7 => Some("max_builtin"),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "custom#{}", self.0),
        }
    }
}

/// Opaque handle of the UI element that raised an event.
///
/// The engine never looks inside; it is carried for provenance only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Creates a new element ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// An immutable notification travelling through an event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: EventKind,
    message: String,
    origin: Option<ElementId>,
}

impl Event {
    /// Creates a generic event with no UI origin.
    #[must_use]
    pub fn new(kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            origin: None,
        }
    }

    /// Creates an event raised by a UI element.
    #[must_use]
    pub fn from_element(kind: EventKind, message: impl Into<String>, origin: ElementId) -> Self {
        Self {
            kind,
            message: message.into(),
            origin: Some(origin),
        }
    }

    /// The event's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The free-form payload. For `UPDATE_UI` this is the dedup key.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The element that raised the event, if any.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Option<ElementId> {
        self.origin
    }

    /// Returns true for UI-refresh events.
    #[inline]
    #[must_use]
    pub fn is_ui_refresh(&self) -> bool {
        self.kind == EventKind::UPDATE_UI
    }
}
