//! Application states.
//!
//! A state is anything that takes input, updates itself and draws: a level,
//! a menu, a dialog. Exactly one is active at a time.

use tessel_ui::Key;

use crate::hub::EventHub;

/// What a state can see during one frame.
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    /// Event hub for emitting and consuming events.
    pub events: &'a EventHub,
    /// Current frame number.
    pub frame: u64,
}

/// A screen of the application.
///
/// Only `update` is required; input and rendering default to doing nothing.
pub trait State {
    /// Called for every key released this frame, before `update`.
    fn handle_key(&mut self, key: Key, ctx: &FrameContext<'_>) {
        let _ = (key, ctx);
    }

    /// Advances the state by one tick.
    fn update(&mut self, ctx: &FrameContext<'_>);

    /// Draws the state. The UI overlay is rendered right after.
    fn render(&mut self, ctx: &FrameContext<'_>) {
        let _ = ctx;
    }
}

/// Minimal state that only counts its update ticks.
///
/// Compose other states around it to get a tick counter for free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseState {
    tick: u64,
}

impl BaseState {
    /// Creates a state at tick zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { tick: 0 }
    }

    /// Number of updates since creation.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.tick
    }
}

impl State for BaseState {
    fn update(&mut self, _ctx: &FrameContext<'_>) {
        self.tick += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_state_counts_ticks() {
        let hub = EventHub::default();
        let mut state = BaseState::new();
        for frame in 0..3 {
            let ctx = FrameContext { events: &hub, frame };
            state.handle_key(Key::Enter, &ctx);
            state.update(&ctx);
            state.render(&ctx);
        }
        assert_eq!(state.ticks(), 3);
    }
}
