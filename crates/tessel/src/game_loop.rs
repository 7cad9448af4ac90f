//! # TESSEL Frame Loop
//!
//! One iteration:
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. INPUT                                                            │
//! │    ├─ Quit            → stop after this frame                       │
//! │    ├─ WindowRestored  → force a full redraw                         │
//! │    └─ KeyUp(key)      → active state's handle_key                   │
//! │                                                                     │
//! │ 2. UPDATE                                                           │
//! │    └─ active state's update                                         │
//! │                                                                     │
//! │ 3. RENDER                                                           │
//! │    ├─ active state's render                                         │
//! │    └─ UI overlay (render sink)                                      │
//! │                                                                     │
//! │ 4. END FRAME                                                        │
//! │    ├─ Drain the internal stream (QUIT, CHANGE_STATE)                │
//! │    └─ Sleep out the rest of the frame budget, if capped             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The internal stream is drained only in step 4, so a state swap never
//! happens partway through a frame's update or render.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tessel_core::{EngineConfig, EventKind, TesselError, TesselResult};

use crate::hub::EventHub;
use crate::platform::{InputSignal, InputSource, RenderSink};
use crate::state::{FrameContext, State};

/// Lifecycle of a [`FrameLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Preconditions not yet checked.
    NotReady,
    /// Frames are being run.
    Running,
    /// A quit was requested; no further frames run.
    Stopped,
}

struct ActiveState {
    name: String,
    state: Box<dyn State>,
}

/// Drives input, application states and rendering, one frame at a time.
pub struct FrameLoop {
    /// Event hub shared with states, widgets and the host.
    hub: Arc<EventHub>,
    config: EngineConfig,
    input: Option<Box<dyn InputSource>>,
    renderer: Option<Box<dyn RenderSink>>,
    active: Option<ActiveState>,
    /// Inactive states that CHANGE_STATE can switch to, by name.
    states: HashMap<String, Box<dyn State>>,
    phase: LoopPhase,
    frame_count: u64,
}

impl FrameLoop {
    /// Creates a loop with a fresh event hub sized from `config`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let hub = Arc::new(EventHub::new(&config));
        Self::with_hub(config, hub)
    }

    /// Creates a loop around an existing hub.
    #[must_use]
    pub fn with_hub(config: EngineConfig, hub: Arc<EventHub>) -> Self {
        Self {
            hub,
            config,
            input: None,
            renderer: None,
            active: None,
            states: HashMap::new(),
            phase: LoopPhase::NotReady,
            frame_count: 0,
        }
    }

    /// Sets the native input source.
    pub fn set_input(&mut self, input: impl InputSource + 'static) {
        self.input = Some(Box::new(input));
    }

    /// Sets the render sink.
    pub fn set_renderer(&mut self, renderer: impl RenderSink + 'static) {
        self.renderer = Some(Box::new(renderer));
    }

    /// Makes `state` the active state, replacing any previous one.
    ///
    /// The replaced state stays available under its name.
    pub fn install_state(&mut self, name: impl Into<String>, state: impl State + 'static) {
        let incoming = ActiveState {
            name: name.into(),
            state: Box::new(state),
        };
        self.states.remove(&incoming.name);
        if let Some(previous) = self.active.replace(incoming) {
            self.states.insert(previous.name, previous.state);
        }
    }

    /// Registers a state that a CHANGE_STATE event naming it will activate.
    ///
    /// A name already taken by the active state is rejected, since that
    /// state returns to the registry under its name when swapped out.
    /// Returns whether `state` was registered.
    pub fn register_state(
        &mut self,
        name: impl Into<String>,
        state: impl State + 'static,
    ) -> bool {
        let name = name.into();
        if self.active_state() == Some(name.as_str()) {
            tracing::warn!(state = %name, "state name already active, registration ignored");
            return false;
        }
        self.states.insert(name, Box::new(state));
        true
    }

    /// Checks preconditions and enters [`LoopPhase::Running`].
    ///
    /// A stopped loop stays stopped.
    ///
    /// # Errors
    ///
    /// [`TesselError::RenderSurfaceNotReady`] if no render sink is set or it
    /// is not ready, [`TesselError::NoActiveState`] if no state is installed.
    pub fn start(&mut self) -> TesselResult<()> {
        if self.phase == LoopPhase::Stopped {
            return Ok(());
        }
        if !self.renderer.as_ref().is_some_and(|r| r.is_ready()) {
            return Err(TesselError::RenderSurfaceNotReady);
        }
        if self.active.is_none() {
            return Err(TesselError::NoActiveState);
        }
        self.phase = LoopPhase::Running;
        tracing::info!(
            state = self.active_state(),
            event_capacity = self.config.event_capacity,
            "frame loop started"
        );
        Ok(())
    }

    /// Runs frames until a quit is requested.
    ///
    /// Returns immediately once the loop is stopped.
    ///
    /// # Errors
    ///
    /// Fails before the first frame if [`FrameLoop::start`] fails.
    pub fn run(&mut self) -> TesselResult<()> {
        if self.phase == LoopPhase::Stopped {
            return Ok(());
        }
        self.start()?;
        while self.phase == LoopPhase::Running {
            let started = Instant::now();
            self.frame();
            self.pace(started);
        }
        tracing::info!(frames = self.frame_count, "frame loop stopped");
        Ok(())
    }

    /// Runs exactly one frame, starting the loop first if needed.
    ///
    /// Does nothing once the loop is stopped. Returns the phase after the
    /// frame.
    ///
    /// # Errors
    ///
    /// Same as [`FrameLoop::start`] when called in [`LoopPhase::NotReady`].
    pub fn run_frame(&mut self) -> TesselResult<LoopPhase> {
        match self.phase {
            LoopPhase::NotReady => self.start()?,
            LoopPhase::Stopped => return Ok(LoopPhase::Stopped),
            LoopPhase::Running => {}
        }
        self.frame();
        Ok(self.phase)
    }

    fn frame(&mut self) {
        let mut quit_requested = false;
        let ctx = FrameContext {
            events: &self.hub,
            frame: self.frame_count,
        };

        if let Some(input) = self.input.as_mut() {
            while let Some(signal) = input.poll() {
                match signal {
                    InputSignal::Quit => quit_requested = true,
                    InputSignal::WindowRestored => {
                        if let Some(renderer) = self.renderer.as_mut() {
                            tracing::debug!("window restored, forcing redraw");
                            renderer.force_redraw();
                        }
                    }
                    InputSignal::KeyUp(key) => {
                        if let Some(active) = self.active.as_mut() {
                            active.state.handle_key(key, &ctx);
                        }
                    }
                }
            }
        }

        if let Some(active) = self.active.as_mut() {
            active.state.update(&ctx);
            active.state.render(&ctx);
        }
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render();
        }

        while let Some(event) = self.hub.pop_internal_event() {
            match event.kind() {
                EventKind::QUIT => quit_requested = true,
                EventKind::CHANGE_STATE => self.change_state(event.message()),
                other => tracing::debug!(kind = %other, "ignoring internal event"),
            }
        }

        self.frame_count += 1;
        if quit_requested {
            self.phase = LoopPhase::Stopped;
        }
    }

    fn change_state(&mut self, name: &str) {
        if self.active_state() == Some(name) {
            return;
        }
        let Some(next) = self.states.remove(name) else {
            tracing::warn!(target_state = name, "change-state to unknown state ignored");
            return;
        };
        let incoming = ActiveState {
            name: name.to_owned(),
            state: next,
        };
        if let Some(previous) = self.active.replace(incoming) {
            tracing::debug!(from = %previous.name, to = name, "state changed");
            self.states.insert(previous.name, previous.state);
        }
    }

    fn pace(&self, started: Instant) {
        let elapsed = started.elapsed();
        let slow = self.config.slow_frame_threshold();
        if !slow.is_zero() && elapsed > slow {
            tracing::warn!(
                frame = self.frame_count,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                budget_ms = slow.as_secs_f64() * 1000.0,
                "frame exceeded budget"
            );
        }
        if let Some(budget) = self.config.frame_budget() {
            if let Some(remaining) = budget.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            }
        }
    }

    /// The event hub. Clone the `Arc` to hand it to producers.
    #[must_use]
    pub fn hub(&self) -> &Arc<EventHub> {
        &self.hub
    }

    /// Current lifecycle phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Number of frames completed.
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Name of the active state.
    #[must_use]
    pub fn active_state(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BaseState;

    struct ReadySink;

    impl RenderSink for ReadySink {
        fn is_ready(&self) -> bool {
            true
        }
        fn render(&mut self) {}
        fn force_redraw(&mut self) {}
    }

    #[test]
    fn test_loop_creation() {
        let frame_loop = FrameLoop::new(EngineConfig::default());
        assert_eq!(frame_loop.phase(), LoopPhase::NotReady);
        assert_eq!(frame_loop.frame_count(), 0);
        assert_eq!(frame_loop.active_state(), None);
    }

    #[test]
    fn test_requires_render_surface() {
        let mut frame_loop = FrameLoop::new(EngineConfig::default());
        frame_loop.install_state("main", BaseState::new());
        let err = frame_loop.run().unwrap_err();
        assert!(matches!(err, TesselError::RenderSurfaceNotReady));
        assert_eq!(frame_loop.frame_count(), 0);
    }

    #[test]
    fn test_requires_active_state() {
        let mut frame_loop = FrameLoop::new(EngineConfig::default());
        frame_loop.set_renderer(ReadySink);
        let err = frame_loop.run_frame().unwrap_err();
        assert!(matches!(err, TesselError::NoActiveState));
        assert_eq!(frame_loop.phase(), LoopPhase::NotReady);
    }

    #[test]
    fn test_internal_quit_stops_loop() {
        let mut frame_loop = FrameLoop::new(EngineConfig::default());
        frame_loop.set_renderer(ReadySink);
        frame_loop.install_state("main", BaseState::new());

        assert_eq!(frame_loop.run_frame().unwrap(), LoopPhase::Running);
        frame_loop.hub().push_event(EventKind::QUIT, "");
        assert_eq!(frame_loop.run_frame().unwrap(), LoopPhase::Stopped);
        assert_eq!(frame_loop.run_frame().unwrap(), LoopPhase::Stopped);
        assert_eq!(frame_loop.frame_count(), 2);
    }

    #[test]
    fn test_install_state_keeps_previous() {
        let mut frame_loop = FrameLoop::new(EngineConfig::default());
        frame_loop.set_renderer(ReadySink);
        frame_loop.install_state("menu", BaseState::new());
        frame_loop.install_state("level", BaseState::new());
        assert_eq!(frame_loop.active_state(), Some("level"));

        frame_loop.hub().push_event(EventKind::CHANGE_STATE, "menu");
        frame_loop.run_frame().unwrap();
        assert_eq!(frame_loop.active_state(), Some("menu"));
    }
}
