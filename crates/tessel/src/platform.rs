//! Seams to the native window/terminal layer.
//!
//! The engine does not know how input is read or how frames are painted.
//! A backend implements these two traits and hands them to the
//! [`FrameLoop`](crate::FrameLoop).

use std::collections::VecDeque;

use tessel_ui::Key;

/// A native input signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    /// The user asked to close the application.
    Quit,
    /// The window came back from minimized/hidden; cached output is stale.
    WindowRestored,
    /// A key was released.
    KeyUp(Key),
}

/// Non-blocking source of native input.
pub trait InputSource {
    /// Returns the next pending signal, or `None` once none are left for now.
    fn poll(&mut self) -> Option<InputSignal>;
}

/// Paints frames.
pub trait RenderSink {
    /// Returns true once the surface is set up and can be drawn to.
    fn is_ready(&self) -> bool;

    /// Paints the current frame, UI overlay included.
    fn render(&mut self);

    /// Invalidates cached output so the next `render` repaints everything.
    fn force_redraw(&mut self);
}

/// Replays a fixed list of signals, one batch per frame.
///
/// Useful for headless runs and scripted tests.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputSignal>>,
    current: Option<std::vec::IntoIter<InputSignal>>,
}

impl ScriptedInput {
    /// Creates a script; each inner vector is delivered during one frame.
    #[must_use]
    pub fn new(frames: Vec<Vec<InputSignal>>) -> Self {
        Self {
            frames: frames.into(),
            current: None,
        }
    }

    /// Number of batches not yet delivered.
    #[must_use]
    pub fn remaining_frames(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<InputSignal> {
        let batch = match self.current.as_mut() {
            Some(batch) => batch,
            None => self.current.insert(self.frames.pop_front()?.into_iter()),
        };
        let signal = batch.next();
        if signal.is_none() {
            // End of this frame's batch; the next poll starts the next one.
            self.current = None;
        }
        signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(input: &mut ScriptedInput) -> Vec<InputSignal> {
        std::iter::from_fn(|| input.poll()).collect()
    }

    #[test]
    fn test_scripted_batches() {
        let mut input = ScriptedInput::new(vec![
            vec![InputSignal::KeyUp(Key::Up), InputSignal::KeyUp(Key::Down)],
            vec![],
            vec![InputSignal::Quit],
        ]);

        assert_eq!(
            drain(&mut input),
            vec![InputSignal::KeyUp(Key::Up), InputSignal::KeyUp(Key::Down)]
        );
        assert!(drain(&mut input).is_empty());
        assert_eq!(drain(&mut input), vec![InputSignal::Quit]);
        assert_eq!(input.remaining_frames(), 0);
        assert!(drain(&mut input).is_empty());
    }
}
