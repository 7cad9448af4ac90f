//! # TESSEL Terminal Demo
//!
//! Two screens driven by the frame loop on a crossterm terminal:
//! - `menu`: Enter to play, q to quit
//! - `play`: Space scores, b presses the bonus button, Esc back to menu
//!
//! Usage: `terminal_demo [config.toml]`. Logs go to stderr and are off
//! unless `RUST_LOG` is set, e.g. `RUST_LOG=debug terminal_demo 2>demo.log`.

use std::io::{self, Stdout, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableFocusChange, EnableFocusChange, Event as TermEvent, KeyCode, KeyEvent,
    KeyEventKind, KeyModifiers,
};
use crossterm::style::Print;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use parking_lot::Mutex;
use tessel::core::{ElementId, EngineConfig, EventKind};
use tessel::ui::{InteractionKind, Key};
use tessel::{
    BaseState, FrameContext, FrameLoop, InputSignal, InputSource, RenderSink, State,
};

// =============================================================================
// Terminal backend
// =============================================================================

/// Text the active state wants on screen.
#[derive(Default)]
struct Console {
    lines: Vec<String>,
    dirty: bool,
}

impl Console {
    fn set_lines(&mut self, lines: Vec<String>) {
        if self.lines != lines {
            self.lines = lines;
            self.dirty = true;
        }
    }
}

type SharedConsole = Arc<Mutex<Console>>;

struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Option<InputSignal> {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => {
                    tracing::error!(error = %e, "terminal input failed");
                    return Some(InputSignal::Quit);
                }
            }
            let signal = match event::read() {
                Ok(TermEvent::Key(key)) => translate_key(key),
                Ok(TermEvent::FocusGained | TermEvent::Resize(..)) => {
                    Some(InputSignal::WindowRestored)
                }
                Ok(_) => None,
                Err(e) => {
                    tracing::error!(error = %e, "terminal input failed");
                    Some(InputSignal::Quit)
                }
            };
            if signal.is_some() {
                return signal;
            }
        }
    }
}

fn translate_key(key: KeyEvent) -> Option<InputSignal> {
    // Without the keyboard enhancement protocol terminals only report
    // presses, so a press stands in for the release.
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputSignal::Quit);
    }
    let mapped = match key.code {
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(InputSignal::KeyUp(mapped))
}

struct TerminalSink {
    console: SharedConsole,
    out: Stdout,
}

impl TerminalSink {
    fn paint(&mut self) -> io::Result<()> {
        let mut console = self.console.lock();
        if !console.dirty {
            return Ok(());
        }
        queue!(self.out, Clear(ClearType::All))?;
        for (row, line) in (0u16..).zip(&console.lines) {
            queue!(self.out, MoveTo(0, row), Print(line))?;
        }
        self.out.flush()?;
        console.dirty = false;
        Ok(())
    }
}

impl RenderSink for TerminalSink {
    fn is_ready(&self) -> bool {
        crossterm::terminal::is_raw_mode_enabled().unwrap_or(false)
    }

    fn render(&mut self) {
        if let Err(e) = self.paint() {
            tracing::warn!(error = %e, "terminal paint failed");
        }
    }

    fn force_redraw(&mut self) {
        self.console.lock().dirty = true;
    }
}

/// Restores the terminal on drop, including on early return.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide, EnableFocusChange)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableFocusChange, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

// =============================================================================
// Application states
// =============================================================================

struct MenuState {
    base: BaseState,
    console: SharedConsole,
}

impl State for MenuState {
    fn handle_key(&mut self, key: Key, ctx: &FrameContext<'_>) {
        match key {
            Key::Enter => {
                ctx.events.push_event(EventKind::CHANGE_STATE, "play");
            }
            Key::Escape | Key::Char('q') => {
                ctx.events.push_event(EventKind::QUIT, "");
            }
            _ => {}
        }
    }

    fn update(&mut self, ctx: &FrameContext<'_>) {
        self.base.update(ctx);
    }

    fn render(&mut self, _ctx: &FrameContext<'_>) {
        self.console.lock().set_lines(vec![
            "TESSEL terminal demo".to_owned(),
            String::new(),
            "  Enter  play".to_owned(),
            "  q      quit".to_owned(),
        ]);
    }
}

const BONUS_BUTTON: ElementId = ElementId(1);

struct PlayState {
    base: BaseState,
    console: SharedConsole,
    score_kind: EventKind,
    score: u64,
    refreshes: u64,
    last_score_event: String,
}

impl PlayState {
    fn add_score(&mut self, points: u64, ctx: &FrameContext<'_>) {
        self.score += points;
        ctx.events.push_event(self.score_kind, self.score.to_string());
        ctx.events.push_event(EventKind::UPDATE_UI, "score_panel");
    }
}

impl State for PlayState {
    fn handle_key(&mut self, key: Key, ctx: &FrameContext<'_>) {
        match key {
            Key::Space => self.add_score(10, ctx),
            Key::Char('b') => {
                ctx.events
                    .push_interaction(BONUS_BUTTON, InteractionKind::Activate, "bonus");
            }
            Key::Escape => {
                ctx.events.push_event(EventKind::CHANGE_STATE, "menu");
            }
            Key::Char('q') => {
                ctx.events.push_event(EventKind::QUIT, "");
            }
            _ => {}
        }
    }

    fn update(&mut self, ctx: &FrameContext<'_>) {
        self.base.update(ctx);

        while let Some(event) = ctx.events.pop_external_event() {
            if event.kind() == EventKind::UPDATE_UI {
                self.refreshes += 1;
            } else if event.kind() == self.score_kind {
                self.last_score_event = event.message().to_owned();
            }
        }
        while let Some(interaction) = ctx.events.pop_interaction_event() {
            if interaction.origin == BONUS_BUTTON && interaction.kind == InteractionKind::Activate
            {
                self.add_score(100, ctx);
            }
        }
    }

    fn render(&mut self, _ctx: &FrameContext<'_>) {
        self.console.lock().set_lines(vec![
            format!("Score: {}", self.score),
            format!("Last score event: {}", self.last_score_event),
            format!("Panel refreshes: {}", self.refreshes),
            format!("Ticks: {}", self.base.ticks()),
            String::new(),
            "  Space  +10   b  bonus button   Esc  menu   q  quit".to_owned(),
        ]);
    }
}

// =============================================================================
// Entry point
// =============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig {
            target_fps: 30,
            ..EngineConfig::default()
        },
    };

    let mut frame_loop = FrameLoop::new(config);
    let score_kind = frame_loop.hub().register_custom_kind();
    let console = SharedConsole::default();

    frame_loop.set_input(TerminalInput);
    frame_loop.set_renderer(TerminalSink {
        console: Arc::clone(&console),
        out: io::stdout(),
    });
    frame_loop.install_state(
        "menu",
        MenuState {
            base: BaseState::new(),
            console: Arc::clone(&console),
        },
    );
    frame_loop.register_state(
        "play",
        PlayState {
            base: BaseState::new(),
            console,
            score_kind,
            score: 0,
            refreshes: 0,
            last_score_event: String::new(),
        },
    );

    let _guard = TerminalGuard::enter()?;
    frame_loop.run()?;
    Ok(())
}
