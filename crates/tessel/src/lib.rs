//! # TESSEL
//!
//! Event-driven frame loop for terminal and game UIs.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   signals   ┌──────────────┐   handle_key/update/render
//! │ InputSource  │────────────>│  FrameLoop   │──────────────────────────┐
//! └──────────────┘             │              │                          ▼
//!                              │              │                  ┌──────────────┐
//! ┌──────────────┐   render    │              │                  │ active State │
//! │ RenderSink   │<────────────│              │                  └──────┬───────┘
//! └──────────────┘             └──────▲───────┘                         │ push
//!                                     │ internal (once per frame)       ▼
//!                              ┌──────┴──────────────────────────────────────┐
//!                              │                 EventHub                    │
//!                              │  internal | external | interaction streams  │
//!                              └──────────────────────┬──────────────────────┘
//!                                                     │ external + interaction
//!                                                     ▼
//!                                                   host
//! ```
//!
//! ## Modules
//!
//! - `hub`: the owned event context
//! - `game_loop`: frame orchestration
//! - `state`: the application state seam
//! - `platform`: the native input/render seams

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod game_loop;
pub mod hub;
pub mod platform;
pub mod state;

pub use tessel_core as core;
pub use tessel_ui as ui;

pub use game_loop::{FrameLoop, LoopPhase};
pub use hub::EventHub;
pub use platform::{InputSignal, InputSource, RenderSink, ScriptedInput};
pub use state::{BaseState, FrameContext, State};
