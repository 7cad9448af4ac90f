//! # TESSEL UI
//!
//! The slice of the UI system the event core needs:
//! - Key codes forwarded to application states
//! - The widget interaction stream
//!
//! Widgets themselves belong to the host. They appear here only as an
//! [`ElementId`] stamped on the events they raise.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod input;
pub mod interaction;

pub use input::Key;
pub use interaction::{InteractionEvent, InteractionKind, InteractionQueue};
pub use tessel_core::ElementId;
