//! # TESSEL Core
//!
//! Event plumbing shared by the engine, its widgets and the host
//! application:
//! - A fixed vocabulary of built-in event kinds plus host-registered ones
//! - Bounded queues that flush themselves instead of blocking
//! - Separate internal (engine) and external (host) streams
//!
//! ## Rules
//!
//! 1. **Pushing never blocks and never fails** - a full queue is flushed
//! 2. **FIFO per stream** - no ordering across streams
//! 3. **One pending refresh per key** - repeated `UPDATE_UI` requests collapse
//!
//! ## Example
//!
//! ```rust
//! use tessel_core::{DualEventQueue, Event, EventKind, EventTypeRegistry};
//!
//! let registry = EventTypeRegistry::new();
//! let streams = DualEventQueue::new(1000);
//!
//! let score_changed = registry.register_custom_kind();
//! streams.push(&registry, Event::new(score_changed, "1200"));
//! streams.push(&registry, Event::new(EventKind::QUIT, ""));
//!
//! assert_eq!(streams.pop_external().unwrap().kind(), score_changed);
//! assert_eq!(streams.pop_internal().unwrap().kind(), EventKind::QUIT);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod event;
pub mod queue;
pub mod registry;
pub mod streams;

pub use config::{EngineConfig, DEFAULT_INTERACTION_CAPACITY};
pub use error::{TesselError, TesselResult};
pub use event::{ElementId, Event, EventKind};
pub use queue::{BoundedQueue, PushOutcome};
pub use registry::EventTypeRegistry;
pub use streams::{DualEventQueue, DEFAULT_STREAM_CAPACITY};
