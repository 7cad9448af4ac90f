//! # Engine Error Types
//!
//! Only configuration problems are errors. Queue overflow is a logged
//! warning and a refresh dedup drop is not reported at all.

use thiserror::Error;

/// Errors that can occur while configuring or starting the engine.
#[derive(Error, Debug)]
pub enum TesselError {
    /// The render sink has not been set up yet.
    #[error("render surface not initialized: set up the render sink before starting the frame loop")]
    RenderSurfaceNotReady,

    /// No application state was installed before the loop started.
    #[error("no active state installed: call install_state() before starting the frame loop")]
    NoActiveState,

    /// Invalid configuration value or file contents.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),
}

/// Result type for engine operations.
pub type TesselResult<T> = Result<T, TesselError>;
