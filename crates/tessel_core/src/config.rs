//! # Engine Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file is a valid configuration.
//!
//! ```toml
//! event_capacity = 1000
//! interaction_capacity = 100
//! target_fps = 60
//! slow_frame_ms = 33
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{TesselError, TesselResult};
use crate::streams::DEFAULT_STREAM_CAPACITY;

/// Default capacity of the widget interaction stream.
pub const DEFAULT_INTERACTION_CAPACITY: usize = 100;

/// Configuration for the event streams and the frame loop.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Capacity of each engine stream (internal and external).
    pub event_capacity: usize,
    /// Capacity of the widget interaction stream.
    pub interaction_capacity: usize,
    /// Frame rate cap. Zero runs frames back to back.
    pub target_fps: u32,
    /// Frames slower than this are logged as warnings.
    pub slow_frame_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_STREAM_CAPACITY,
            interaction_capacity: DEFAULT_INTERACTION_CAPACITY,
            target_fps: 0,
            slow_frame_ms: 33,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`TesselError::InvalidConfig`] on malformed TOML, unknown
    /// keys, or out-of-range values.
    pub fn from_toml_str(source: &str) -> TesselResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| TesselError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TesselError::ConfigIo`] if the file cannot be read, and
    /// otherwise the same errors as [`EngineConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> TesselResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`TesselError::InvalidConfig`] if a capacity is zero.
    pub fn validate(&self) -> TesselResult<()> {
        if self.event_capacity == 0 {
            return Err(TesselError::InvalidConfig(
                "event_capacity must be at least 1".into(),
            ));
        }
        if self.interaction_capacity == 0 {
            return Err(TesselError::InvalidConfig(
                "interaction_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Minimum duration of one frame, `None` when uncapped.
    #[must_use]
    pub fn frame_budget(&self) -> Option<Duration> {
        (self.target_fps > 0).then(|| Duration::from_secs(1) / self.target_fps)
    }

    /// Threshold above which a frame is reported as slow.
    #[must_use]
    pub fn slow_frame_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_frame_ms)
    }
}
