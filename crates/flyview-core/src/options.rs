//! Configuration options for an interactor.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InteractorError, Result};
use crate::timer::DEFAULT_LEGACY_DURATION_MS;

/// Tunable interactor settings.
///
/// Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractorOptions {
    /// Frames rendered by a fly-to animation.
    pub number_of_fly_frames: u32,

    /// Total dolly applied over a fly-to animation.
    pub dolly: f32,

    /// Duration of timers created through the legacy single-timer API.
    pub timer_duration_ms: u64,

    /// Frame rate requested while the user is interacting.
    pub desired_update_rate: f64,

    /// Frame rate requested when idle (default allows about 3 hours per frame).
    pub still_update_rate: f64,

    /// Whether the scene light tracks the camera.
    pub light_follow_camera: bool,

    /// Whether `render()` draws through the render window.
    pub enable_render: bool,
}

impl Default for InteractorOptions {
    fn default() -> Self {
        Self {
            number_of_fly_frames: 15,
            dolly: 0.30,
            timer_duration_ms: DEFAULT_LEGACY_DURATION_MS,
            desired_update_rate: 15.0,
            still_update_rate: 0.0001,
            light_follow_camera: true,
            enable_render: true,
        }
    }
}

impl InteractorOptions {
    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.number_of_fly_frames == 0 {
            return Err(InteractorError::InvalidOption(
                "number_of_fly_frames must be at least 1".into(),
            ));
        }
        if !self.dolly.is_finite() {
            return Err(InteractorError::InvalidOption(format!(
                "dolly must be finite, got {}",
                self.dolly
            )));
        }
        if !(self.desired_update_rate > 0.0 && self.still_update_rate > 0.0) {
            return Err(InteractorError::InvalidOption(
                "update rates must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Parses and validates options from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Writes options to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
