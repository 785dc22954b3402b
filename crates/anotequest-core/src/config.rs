//! Tunable interaction settings.

use crate::error::ConfigError;
use crate::geometry::DEFAULT_GRID_SIZE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default pointer travel before a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;
/// Default hold time before a press becomes a long-press.
pub const DEFAULT_LONG_PRESS_DELAY_MS: u64 = 500;
/// Default lift scale applied to an item while it is held.
pub const DEFAULT_DRAG_SCALE: f64 = 1.05;

/// Settings for one interaction controller.
///
/// Unknown keys are rejected and missing keys fall back to the defaults,
/// so a host can override a single value:
///
/// ```
/// use anotequest_core::InteractionConfig;
///
/// let config = InteractionConfig::from_json(r#"{ "grid_snap_enabled": true }"#).unwrap();
/// assert!(config.grid_snap_enabled);
/// assert_eq!(config.long_press_delay_ms, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InteractionConfig {
    /// Pointer travel (in logical pixels) that turns a press into a drag.
    pub drag_threshold_pixels: f64,
    /// Hold time before a stationary press fires a long-press.
    pub long_press_delay_ms: u64,
    /// Snap committed positions to the grid.
    pub grid_snap_enabled: bool,
    /// Grid spacing used when snapping.
    pub grid_size_pixels: f64,
    /// Visual lift while held. Presentation only.
    pub drag_scale_factor: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_threshold_pixels: DEFAULT_DRAG_THRESHOLD,
            long_press_delay_ms: DEFAULT_LONG_PRESS_DELAY_MS,
            grid_snap_enabled: false,
            grid_size_pixels: DEFAULT_GRID_SIZE,
            drag_scale_factor: DEFAULT_DRAG_SCALE,
        }
    }
}

impl InteractionConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Return a copy with grid snapping switched on or off.
    pub fn with_grid_snap(mut self, enabled: bool) -> Self {
        self.grid_snap_enabled = enabled;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.drag_threshold_pixels;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        let grid = self.grid_size_pixels;
        if !grid.is_finite() || grid <= 0.0 {
            return Err(ConfigError::InvalidGridSize(grid));
        }
        let scale = self.drag_scale_factor;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidDragScale(scale));
        }
        Ok(())
    }

    /// Long-press delay as a duration.
    pub fn long_press_delay(&self) -> Duration {
        Duration::from_millis(self.long_press_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InteractionConfig::default();
        assert!((config.drag_threshold_pixels - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.long_press_delay(), Duration::from_millis(500));
        assert!(!config.grid_snap_enabled);
        assert!((config.grid_size_pixels - 10.0).abs() < f64::EPSILON);
        assert!((config.drag_scale_factor - 1.05).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = InteractionConfig {
            drag_threshold_pixels: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidThreshold(_))));
    }

    #[test]
    fn test_zero_grid_rejected() {
        let config = InteractionConfig {
            grid_size_pixels: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidGridSize(_))));
    }

    #[test]
    fn test_negative_delay_does_not_parse() {
        let result = InteractionConfig::from_json(r#"{ "long_press_delay_ms": -10 }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = InteractionConfig::from_json(r#"{ "snap": true }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = InteractionConfig::default().with_grid_snap(true);
        let json = config.to_json().unwrap();
        let parsed = InteractionConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
