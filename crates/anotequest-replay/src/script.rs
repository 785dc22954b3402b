//! Gesture script format.
//!
//! ```json
//! {
//!   "zoom": 1.0,
//!   "trash": { "x0": 0, "y0": 500, "x1": 80, "y1": 580 },
//!   "items": [ { "kind": "note", "x": 100, "y": 100 } ],
//!   "selection": [0],
//!   "steps": [
//!     { "type": "down", "item": 0, "x": 150, "y": 150, "t_ms": 0 },
//!     { "type": "move", "item": 0, "x": 163, "y": 151, "t_ms": 16 },
//!     { "type": "up", "item": 0, "x": 163, "y": 151, "t_ms": 32 },
//!     { "type": "resize", "item": 0, "phase": "down", "x": 300, "y": 200, "t_ms": 64 }
//!   ]
//! }
//! ```

use anotequest_core::{InteractionConfig, ItemKind, PointerSample, SampleKind};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ReplayError;

fn default_zoom() -> f64 {
    1.0
}

/// A replayable gesture script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Canvas zoom reported to every controller.
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    /// Drop zone that deletes items.
    #[serde(default)]
    pub trash: Option<Rect>,
    /// Per-kind settings replacing the kind defaults.
    #[serde(default)]
    pub overrides: Vec<KindOverride>,
    pub items: Vec<ScriptItem>,
    /// Indices into `items` that start selected.
    #[serde(default)]
    pub selection: Vec<usize>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindOverride {
    pub kind: ItemKind,
    pub config: InteractionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptItem {
    pub kind: ItemKind,
    pub x: f64,
    pub y: f64,
}

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Down { item: usize, x: f64, y: f64, t_ms: u64 },
    Move { item: usize, x: f64, y: f64, t_ms: u64 },
    Up { item: usize, x: f64, y: f64, t_ms: u64 },
    Cancel { item: usize, x: f64, y: f64, t_ms: u64 },
    /// Sample from the item's resize handle.
    Resize {
        item: usize,
        phase: SampleKind,
        x: f64,
        y: f64,
        t_ms: u64,
    },
    /// Frame tick driving the long-press timer.
    Tick { item: usize, t_ms: u64 },
}

impl Step {
    /// Index of the item this step targets.
    pub fn item(&self) -> usize {
        match *self {
            Step::Down { item, .. }
            | Step::Move { item, .. }
            | Step::Up { item, .. }
            | Step::Cancel { item, .. }
            | Step::Resize { item, .. }
            | Step::Tick { item, .. } => item,
        }
    }

    /// Pointer sample for this step; `None` for ticks.
    pub fn sample(&self) -> Option<PointerSample> {
        let (kind, x, y, t_ms) = match *self {
            Step::Down { x, y, t_ms, .. } => (SampleKind::Down, x, y, t_ms),
            Step::Move { x, y, t_ms, .. } => (SampleKind::Move, x, y, t_ms),
            Step::Up { x, y, t_ms, .. } => (SampleKind::Up, x, y, t_ms),
            Step::Cancel { x, y, t_ms, .. } => (SampleKind::Cancel, x, y, t_ms),
            Step::Resize { phase, x, y, t_ms, .. } => (phase, x, y, t_ms),
            Step::Tick { .. } => return None,
        };
        Some(PointerSample::new(kind, Point::new(x, y), Duration::from_millis(t_ms)))
    }
}

impl Script {
    /// Parse a script and check every override config.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let script: Self = serde_json::from_str(json)?;
        for o in &script.overrides {
            o.config.validate()?;
        }
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Settings for an item kind: the override if present, else the kind default.
    pub fn config_for(&self, kind: ItemKind) -> InteractionConfig {
        self.overrides
            .iter()
            .rev()
            .find(|o| o.kind == kind)
            .map(|o| o.config.clone())
            .unwrap_or_else(|| kind.default_config())
    }
}
