//! Error types for configuration, host callbacks and interactions.

use crate::item::ItemId;
use thiserror::Error;

/// Configuration errors, raised when a controller is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Zoom must be a positive finite number, got {0}")]
    InvalidZoom(f64),
    #[error("Drag threshold must be a non-negative finite number, got {0}")]
    InvalidThreshold(f64),
    #[error("Grid size must be a positive finite number, got {0}")]
    InvalidGridSize(f64),
    #[error("Drag scale factor must be a positive finite number, got {0}")]
    InvalidDragScale(f64),
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors reported by a host while serving a controller callback.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),
    #[error("Host callback failed: {0}")]
    Callback(String),
}

/// Result type for host callbacks.
pub type HostResult<T> = Result<T, HostError>;

/// Errors surfaced while handling a pointer sample.
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Host(#[from] HostError),
}
