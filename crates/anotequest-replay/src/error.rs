//! Replay errors.

use anotequest_core::{ConfigError, InteractionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Script parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Interaction(#[from] InteractionError),
    #[error("Step {step} refers to unknown item index {index}")]
    UnknownItemIndex { step: usize, index: usize },
    #[error("Selection refers to unknown item index {0}")]
    UnknownSelectionIndex(usize),
}
