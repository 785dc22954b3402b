//! AnoteQuest Core Library
//!
//! Platform-agnostic interaction engine for draggable canvas items: the
//! geometry helpers, the pointer gesture classifier, resize drags, the
//! per-item interaction controller and the contract it uses to talk to the host.

pub mod board;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod item;
pub mod resize;

pub use board::{Board, BoardItem};
pub use config::InteractionConfig;
pub use controller::{DropOutcome, InteractionController, InteractionEvent};
pub use error::{ConfigError, HostError, HostResult, InteractionError};
pub use geometry::{
    DEFAULT_CURVATURE_FACTOR, DEFAULT_GRID_SIZE, connector_curve, distance, is_grid_aligned,
    midpoint_with_curvature, snap_to_grid,
};
pub use gesture::{
    DragRelease, DragSession, GestureClassifier, GestureEvent, GesturePhase, PointerSample, SampleKind,
};
pub use host::Host;
pub use item::{ItemId, ItemKind};
pub use resize::{ResizeSession, resized};
