//! Contract between an interaction controller and the surrounding application.

use crate::controller::InteractionEvent;
use crate::error::HostResult;
use crate::item::ItemId;
use kurbo::{Point, Size, Vec2};
use std::collections::HashSet;

/// Services a controller needs from the application that owns the canvas.
///
/// The host keeps the authoritative item positions, sizes and the selection.
/// A controller reads through this trait and writes back only at the end of
/// a drag or resize. All calls happen synchronously on the input thread; a
/// multi-drag fan-out must finish before the call returns.
pub trait Host {
    /// Authoritative position of an item.
    fn position(&self, item: ItemId) -> HostResult<Point>;

    /// Store the final position of a drag.
    fn commit_position(&mut self, item: ItemId, position: Point) -> HostResult<()>;

    /// Current size of an item. Only asked for kinds with a resize handle.
    fn size(&self, item: ItemId) -> HostResult<Size>;

    /// Store the final size of a resize drag.
    fn commit_size(&mut self, item: ItemId, size: Size) -> HostResult<()>;

    /// Current canvas zoom. Must be positive.
    fn zoom(&self) -> f64;

    /// Currently selected items.
    fn selection(&self) -> HashSet<ItemId>;

    /// Number of selected items.
    fn selection_count(&self) -> usize {
        self.selection().len()
    }

    /// Whether an item is part of the selection.
    fn is_selected(&self, item: ItemId) -> bool {
        self.selection().contains(&item)
    }

    /// Move every selected item other than `source` by `delta`.
    ///
    /// `delta` is incremental: the movement since the previous call for the
    /// same drag, not since the drag started.
    fn on_multi_drag(&mut self, source: ItemId, delta: Vec2) -> HostResult<()>;

    /// Whether a drop at this absolute pointer position should delete the item.
    fn should_delete_on_drop(&self, pointer: Point) -> bool;

    /// Remove an item dropped on a delete zone.
    fn delete_item(&mut self, item: ItemId) -> HostResult<()>;

    /// Live position while dragging. Presentation only; nothing is committed.
    fn preview_position(&mut self, _item: ItemId, _position: Point) {}

    /// Live size while resizing. Presentation only.
    fn preview_size(&mut self, _item: ItemId, _size: Size) {}

    /// Observe controller events (drag start/end, tap, long-press).
    fn notify(&mut self, _event: &InteractionEvent) {}

    /// Ask the presentation layer to redraw on the next frame.
    fn request_redraw(&mut self) {}
}
