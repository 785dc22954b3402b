//! In-memory host: item table, selection and trash zone.

use crate::controller::InteractionEvent;
use crate::error::{HostError, HostResult};
use crate::host::Host;
use crate::item::{ItemId, ItemKind};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// An item placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardItem {
    pub kind: ItemKind,
    /// Committed top-left position in canvas coordinates.
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl BoardItem {
    pub fn new(kind: ItemKind, position: Point) -> Self {
        Self { kind, position, size: None }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Stored size, falling back to the kind's minimum for items that never
    /// stored one.
    pub fn resolved_size(&self) -> Option<Size> {
        self.size.or_else(|| self.kind.min_size())
    }
}

fn default_zoom() -> f64 {
    1.0
}

/// Board that owns item positions, sizes and the selection.
///
/// Serves as the reference [`Host`] for controllers. Only the item table,
/// zoom and trash zone are persisted; selection, live previews and the event
/// log are session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    items: HashMap<ItemId, BoardItem>,
    /// Canvas zoom reported to controllers (1.0 = 100%).
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    /// Drop zone that deletes items, in pointer coordinates. It stays put on
    /// screen while the canvas pans and zooms.
    #[serde(default)]
    pub trash_zone: Option<Rect>,
    #[serde(skip)]
    selection: HashSet<ItemId>,
    #[serde(skip)]
    previews: HashMap<ItemId, Point>,
    #[serde(skip)]
    size_previews: HashMap<ItemId, Size>,
    #[serde(skip)]
    events: Vec<InteractionEvent>,
    #[serde(skip)]
    redraw_requested: bool,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            zoom: default_zoom(),
            trash_zone: None,
            selection: HashSet::new(),
            previews: HashMap::new(),
            size_previews: HashMap::new(),
            events: Vec::new(),
            redraw_requested: false,
        }
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new item and return its id.
    pub fn add_item(&mut self, kind: ItemKind, position: Point) -> ItemId {
        let id = Uuid::new_v4();
        self.items.insert(id, BoardItem::new(kind, position));
        id
    }

    /// Insert an item under a known id, replacing any previous one.
    pub fn insert_item(&mut self, id: ItemId, item: BoardItem) {
        self.items.insert(id, item);
    }

    pub fn item(&self, id: ItemId) -> Option<&BoardItem> {
        self.items.get(&id)
    }

    pub fn items(&self) -> impl Iterator<Item = (&ItemId, &BoardItem)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Where an item should be drawn: its live drag position if any,
    /// otherwise its committed one.
    pub fn display_position(&self, id: ItemId) -> Option<Point> {
        self.previews
            .get(&id)
            .copied()
            .or_else(|| self.items.get(&id).map(|item| item.position))
    }

    /// Size an item should be drawn at: its live resize size if any,
    /// otherwise its committed one.
    pub fn display_size(&self, id: ItemId) -> Option<Size> {
        self.size_previews
            .get(&id)
            .copied()
            .or_else(|| self.items.get(&id).and_then(BoardItem::resolved_size))
    }

    /// Select a single item (clears other selections).
    pub fn select(&mut self, id: ItemId) {
        self.selection.clear();
        self.add_to_selection(id);
    }

    pub fn add_to_selection(&mut self, id: ItemId) {
        if self.items.contains_key(&id) {
            self.selection.insert(id);
        }
    }

    pub fn deselect(&mut self, id: ItemId) {
        self.selection.remove(&id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected(&self) -> &HashSet<ItemId> {
        &self.selection
    }

    /// Events received from controllers, oldest first.
    pub fn events(&self) -> &[InteractionEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<InteractionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether a redraw was requested since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.redraw_requested, false)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Host for Board {
    fn position(&self, item: ItemId) -> HostResult<Point> {
        self.items
            .get(&item)
            .map(|entry| entry.position)
            .ok_or(HostError::UnknownItem(item))
    }

    fn commit_position(&mut self, item: ItemId, position: Point) -> HostResult<()> {
        let entry = self.items.get_mut(&item).ok_or(HostError::UnknownItem(item))?;
        entry.position = position;
        self.previews.remove(&item);
        Ok(())
    }

    fn size(&self, item: ItemId) -> HostResult<Size> {
        let entry = self.items.get(&item).ok_or(HostError::UnknownItem(item))?;
        entry
            .resolved_size()
            .ok_or_else(|| HostError::Callback(format!("{} items have no size", entry.kind)))
    }

    fn commit_size(&mut self, item: ItemId, size: Size) -> HostResult<()> {
        let entry = self.items.get_mut(&item).ok_or(HostError::UnknownItem(item))?;
        entry.size = Some(size);
        self.size_previews.remove(&item);
        Ok(())
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn selection(&self) -> HashSet<ItemId> {
        self.selection.clone()
    }

    fn selection_count(&self) -> usize {
        self.selection.len()
    }

    fn is_selected(&self, item: ItemId) -> bool {
        self.selection.contains(&item)
    }

    fn on_multi_drag(&mut self, source: ItemId, delta: Vec2) -> HostResult<()> {
        for id in self.selection.iter().filter(|id| **id != source) {
            if let Some(entry) = self.items.get_mut(id) {
                entry.position += delta;
            }
        }
        self.redraw_requested = true;
        Ok(())
    }

    fn should_delete_on_drop(&self, pointer: Point) -> bool {
        self.trash_zone.is_some_and(|zone| zone.contains(pointer))
    }

    fn delete_item(&mut self, item: ItemId) -> HostResult<()> {
        self.items.remove(&item).ok_or(HostError::UnknownItem(item))?;
        self.selection.remove(&item);
        self.previews.remove(&item);
        self.size_previews.remove(&item);
        Ok(())
    }

    fn preview_position(&mut self, item: ItemId, position: Point) {
        self.previews.insert(item, position);
        self.redraw_requested = true;
    }

    fn preview_size(&mut self, item: ItemId, size: Size) {
        self.size_previews.insert(item, size);
        self.redraw_requested = true;
    }

    fn notify(&mut self, event: &InteractionEvent) {
        self.events.push(*event);
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }
}
