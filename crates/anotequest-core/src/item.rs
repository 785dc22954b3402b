//! Canvas item identity.

use crate::config::InteractionConfig;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a canvas item.
pub type ItemId = Uuid;

/// Kinds of item that can sit on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    #[default]
    Note,
    Image,
    Table,
    Todo,
    Source,
    Sticker,
}

impl ItemKind {
    /// All item kinds, in toolbar order.
    pub const ALL: [ItemKind; 6] = [
        ItemKind::Note,
        ItemKind::Image,
        ItemKind::Table,
        ItemKind::Todo,
        ItemKind::Source,
        ItemKind::Sticker,
    ];

    /// Whether dropped items of this kind land on the grid.
    ///
    /// Cards snap; free-floating media and stickers keep their exact drop point.
    pub fn snaps_to_grid(self) -> bool {
        matches!(self, ItemKind::Note | ItemKind::Todo | ItemKind::Source)
    }

    /// Smallest size a resize drag may produce, or `None` if items of this
    /// kind have no resize handle.
    pub fn min_size(self) -> Option<Size> {
        match self {
            ItemKind::Table => Some(Size::new(200.0, 120.0)),
            ItemKind::Sticker => Some(Size::new(30.0, 30.0)),
            _ => None,
        }
    }

    pub fn is_resizable(self) -> bool {
        self.min_size().is_some()
    }

    /// Default interaction settings for this kind.
    pub fn default_config(self) -> InteractionConfig {
        InteractionConfig {
            grid_snap_enabled: self.snaps_to_grid(),
            ..InteractionConfig::default()
        }
    }

    /// Name used in logs and host notifications.
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Note => "note",
            ItemKind::Image => "image",
            ItemKind::Table => "table",
            ItemKind::Todo => "todo",
            ItemKind::Source => "source",
            ItemKind::Sticker => "sticker",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapping_kinds() {
        let snapping: Vec<_> = ItemKind::ALL.iter().filter(|k| k.snaps_to_grid()).collect();
        assert_eq!(snapping, vec![&ItemKind::Note, &ItemKind::Todo, &ItemKind::Source]);
    }

    #[test]
    fn test_default_config_follows_kind() {
        assert!(ItemKind::Note.default_config().grid_snap_enabled);
        assert!(!ItemKind::Sticker.default_config().grid_snap_enabled);
    }

    #[test]
    fn test_only_tables_and_stickers_resize() {
        assert_eq!(ItemKind::Table.min_size(), Some(Size::new(200.0, 120.0)));
        assert_eq!(ItemKind::Sticker.min_size(), Some(Size::new(30.0, 30.0)));
        let resizable: Vec<_> = ItemKind::ALL.into_iter().filter(|k| k.is_resizable()).collect();
        assert_eq!(resizable, vec![ItemKind::Table, ItemKind::Sticker]);
    }

    #[test]
    fn test_kind_serde_name() {
        let json = serde_json::to_string(&ItemKind::Sticker).unwrap();
        assert_eq!(json, "\"sticker\"");
        let kind: ItemKind = serde_json::from_str("\"source\"").unwrap();
        assert_eq!(kind, ItemKind::Source);
    }
}
