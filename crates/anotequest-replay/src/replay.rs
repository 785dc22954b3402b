//! Drives controllers from a script.

use anotequest_core::{
    Board, Host, InteractionController, InteractionError, InteractionEvent, ItemId, ItemKind,
};
use kurbo::{Point, Size};
use serde::Serialize;
use std::time::Duration;

use crate::error::ReplayError;
use crate::script::{Script, Step};

/// Final state of one scripted item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReport {
    pub index: usize,
    pub id: ItemId,
    pub kind: ItemKind,
    /// Committed position, or `None` if the item was deleted.
    pub position: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub items: Vec<ItemReport>,
    pub events: usize,
    /// Steps whose host callback failed and were skipped.
    pub failed_steps: Vec<usize>,
}

/// A board plus one controller per scripted item.
pub struct Replayer {
    board: Board,
    controllers: Vec<InteractionController>,
    events: Vec<InteractionEvent>,
    failed_steps: Vec<usize>,
}

impl Replayer {
    /// Build the board and controllers described by a script.
    pub fn new(script: &Script) -> Result<Self, ReplayError> {
        let mut board = Board::new();
        board.zoom = script.zoom;
        board.trash_zone = script.trash;

        let ids: Vec<ItemId> = script
            .items
            .iter()
            .map(|item| board.add_item(item.kind, Point::new(item.x, item.y)))
            .collect();
        for &index in &script.selection {
            let id = ids
                .get(index)
                .ok_or(ReplayError::UnknownSelectionIndex(index))?;
            board.add_to_selection(*id);
        }

        let controllers = script
            .items
            .iter()
            .zip(&ids)
            .map(|(item, id)| InteractionController::new(*id, item.kind, script.config_for(item.kind), &board))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("Board ready with {} items, zoom {}", ids.len(), script.zoom);
        Ok(Self {
            board,
            controllers,
            events: Vec::new(),
            failed_steps: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn events(&self) -> &[InteractionEvent] {
        &self.events
    }

    /// Replay every step in order.
    ///
    /// A step whose host callback fails (for example a press on an item that
    /// was already thrown away) is logged and skipped.
    pub fn run(&mut self, steps: &[Step]) -> Result<(), ReplayError> {
        for (index, step) in steps.iter().enumerate() {
            match self.step(index, step) {
                Ok(()) => {}
                Err(ReplayError::Interaction(InteractionError::Host(err))) => {
                    log::warn!("Step {} skipped: {}", index, err);
                    self.failed_steps.push(index);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn step(&mut self, index: usize, step: &Step) -> Result<(), ReplayError> {
        let item = step.item();
        let controller = self
            .controllers
            .get_mut(item)
            .ok_or(ReplayError::UnknownItemIndex { step: index, index: item })?;

        let events = match step.sample() {
            Some(sample) if matches!(step, Step::Resize { .. }) => {
                controller.handle_resize(sample, &mut self.board)?
            }
            Some(sample) => controller.handle(sample, &mut self.board)?,
            None => {
                let Step::Tick { t_ms, .. } = *step else {
                    return Ok(());
                };
                controller.tick(Duration::from_millis(t_ms), &mut self.board)?
            }
        };

        for event in &events {
            log::info!("step {}: {:?}", index, event);
        }
        self.events.extend(events);
        Ok(())
    }

    /// Where every item ended up.
    pub fn report(&self) -> Report {
        let items = self
            .controllers
            .iter()
            .enumerate()
            .map(|(index, controller)| ItemReport {
                index,
                id: controller.item(),
                kind: controller.kind(),
                position: self.board.position(controller.item()).ok(),
                size: self.board.item(controller.item()).and_then(|item| item.resolved_size()),
            })
            .collect();
        Report {
            items,
            events: self.events.len(),
            failed_steps: self.failed_steps.clone(),
        }
    }
}
