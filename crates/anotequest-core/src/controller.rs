//! Per-item interaction controller.
//!
//! Wraps a [`GestureClassifier`] and decides what each gesture means for the
//! item: where a drag puts it, which siblings move with it, and whether a drop
//! deletes it. Samples from the resize handle go through a separate
//! [`ResizeSession`].

use crate::config::InteractionConfig;
use crate::error::{ConfigError, HostResult, InteractionError};
use crate::geometry::snap_to_grid;
use crate::gesture::{
    DragRelease, DragSession, GestureClassifier, GestureEvent, GesturePhase, PointerSample, SampleKind,
};
use crate::host::Host;
use crate::item::{ItemId, ItemKind};
use crate::resize::ResizeSession;
use kurbo::{Point, Size, Vec2};
use std::time::Duration;

/// Smallest zoom accepted from the host.
pub const MIN_ZOOM: f64 = 1e-6;

/// What happened to an item at the end of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The final position was written back to the host.
    Committed,
    /// The item was dropped on a delete zone and removed.
    Deleted,
}

/// Host-visible events emitted by a controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionEvent {
    DragStart {
        item: ItemId,
        kind: ItemKind,
    },
    /// Live position of a confirmed drag. Nothing is committed yet.
    Moved {
        item: ItemId,
        position: Point,
    },
    DragEnd {
        item: ItemId,
        kind: ItemKind,
        position: Point,
        outcome: DropOutcome,
    },
    Tap {
        item: ItemId,
        kind: ItemKind,
    },
    LongPress {
        item: ItemId,
        kind: ItemKind,
    },
    /// The resize handle was grabbed.
    ResizeStart {
        item: ItemId,
        kind: ItemKind,
    },
    /// Live size of a resize drag. Nothing is committed yet.
    Resized {
        item: ItemId,
        size: Size,
    },
    ResizeEnd {
        item: ItemId,
        kind: ItemKind,
        size: Size,
    },
    /// A press was abandoned; the item keeps its committed position and size.
    Cancelled {
        item: ItemId,
    },
}

impl InteractionEvent {
    /// The item this event concerns.
    pub fn item(&self) -> ItemId {
        match *self {
            InteractionEvent::DragStart { item, .. }
            | InteractionEvent::Moved { item, .. }
            | InteractionEvent::DragEnd { item, .. }
            | InteractionEvent::Tap { item, .. }
            | InteractionEvent::LongPress { item, .. }
            | InteractionEvent::ResizeStart { item, .. }
            | InteractionEvent::Resized { item, .. }
            | InteractionEvent::ResizeEnd { item, .. }
            | InteractionEvent::Cancelled { item } => item,
        }
    }
}

fn check_zoom(zoom: f64) -> Result<f64, ConfigError> {
    if zoom.is_finite() && zoom >= MIN_ZOOM {
        Ok(zoom)
    } else {
        Err(ConfigError::InvalidZoom(zoom))
    }
}

/// Manipulation state machine for one canvas item.
#[derive(Debug, Clone)]
pub struct InteractionController {
    item: ItemId,
    kind: ItemKind,
    config: InteractionConfig,
    classifier: GestureClassifier,
    resize: Option<ResizeSession>,
    /// Last committed position known to this controller.
    committed: Point,
}

impl InteractionController {
    /// Create a controller for `item`.
    ///
    /// Fails if the config is invalid, the host zoom is not positive, or the
    /// host does not know the item.
    pub fn new<H: Host + ?Sized>(
        item: ItemId,
        kind: ItemKind,
        config: InteractionConfig,
        host: &H,
    ) -> Result<Self, InteractionError> {
        config.validate()?;
        check_zoom(host.zoom())?;
        let committed = host.position(item)?;
        Ok(Self {
            item,
            kind,
            classifier: GestureClassifier::from_config(&config),
            resize: None,
            config,
            committed,
        })
    }

    /// Create a controller with the default settings for `kind`.
    pub fn for_kind<H: Host + ?Sized>(item: ItemId, kind: ItemKind, host: &H) -> Result<Self, InteractionError> {
        Self::new(item, kind, kind.default_config(), host)
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn phase(&self) -> GesturePhase {
        self.classifier.phase()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.classifier.session()
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == GesturePhase::Dragging
    }

    /// The open resize drag, if any.
    pub fn resize_session(&self) -> Option<&ResizeSession> {
        self.resize.as_ref()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    /// Last committed position known to this controller.
    pub fn committed_position(&self) -> Point {
        self.committed
    }

    /// Visual lift scale for the current phase.
    pub fn drag_scale(&self) -> f64 {
        match self.phase() {
            GesturePhase::Pressed | GesturePhase::Dragging => self.config.drag_scale_factor,
            GesturePhase::Idle | GesturePhase::LongPressed => 1.0,
        }
    }

    /// Refresh the cached position from the host.
    ///
    /// Does nothing while a press or resize is open, so an external update
    /// never fights an in-progress drag. Returns whether the cache was
    /// refreshed.
    pub fn sync_position<H: Host + ?Sized>(&mut self, host: &H) -> HostResult<bool> {
        if self.classifier.session().is_some() || self.resize.is_some() {
            return Ok(false);
        }
        self.committed = host.position(self.item)?;
        Ok(true)
    }

    /// Enable or disable the controller. Disabling abandons any open press
    /// or resize.
    pub fn set_disabled<H: Host + ?Sized>(&mut self, disabled: bool, host: &mut H) -> Option<InteractionEvent> {
        let gesture = self.classifier.set_disabled(disabled);
        if disabled {
            if let Some(session) = self.resize.take() {
                return Some(self.abandon_resize(&session, host));
            }
        }
        gesture.map(|_| self.abandon(host))
    }

    pub fn is_disabled(&self) -> bool {
        self.classifier.is_disabled()
    }

    /// Process one pointer sample.
    pub fn handle<H: Host + ?Sized>(
        &mut self,
        sample: PointerSample,
        host: &mut H,
    ) -> Result<Vec<InteractionEvent>, InteractionError> {
        if self.resize.is_some() {
            log::trace!("Ignoring body sample while resizing {}", self.item);
            return Ok(Vec::new());
        }
        if sample.kind == SampleKind::Down && !self.is_disabled() {
            self.sync_position(&*host)?;
        }
        let gestures = self.classifier.handle(sample, self.committed);
        let mut events = Vec::with_capacity(gestures.len());
        for gesture in gestures {
            self.apply(gesture, host, &mut events)?;
        }
        Ok(events)
    }

    /// Advance the long-press timer.
    pub fn tick<H: Host + ?Sized>(
        &mut self,
        now: Duration,
        host: &mut H,
    ) -> Result<Vec<InteractionEvent>, InteractionError> {
        let mut events = Vec::new();
        if let Some(gesture) = self.classifier.tick(now) {
            self.apply(gesture, host, &mut events)?;
        }
        Ok(events)
    }

    fn apply<H: Host + ?Sized>(
        &mut self,
        gesture: GestureEvent,
        host: &mut H,
        events: &mut Vec<InteractionEvent>,
    ) -> Result<(), InteractionError> {
        match gesture {
            GestureEvent::DragStart => {
                log::debug!("Drag start on {} {}", self.kind, self.item);
                self.emit(InteractionEvent::DragStart { item: self.item, kind: self.kind }, host, events);
            }
            GestureEvent::DragMove { delta } => self.drag_move(delta, host, events)?,
            GestureEvent::DragEnd(release) => self.drag_end(release, host, events)?,
            GestureEvent::Tap => {
                self.emit(InteractionEvent::Tap { item: self.item, kind: self.kind }, host, events);
            }
            GestureEvent::LongPress => {
                self.emit(InteractionEvent::LongPress { item: self.item, kind: self.kind }, host, events);
            }
            GestureEvent::Cancelled => events.push(self.abandon(host)),
        }
        Ok(())
    }

    fn drag_move<H: Host + ?Sized>(
        &mut self,
        delta: Vec2,
        host: &mut H,
        events: &mut Vec<InteractionEvent>,
    ) -> Result<(), InteractionError> {
        let zoom = match check_zoom(host.zoom()) {
            Ok(zoom) => zoom,
            Err(err) => {
                if self.classifier.cancel().is_some() {
                    events.push(self.abandon(host));
                }
                return Err(err.into());
            }
        };
        let multi = host.selection_count() > 1 && host.is_selected(self.item);
        let Some(session) = self.classifier.session_mut() else {
            return Ok(());
        };
        let candidate = session.anchor_position + delta / zoom;

        let mut broadcast = None;
        if multi {
            let incremental = candidate - session.last_broadcast_position;
            session.last_broadcast_position = candidate;
            if incremental != Vec2::ZERO {
                broadcast = Some(incremental);
            }
        }
        if let Some(incremental) = broadcast {
            log::trace!("Fanning out {:?} from {}", incremental, self.item);
            host.on_multi_drag(self.item, incremental)?;
        }

        host.preview_position(self.item, candidate);
        events.push(InteractionEvent::Moved { item: self.item, position: candidate });
        Ok(())
    }

    fn drag_end<H: Host + ?Sized>(
        &mut self,
        release: DragRelease,
        host: &mut H,
        events: &mut Vec<InteractionEvent>,
    ) -> Result<(), InteractionError> {
        // The session is already closed here; a failing host call below
        // leaves the controller idle.
        let zoom = check_zoom(host.zoom())?;
        let mut position = release.anchor + release.delta / zoom;
        if self.config.grid_snap_enabled {
            position = snap_to_grid(position, self.config.grid_size_pixels);
        }

        let outcome = if host.should_delete_on_drop(release.pointer) {
            log::debug!("{} {} dropped on delete zone", self.kind, self.item);
            host.delete_item(self.item)?;
            DropOutcome::Deleted
        } else {
            // Siblings last moved with the final drag sample; bring them to
            // the release position so the group lands together.
            let remaining = position - release.last_broadcast;
            if remaining != Vec2::ZERO && host.selection_count() > 1 && host.is_selected(self.item) {
                log::trace!("Fanning out final {:?} from {}", remaining, self.item);
                host.on_multi_drag(self.item, remaining)?;
            }
            host.commit_position(self.item, position)?;
            self.committed = position;
            log::debug!("Committed {} {} at ({}, {})", self.kind, self.item, position.x, position.y);
            DropOutcome::Committed
        };
        host.request_redraw();

        self.emit(
            InteractionEvent::DragEnd { item: self.item, kind: self.kind, position, outcome },
            host,
            events,
        );
        Ok(())
    }

    /// Process one sample from the item's resize handle.
    ///
    /// Kinds without a resize handle ignore these samples. Body samples are
    /// ignored while a resize is open, and a resize cannot start during a
    /// press.
    pub fn handle_resize<H: Host + ?Sized>(
        &mut self,
        sample: PointerSample,
        host: &mut H,
    ) -> Result<Vec<InteractionEvent>, InteractionError> {
        let mut events = Vec::new();
        if self.is_disabled() {
            return Ok(events);
        }
        let Some(min_size) = self.kind.min_size() else {
            log::trace!("{} items have no resize handle", self.kind);
            return Ok(events);
        };

        match sample.kind {
            SampleKind::Down => {
                if self.resize.is_some() || self.classifier.session().is_some() {
                    log::trace!("Ignoring resize grab on busy {}", self.item);
                    return Ok(events);
                }
                check_zoom(host.zoom())?;
                let start = host.size(self.item)?;
                self.resize = Some(ResizeSession::new(start, sample.position, min_size));
                log::debug!("Resize start on {} {}", self.kind, self.item);
                self.emit(InteractionEvent::ResizeStart { item: self.item, kind: self.kind }, host, &mut events);
            }
            SampleKind::Move => {
                if self.resize.is_none() {
                    return Ok(events);
                }
                let zoom = match check_zoom(host.zoom()) {
                    Ok(zoom) => zoom,
                    Err(err) => {
                        if let Some(session) = self.resize.take() {
                            self.abandon_resize(&session, host);
                        }
                        return Err(err.into());
                    }
                };
                let Some(session) = self.resize.as_mut() else {
                    return Ok(events);
                };
                let size = session.update(sample.position, zoom);
                host.preview_size(self.item, size);
                events.push(InteractionEvent::Resized { item: self.item, size });
            }
            SampleKind::Up => {
                let Some(mut session) = self.resize.take() else {
                    return Ok(events);
                };
                let zoom = check_zoom(host.zoom())?;
                let size = session.update(sample.position, zoom);
                host.commit_size(self.item, size)?;
                host.request_redraw();
                log::debug!("Committed {} {} size {}x{}", self.kind, self.item, size.width, size.height);
                self.emit(InteractionEvent::ResizeEnd { item: self.item, kind: self.kind, size }, host, &mut events);
            }
            SampleKind::Cancel => {
                if let Some(session) = self.resize.take() {
                    events.push(self.abandon_resize(&session, host));
                }
            }
        }
        Ok(events)
    }

    fn abandon<H: Host + ?Sized>(&self, host: &mut H) -> InteractionEvent {
        host.preview_position(self.item, self.committed);
        let event = InteractionEvent::Cancelled { item: self.item };
        host.notify(&event);
        event
    }

    fn abandon_resize<H: Host + ?Sized>(&self, session: &ResizeSession, host: &mut H) -> InteractionEvent {
        host.preview_size(self.item, session.start_size);
        let event = InteractionEvent::Cancelled { item: self.item };
        host.notify(&event);
        event
    }

    fn emit<H: Host + ?Sized>(&self, event: InteractionEvent, host: &mut H, events: &mut Vec<InteractionEvent>) {
        host.notify(&event);
        events.push(event);
    }
}
