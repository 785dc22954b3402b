//! Pointer gesture classification.
//!
//! [`GestureClassifier`] turns the raw sample stream of a single pointer into
//! press-level events. Its state machine:
//!
//! ```text
//! Idle --down--> Pressed --move past threshold--> Dragging --up--> Idle
//!                   |  \--hold past delay--> LongPressed --up--> Idle
//!                   \--up--> (tap) Idle
//! ```
//!
//! A cancel from any phase returns to Idle without emitting a tap, a
//! long-press or a drag end.

use crate::config::InteractionConfig;
use crate::geometry::distance;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Kind of raw pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleKind {
    Down,
    Move,
    Up,
    /// The platform took the pointer away (system gesture, lost capture).
    Cancel,
}

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub kind: SampleKind,
    /// Absolute pointer position, in the same space as committed positions.
    pub position: Point,
    /// Time since an arbitrary origin chosen by the host.
    pub timestamp: Duration,
}

impl PointerSample {
    pub fn new(kind: SampleKind, position: Point, timestamp: Duration) -> Self {
        Self { kind, position, timestamp }
    }

    pub fn down(position: Point, timestamp: Duration) -> Self {
        Self::new(SampleKind::Down, position, timestamp)
    }

    pub fn moved(position: Point, timestamp: Duration) -> Self {
        Self::new(SampleKind::Move, position, timestamp)
    }

    pub fn up(position: Point, timestamp: Duration) -> Self {
        Self::new(SampleKind::Up, position, timestamp)
    }

    pub fn cancel(position: Point, timestamp: Duration) -> Self {
        Self::new(SampleKind::Cancel, position, timestamp)
    }
}

/// Phase of the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Pressed,
    Dragging,
    LongPressed,
}

/// State of one press, from pointer-down until release or cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Committed item position when the press began.
    pub anchor_position: Point,
    /// First pointer sample of the press.
    pub pointer_start: Point,
    /// Most recent pointer sample.
    pub last_pointer: Point,
    /// Straight-line distance from `pointer_start` to the latest sample.
    pub accumulated_distance: f64,
    /// Set once the threshold is crossed. Never cleared within a session.
    pub is_confirmed_drag: bool,
    /// Last position reported to the multi-drag fan-out.
    pub last_broadcast_position: Point,
    /// Timestamp of the pointer-down.
    pub pressed_at: Duration,
    long_pressed: bool,
}

impl DragSession {
    fn new(anchor: Point, pointer: Point, pressed_at: Duration) -> Self {
        Self {
            anchor_position: anchor,
            pointer_start: pointer,
            last_pointer: pointer,
            accumulated_distance: 0.0,
            is_confirmed_drag: false,
            last_broadcast_position: anchor,
            pressed_at,
            long_pressed: false,
        }
    }

    /// Pointer delta from the start of the press.
    pub fn delta(&self) -> Vec2 {
        self.last_pointer - self.pointer_start
    }

    /// Whether this press already fired a long-press.
    pub fn is_long_pressed(&self) -> bool {
        self.long_pressed
    }

    fn phase(&self) -> GesturePhase {
        if self.is_confirmed_drag {
            GesturePhase::Dragging
        } else if self.long_pressed {
            GesturePhase::LongPressed
        } else {
            GesturePhase::Pressed
        }
    }
}

/// Snapshot of a confirmed drag at pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// Committed item position when the press began.
    pub anchor: Point,
    /// Pointer delta from the first sample to the release.
    pub delta: Vec2,
    /// Absolute pointer position at release.
    pub pointer: Point,
    /// Last position handed to the multi-drag fan-out.
    pub last_broadcast: Point,
}

/// Press-level events produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The press travelled past the drag threshold.
    DragStart,
    /// Confirmed drag moved; `delta` is measured from the first sample.
    DragMove { delta: Vec2 },
    /// Confirmed drag released.
    DragEnd(DragRelease),
    /// Short press released without crossing the threshold.
    Tap,
    /// Press held past the long-press delay without crossing the threshold.
    LongPress,
    /// An open session was discarded by a cancel or by disabling.
    Cancelled,
}

/// Single-pointer gesture state machine.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    drag_threshold: f64,
    long_press_delay: Duration,
    disabled: bool,
    session: Option<DragSession>,
}

impl GestureClassifier {
    /// Create a classifier with explicit thresholds.
    pub fn new(drag_threshold: f64, long_press_delay: Duration) -> Self {
        Self {
            drag_threshold,
            long_press_delay,
            disabled: false,
            session: None,
        }
    }

    /// Create a classifier from interaction settings.
    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(config.drag_threshold_pixels, config.long_press_delay())
    }

    /// Current phase.
    pub fn phase(&self) -> GesturePhase {
        self.session.as_ref().map_or(GesturePhase::Idle, DragSession::phase)
    }

    /// The open session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut DragSession> {
        self.session.as_mut()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable the classifier.
    ///
    /// Disabling drops any open session and returns [`GestureEvent::Cancelled`]
    /// if there was one.
    pub fn set_disabled(&mut self, disabled: bool) -> Option<GestureEvent> {
        self.disabled = disabled;
        if disabled { self.cancel() } else { None }
    }

    /// Feed one pointer sample.
    ///
    /// `anchor` is the item's committed position; it is only read when the
    /// sample opens a new session.
    pub fn handle(&mut self, sample: PointerSample, anchor: Point) -> Vec<GestureEvent> {
        if self.disabled {
            return Vec::new();
        }
        match sample.kind {
            SampleKind::Down => self.press(sample, anchor),
            SampleKind::Move => self.motion(sample),
            SampleKind::Up => self.release(sample),
            SampleKind::Cancel => self.cancel().into_iter().collect(),
        }
    }

    /// Advance the long-press timer without a pointer sample.
    pub fn tick(&mut self, now: Duration) -> Option<GestureEvent> {
        if self.disabled {
            return None;
        }
        self.fire_long_press_if_due(now)
    }

    /// Drop the open session, if any.
    pub fn cancel(&mut self) -> Option<GestureEvent> {
        self.session.take().map(|_| {
            log::debug!("Gesture cancelled");
            GestureEvent::Cancelled
        })
    }

    fn press(&mut self, sample: PointerSample, anchor: Point) -> Vec<GestureEvent> {
        if self.session.is_some() {
            log::trace!("Ignoring pointer down while a press is already open");
            return Vec::new();
        }
        self.session = Some(DragSession::new(anchor, sample.position, sample.timestamp));
        Vec::new()
    }

    fn motion(&mut self, sample: PointerSample) -> Vec<GestureEvent> {
        if self.session.is_none() {
            log::trace!("Ignoring pointer move without a press");
            return Vec::new();
        }
        let mut events: Vec<GestureEvent> = self.fire_long_press_if_due(sample.timestamp).into_iter().collect();
        let threshold = self.drag_threshold;
        let Some(session) = self.session.as_mut() else {
            return events;
        };
        session.last_pointer = sample.position;
        if session.long_pressed {
            return events;
        }

        session.accumulated_distance = distance(session.pointer_start, sample.position);
        if !session.is_confirmed_drag && session.accumulated_distance > threshold {
            session.is_confirmed_drag = true;
            log::debug!("Drag confirmed after {:.1}px", session.accumulated_distance);
            events.push(GestureEvent::DragStart);
        }
        if session.is_confirmed_drag {
            events.push(GestureEvent::DragMove { delta: session.delta() });
        }
        events
    }

    fn release(&mut self, sample: PointerSample) -> Vec<GestureEvent> {
        if self.session.is_none() {
            log::trace!("Ignoring pointer up without a press");
            return Vec::new();
        }
        let mut events: Vec<GestureEvent> = self.fire_long_press_if_due(sample.timestamp).into_iter().collect();
        let Some(mut session) = self.session.take() else {
            return events;
        };
        session.last_pointer = sample.position;

        if session.is_confirmed_drag {
            events.push(GestureEvent::DragEnd(DragRelease {
                anchor: session.anchor_position,
                delta: session.delta(),
                pointer: sample.position,
                last_broadcast: session.last_broadcast_position,
            }));
        } else if !session.long_pressed {
            events.push(GestureEvent::Tap);
        }
        events
    }

    fn fire_long_press_if_due(&mut self, now: Duration) -> Option<GestureEvent> {
        let delay = self.long_press_delay;
        let session = self.session.as_mut()?;
        if session.is_confirmed_drag || session.long_pressed {
            return None;
        }
        if now.saturating_sub(session.pressed_at) >= delay {
            session.long_pressed = true;
            log::debug!("Long press after {:?}", now.saturating_sub(session.pressed_at));
            return Some(GestureEvent::LongPress);
        }
        None
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::from_config(&InteractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn feed(classifier: &mut GestureClassifier, samples: &[PointerSample]) -> Vec<GestureEvent> {
        samples
            .iter()
            .flat_map(|s| classifier.handle(*s, Point::new(100.0, 100.0)))
            .collect()
    }

    #[test]
    fn test_tap() {
        let mut classifier = GestureClassifier::default();
        let events = feed(
            &mut classifier,
            &[
                PointerSample::down(Point::new(10.0, 10.0), ms(0)),
                PointerSample::moved(Point::new(12.0, 11.0), ms(40)),
                PointerSample::up(Point::new(12.0, 11.0), ms(80)),
            ],
        );
        assert_eq!(events, vec![GestureEvent::Tap]);
        assert_eq!(classifier.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_exact_threshold_is_not_a_drag() {
        let mut classifier = GestureClassifier::default();
        let events = feed(
            &mut classifier,
            &[
                PointerSample::down(Point::new(0.0, 0.0), ms(0)),
                PointerSample::moved(Point::new(3.0, 4.0), ms(10)),
                PointerSample::up(Point::new(3.0, 4.0), ms(20)),
            ],
        );
        assert_eq!(events, vec![GestureEvent::Tap]);
    }

    #[test]
    fn test_drag_start_fires_once() {
        let mut classifier = GestureClassifier::default();
        let events = feed(
            &mut classifier,
            &[
                PointerSample::down(Point::new(150.0, 150.0), ms(0)),
                PointerSample::moved(Point::new(163.0, 151.0), ms(16)),
                PointerSample::moved(Point::new(178.0, 149.0), ms(32)),
                PointerSample::up(Point::new(178.0, 149.0), ms(48)),
            ],
        );
        assert_eq!(
            events,
            vec![
                GestureEvent::DragStart,
                GestureEvent::DragMove { delta: Vec2::new(13.0, 1.0) },
                GestureEvent::DragMove { delta: Vec2::new(28.0, -1.0) },
                GestureEvent::DragEnd(DragRelease {
                    anchor: Point::new(100.0, 100.0),
                    delta: Vec2::new(28.0, -1.0),
                    pointer: Point::new(178.0, 149.0),
                    last_broadcast: Point::new(100.0, 100.0),
                }),
            ]
        );
    }

    #[test]
    fn test_confirmed_drag_survives_return_to_start() {
        let mut classifier = GestureClassifier::default();
        feed(
            &mut classifier,
            &[
                PointerSample::down(Point::new(0.0, 0.0), ms(0)),
                PointerSample::moved(Point::new(20.0, 0.0), ms(10)),
                PointerSample::moved(Point::new(1.0, 0.0), ms(20)),
            ],
        );
        let session = classifier.session().unwrap();
        assert!(session.is_confirmed_drag);
        assert!((session.accumulated_distance - 1.0).abs() < f64::EPSILON);
        assert_eq!(classifier.phase(), GesturePhase::Dragging);

        let events = classifier.handle(PointerSample::up(Point::new(0.0, 0.0), ms(30)), Point::ZERO);
        assert!(matches!(events.as_slice(), [GestureEvent::DragEnd(_)]));
    }

    #[test]
    fn test_long_press_via_tick() {
        let mut classifier = GestureClassifier::default();
        classifier.handle(PointerSample::down(Point::new(5.0, 5.0), ms(0)), Point::ZERO);

        assert_eq!(classifier.tick(ms(499)), None);
        assert_eq!(classifier.tick(ms(500)), Some(GestureEvent::LongPress));
        assert_eq!(classifier.tick(ms(900)), None);
        assert_eq!(classifier.phase(), GesturePhase::LongPressed);

        let events = classifier.handle(PointerSample::up(Point::new(5.0, 5.0), ms(950)), Point::ZERO);
        assert!(events.is_empty());
        assert_eq!(classifier.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_long_press_takes_priority_over_tap() {
        let mut classifier = GestureClassifier::default();
        let events = feed(
            &mut classifier,
            &[
                PointerSample::down(Point::new(5.0, 5.0), ms(0)),
                PointerSample::up(Point::new(6.0, 5.0), ms(700)),
            ],
        );
        assert_eq!(events, vec![GestureEvent::LongPress]);
    }

    #[test]
    fn test_long_press_blocks_late_drag() {
        let mut classifier = GestureClassifier::default();
        let events = feed(
            &mut classifier,
            &[
                PointerSample::down(Point::new(0.0, 0.0), ms(0)),
                PointerSample::moved(Point::new(50.0, 0.0), ms(600)),
                PointerSample::up(Point::new(50.0, 0.0), ms(650)),
            ],
        );
        assert_eq!(events, vec![GestureEvent::LongPress]);
    }

    #[test]
    fn test_drag_cancels_long_press_timer() {
        let mut classifier = GestureClassifier::default();
        feed(
            &mut classifier,
            &[
                PointerSample::down(Point::new(0.0, 0.0), ms(0)),
                PointerSample::moved(Point::new(30.0, 0.0), ms(100)),
            ],
        );
        assert_eq!(classifier.tick(ms(1000)), None);
        assert_eq!(classifier.phase(), GesturePhase::Dragging);
    }

    #[test]
    fn test_cancel_returns_to_idle_silently() {
        let mut classifier = GestureClassifier::default();
        let events = feed(
            &mut classifier,
            &[
                PointerSample::down(Point::new(0.0, 0.0), ms(0)),
                PointerSample::moved(Point::new(30.0, 0.0), ms(10)),
                PointerSample::cancel(Point::new(30.0, 0.0), ms(20)),
                PointerSample::up(Point::new(30.0, 0.0), ms(30)),
            ],
        );
        assert_eq!(
            events,
            vec![
                GestureEvent::DragStart,
                GestureEvent::DragMove { delta: Vec2::new(30.0, 0.0) },
                GestureEvent::Cancelled,
            ]
        );
        assert_eq!(classifier.phase(), GesturePhase::Idle);

        classifier.handle(PointerSample::down(Point::new(1.0, 1.0), ms(40)), Point::ZERO);
        assert_eq!(classifier.phase(), GesturePhase::Pressed);
    }

    #[test]
    fn test_duplicate_down_is_ignored() {
        let mut classifier = GestureClassifier::default();
        classifier.handle(PointerSample::down(Point::new(0.0, 0.0), ms(0)), Point::new(1.0, 1.0));
        let events = classifier.handle(PointerSample::down(Point::new(40.0, 40.0), ms(5)), Point::new(9.0, 9.0));
        assert!(events.is_empty());

        let session = classifier.session().unwrap();
        assert_eq!(session.pointer_start, Point::new(0.0, 0.0));
        assert_eq!(session.anchor_position, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_samples_without_press_are_ignored() {
        let mut classifier = GestureClassifier::default();
        assert!(classifier.handle(PointerSample::moved(Point::new(50.0, 0.0), ms(0)), Point::ZERO).is_empty());
        assert!(classifier.handle(PointerSample::up(Point::new(50.0, 0.0), ms(1)), Point::ZERO).is_empty());
        assert!(classifier.handle(PointerSample::cancel(Point::ZERO, ms(2)), Point::ZERO).is_empty());
        assert_eq!(classifier.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_disabled_ignores_everything() {
        let mut classifier = GestureClassifier::default();
        classifier.set_disabled(true);
        let events = feed(
            &mut classifier,
            &[
                PointerSample::down(Point::new(0.0, 0.0), ms(0)),
                PointerSample::moved(Point::new(30.0, 0.0), ms(10)),
                PointerSample::up(Point::new(30.0, 0.0), ms(20)),
            ],
        );
        assert!(events.is_empty());
        assert!(classifier.session().is_none());
        assert_eq!(classifier.tick(ms(1000)), None);
    }

    #[test]
    fn test_disabling_mid_press_drops_session() {
        let mut classifier = GestureClassifier::default();
        classifier.handle(PointerSample::down(Point::new(0.0, 0.0), ms(0)), Point::ZERO);
        assert_eq!(classifier.set_disabled(true), Some(GestureEvent::Cancelled));
        assert_eq!(classifier.phase(), GesturePhase::Idle);
    }
}
