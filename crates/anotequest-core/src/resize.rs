//! Resize-handle drags.
//!
//! A resize drag follows the item's bottom-right handle. Pointer travel is
//! zoom-compensated like a position drag and the result never shrinks below
//! the kind's minimum size.

use kurbo::{Point, Size, Vec2};

/// Grow `start` by a pointer delta, clamping each axis to `min`.
pub fn resized(start: Size, delta: Vec2, zoom: f64, min: Size) -> Size {
    Size::new(
        (start.width + delta.x / zoom).max(min.width),
        (start.height + delta.y / zoom).max(min.height),
    )
}

/// State of one resize drag.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    /// Committed size when the handle was grabbed.
    pub start_size: Size,
    pub pointer_start: Point,
    /// Size after the latest sample.
    pub current_size: Size,
    pub min_size: Size,
}

impl ResizeSession {
    pub fn new(start_size: Size, pointer: Point, min_size: Size) -> Self {
        Self {
            start_size,
            pointer_start: pointer,
            current_size: start_size,
            min_size,
        }
    }

    /// Track the handle to `pointer` and return the new size.
    pub fn update(&mut self, pointer: Point, zoom: f64) -> Size {
        self.current_size = resized(self.start_size, pointer - self.pointer_start, zoom, self.min_size);
        self.current_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resized_divides_by_zoom() {
        let size = resized(Size::new(300.0, 200.0), Vec2::new(40.0, -20.0), 2.0, Size::new(200.0, 120.0));
        assert_eq!(size, Size::new(320.0, 190.0));
    }

    #[test]
    fn test_resized_clamps_each_axis() {
        let size = resized(Size::new(250.0, 130.0), Vec2::new(-500.0, 30.0), 1.0, Size::new(200.0, 120.0));
        assert_eq!(size, Size::new(200.0, 160.0));
    }

    #[test]
    fn test_session_tracks_from_grab_point() {
        let mut session = ResizeSession::new(Size::new(60.0, 60.0), Point::new(100.0, 100.0), Size::new(30.0, 30.0));
        assert_eq!(session.update(Point::new(110.0, 90.0), 1.0), Size::new(70.0, 50.0));
        assert_eq!(session.update(Point::new(20.0, 20.0), 1.0), Size::new(30.0, 30.0));
        assert_eq!(session.current_size, Size::new(30.0, 30.0));
        assert_eq!(session.start_size, Size::new(60.0, 60.0));
    }
}
