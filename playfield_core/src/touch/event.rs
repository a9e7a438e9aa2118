// Copyright 2026 the Playfield Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch event values.

use kurbo::Point;

/// Which part of a press-move-release sequence a batch belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Fingers went down.
    Start,
    /// Fingers moved.
    Move,
    /// Fingers lifted (or the platform cancelled the sequence).
    End,
}

impl TouchPhase {
    /// A short lowercase name, for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Move => "move",
            Self::End => "end",
        }
    }
}

/// A single touch sample.
///
/// Platforms fill in `id`, `time`, `position` and the contact metrics. The
/// dispatcher fills in `local` when it delivers the event to a layer. A
/// listener may set `prevent_default` to ask the platform to suppress its own
/// handling of the touch (scrolling, zooming).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    /// Small non-negative identifier, stable for the lifetime of one touch.
    pub id: u32,
    /// Timestamp in milliseconds, as reported by the platform.
    pub time: f64,
    /// Position in screen space.
    pub position: Point,
    /// Position in the receiving layer's content space.
    pub local: Point,
    /// Normalized pressure, `0.0` when unknown.
    pub pressure: f32,
    /// Contact size, `0.0` when unknown.
    pub size: f32,
    /// Whether platform default handling should be suppressed.
    pub prevent_default: bool,
}

impl TouchEvent {
    /// Creates a touch sample at `position`. The local position starts equal
    /// to the screen position.
    #[must_use]
    pub const fn new(id: u32, time: f64, position: Point) -> Self {
        Self {
            id,
            time,
            position,
            local: position,
            pressure: 0.0,
            size: 0.0,
            prevent_default: false,
        }
    }

    /// Returns the event with contact pressure and size set.
    #[must_use]
    pub const fn with_contact(mut self, pressure: f32, size: f32) -> Self {
        self.pressure = pressure;
        self.size = size;
        self
    }

    /// Returns a copy of this event positioned at `local` in a layer's
    /// content space. Every other field, including `prevent_default`, is
    /// carried over.
    #[must_use]
    pub const fn localize(&self, local: Point) -> Self {
        Self { local, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localize_keeps_screen_position_and_flags() {
        let mut event = TouchEvent::new(4, 12.5, Point::new(10.0, 20.0)).with_contact(0.5, 3.0);
        event.prevent_default = true;

        let local = event.localize(Point::new(1.0, 2.0));
        assert_eq!(local.local, Point::new(1.0, 2.0));
        assert_eq!(local.position, Point::new(10.0, 20.0));
        assert_eq!(local.id, 4);
        assert_eq!(local.pressure, 0.5);
        assert!(local.prevent_default);
    }

    #[test]
    fn new_event_is_unlocalized() {
        let event = TouchEvent::new(0, 0.0, Point::new(5.0, 6.0));
        assert_eq!(event.local, event.position);
        assert!(!event.prevent_default);
    }
}
