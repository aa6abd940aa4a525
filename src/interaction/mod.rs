//! Pointer/wheel event types and gesture state for the viewport.
//!
//! The host's windowing layer is the only source of these events; this
//! module defines the state the viewport tracks between them, not a
//! transport format.

use serde::{Deserialize, Serialize};

use crate::core::{Point, Rect};

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl PointerModifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    #[must_use]
    pub const fn ctrl() -> Self {
        Self {
            shift: false,
            ctrl: true,
            alt: false,
        }
    }

    #[must_use]
    pub const fn shift() -> Self {
        Self {
            shift: true,
            ctrl: false,
            alt: false,
        }
    }
}

/// Which modifier arms the pan gesture instead of drag-to-zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PanModifier {
    Shift,
    #[default]
    Ctrl,
    Alt,
}

impl PanModifier {
    #[must_use]
    pub const fn is_active(self, modifiers: PointerModifiers) -> bool {
        match self {
            Self::Shift => modifiers.shift,
            Self::Ctrl => modifiers.ctrl,
            Self::Alt => modifiers.alt,
        }
    }
}

/// A press/drag/release/move sample in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    pub modifiers: PointerModifiers,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            modifiers: PointerModifiers::NONE,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: PointerModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A wheel rotation sample in screen coordinates.
///
/// Positive `notches` rotate toward the user (zoom out), negative away
/// (zoom in), matching common windowing conventions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub x: f64,
    pub y: f64,
    pub notches: i32,
}

impl WheelEvent {
    #[must_use]
    pub const fn new(x: f64, y: f64, notches: i32) -> Self {
        Self { x, y, notches }
    }

    #[must_use]
    pub const fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// In-progress drag-to-zoom gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    /// Press point clamped into the data area, in screen coordinates.
    pub anchor: Point,
    /// Current selection rectangle; `None` until the first drag sample.
    pub selection: Option<Rect>,
}

/// In-progress pan gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanState {
    /// Last pointer position, in screen coordinates.
    pub last: Point,
    /// Data-area width captured at pan start.
    pub base_width: f64,
    /// Data-area height captured at pan start.
    pub base_height: f64,
}

/// Gesture the viewport is currently tracking.
///
/// The enum makes the pan/zoom mutual-exclusion invariant structural: at no
/// observable instant are both gestures active.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Panning(PanState),
    ZoomSelecting(ZoomState),
}

impl Gesture {
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub const fn is_panning(&self) -> bool {
        matches!(self, Self::Panning(_))
    }

    #[must_use]
    pub const fn is_zoom_selecting(&self) -> bool {
        matches!(self, Self::ZoomSelecting(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{Gesture, PanModifier, PointerEvent, PointerModifiers};

    #[test]
    fn pan_modifier_matches_configured_key() {
        assert!(PanModifier::Ctrl.is_active(PointerModifiers::ctrl()));
        assert!(!PanModifier::Ctrl.is_active(PointerModifiers::shift()));
        assert!(PanModifier::Alt.is_active(PointerModifiers {
            shift: false,
            ctrl: false,
            alt: true,
        }));
    }

    #[test]
    fn default_gesture_is_idle() {
        let gesture = Gesture::default();
        assert!(gesture.is_idle());
        assert!(!gesture.is_panning());
        assert!(!gesture.is_zoom_selecting());
    }

    #[test]
    fn pointer_event_builder_keeps_coordinates() {
        let event = PointerEvent::new(10.0, 20.0).with_modifiers(PointerModifiers::ctrl());
        assert_eq!(event.point().x, 10.0);
        assert!(event.modifiers.ctrl);
    }
}
