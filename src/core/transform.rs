//! Coordinate transforms between screen space and chart-logical space.
//!
//! Pointer events arrive in screen pixels relative to the host component.
//! The chart is laid out in logical units that only differ from screen
//! pixels when the viewport clamps the drawing size and scales the result
//! to fill the available area.

use serde::{Deserialize, Serialize};

use crate::core::geometry::{Insets, Point, Rect};

/// Stateless mapping between screen pixels and chart-logical units.
///
/// The mapping is `screen = logical * scale + insets`; both directions are
/// defined for all finite inputs and round-trip within floating-point
/// tolerance for positive scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub insets: Insets,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ViewTransform {
    #[must_use]
    pub const fn new(insets: Insets, scale_x: f64, scale_y: f64) -> Self {
        Self {
            insets,
            scale_x,
            scale_y,
        }
    }

    #[must_use]
    pub const fn identity() -> Self {
        Self::new(Insets::new(0.0, 0.0, 0.0, 0.0), 1.0, 1.0)
    }

    /// Maps a pointer position into chart-logical space.
    #[must_use]
    pub fn screen_to_logical(self, point: Point) -> Point {
        Point::new(
            (point.x - self.insets.left) / self.scale_x,
            (point.y - self.insets.top) / self.scale_y,
        )
    }

    /// Maps a chart-logical position back into screen space.
    #[must_use]
    pub fn logical_to_screen(self, point: Point) -> Point {
        Point::new(
            point.x * self.scale_x + self.insets.left,
            point.y * self.scale_y + self.insets.top,
        )
    }

    /// Maps a chart-logical rectangle into screen space.
    ///
    /// Applied to data-area rectangles before comparing them against raw
    /// pointer coordinates.
    #[must_use]
    pub fn scale_rect(self, rect: Rect) -> Rect {
        Rect::new(
            rect.x * self.scale_x + self.insets.left,
            rect.y * self.scale_y + self.insets.top,
            rect.width * self.scale_x,
            rect.height * self.scale_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::ViewTransform;
    use crate::core::geometry::{Insets, Point, Rect};

    #[test]
    fn identity_leaves_points_untouched() {
        let transform = ViewTransform::identity();
        let point = Point::new(123.5, -42.0);
        assert_eq!(transform.screen_to_logical(point), point);
        assert_eq!(transform.logical_to_screen(point), point);
    }

    #[test]
    fn screen_to_logical_subtracts_insets_then_divides() {
        let transform = ViewTransform::new(Insets::new(10.0, 5.0, 0.0, 0.0), 0.5, 0.5);
        let logical = transform.screen_to_logical(Point::new(75.0, 50.0));
        assert_abs_diff_eq!(logical.x, 140.0, epsilon = 1e-9);
        assert_abs_diff_eq!(logical.y, 80.0, epsilon = 1e-9);
    }

    #[test]
    fn round_trip_is_stable() {
        let transform = ViewTransform::new(Insets::new(3.0, 7.0, 3.0, 7.0), 0.75, 1.25);
        let original = Point::new(321.25, 87.5);
        let round_trip = transform.logical_to_screen(transform.screen_to_logical(original));
        assert_abs_diff_eq!(round_trip.x, original.x, epsilon = 1e-9);
        assert_abs_diff_eq!(round_trip.y, original.y, epsilon = 1e-9);
    }

    #[test]
    fn scale_rect_maps_origin_and_extent() {
        let transform = ViewTransform::new(Insets::new(2.0, 4.0, 0.0, 0.0), 2.0, 3.0);
        let scaled = transform.scale_rect(Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(scaled, Rect::new(24.0, 62.0, 60.0, 120.0));
    }
}
