use serde::{Deserialize, Serialize};

use crate::core::{Insets, RectEdge, Size};

/// Text measurement seam for title layout.
///
/// Real backends wire their font engine in here; the default keeps layout
/// deterministic for headless use and tests.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> Size;
}

/// Deterministic approximation of proportional text metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonospaceMeasurer {
    /// Glyph advance as a fraction of the font size.
    pub advance_ratio: f64,
    /// Line height as a fraction of the font size.
    pub line_height_ratio: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.3,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> Size {
        let glyphs = text.chars().count() as f64;
        Size::new(
            glyphs * self.advance_ratio * font_size,
            self.line_height_ratio * font_size,
        )
    }
}

/// A single-line chart title anchored to one edge of the chart area.
///
/// Titles are laid out in list order; each visible title consumes a band
/// along its edge and shrinks the remaining rectangle, so order is
/// significant for the final layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    pub edge: RectEdge,
    pub visible: bool,
    pub font_size: f64,
    pub padding: Insets,
}

impl Title {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            edge: RectEdge::Top,
            visible: true,
            font_size: 18.0,
            padding: Insets::uniform(2.0),
        }
    }

    #[must_use]
    pub fn with_edge(mut self, edge: RectEdge) -> Self {
        self.edge = edge;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Natural size under the constraint that the title must fit the
    /// remaining rectangle.
    ///
    /// Left/right titles are drawn rotated, so their text length runs along
    /// the height constraint and their thickness along the width.
    #[must_use]
    pub fn arrange(&self, measurer: &dyn TextMeasurer, max_width: f64, max_height: f64) -> Size {
        let text_size = measurer.measure(&self.text, self.font_size);
        match self.edge {
            RectEdge::Top | RectEdge::Bottom => Size::new(
                (text_size.width + self.padding.horizontal()).clamp(0.0, max_width.max(0.0)),
                (text_size.height + self.padding.vertical()).clamp(0.0, max_height.max(0.0)),
            ),
            RectEdge::Left | RectEdge::Right => Size::new(
                (text_size.height + self.padding.horizontal()).clamp(0.0, max_width.max(0.0)),
                (text_size.width + self.padding.vertical()).clamp(0.0, max_height.max(0.0)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{MonospaceMeasurer, TextMeasurer, Title};
    use crate::core::{Insets, RectEdge};

    #[test]
    fn measurer_scales_with_glyph_count_and_font_size() {
        let measurer = MonospaceMeasurer::default();
        let size = measurer.measure("abcd", 10.0);
        assert_abs_diff_eq!(size.width, 24.0, epsilon = 1e-9);
        assert_abs_diff_eq!(size.height, 13.0, epsilon = 1e-9);
    }

    #[test]
    fn top_title_clamps_to_constraint() {
        let title = Title::new("a very long chart title")
            .with_font_size(20.0)
            .with_padding(Insets::uniform(4.0));
        let size = title.arrange(&MonospaceMeasurer::default(), 100.0, 500.0);
        assert_abs_diff_eq!(size.width, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(size.height, 34.0, epsilon = 1e-9);
    }

    #[test]
    fn side_title_swaps_thickness_and_length() {
        let title = Title::new("abc")
            .with_edge(RectEdge::Left)
            .with_font_size(10.0)
            .with_padding(Insets::uniform(0.0));
        let size = title.arrange(&MonospaceMeasurer::default(), 500.0, 500.0);
        // Thickness is one line height, length is the text advance.
        assert_abs_diff_eq!(size.width, 13.0, epsilon = 1e-9);
        assert_abs_diff_eq!(size.height, 18.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_constraint_collapses_to_zero() {
        let title = Title::new("abc");
        let size = title.arrange(&MonospaceMeasurer::default(), 0.0, -5.0);
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 0.0);
    }
}
