use serde::{Deserialize, Serialize};

use crate::core::Insets;
use crate::error::{ChartError, ChartResult};
use crate::interaction::PanModifier;

/// Public viewport bootstrap configuration.
///
/// This type is serializable so host applications can persist/load viewport
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartViewConfig {
    /// Smallest logical size the chart is laid out at; smaller host areas
    /// render at this size and are scaled down.
    #[serde(default = "default_min_draw_width")]
    pub min_draw_width: f64,
    #[serde(default = "default_min_draw_height")]
    pub min_draw_height: f64,
    /// Largest logical size the chart is laid out at; larger host areas
    /// render at this size and are scaled up.
    #[serde(default = "default_max_draw_width")]
    pub max_draw_width: f64,
    #[serde(default = "default_max_draw_height")]
    pub max_draw_height: f64,
    /// Minimum screen-space drag extent for a drag to count as a zoom.
    #[serde(default = "default_zoom_trigger_distance")]
    pub zoom_trigger_distance: f64,
    /// Per-notch wheel zoom amount; the applied factor is exponential in
    /// the notch count.
    #[serde(default = "default_zoom_per_wheel_notch")]
    pub zoom_per_wheel_notch: f64,
    /// Whether wheel zoom holds the pointer's logical position fixed.
    #[serde(default = "default_zoom_around_anchor")]
    pub zoom_around_anchor: bool,
    /// Modifier key that arms the pan gesture instead of drag-to-zoom.
    #[serde(default)]
    pub pan_modifier: PanModifier,
    /// Host border around the drawing surface, in screen pixels.
    #[serde(default)]
    pub insets: Insets,
}

impl Default for ChartViewConfig {
    fn default() -> Self {
        Self {
            min_draw_width: default_min_draw_width(),
            min_draw_height: default_min_draw_height(),
            max_draw_width: default_max_draw_width(),
            max_draw_height: default_max_draw_height(),
            zoom_trigger_distance: default_zoom_trigger_distance(),
            zoom_per_wheel_notch: default_zoom_per_wheel_notch(),
            zoom_around_anchor: default_zoom_around_anchor(),
            pan_modifier: PanModifier::default(),
            insets: Insets::default(),
        }
    }
}

impl ChartViewConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum logical draw size.
    #[must_use]
    pub fn with_min_draw_size(mut self, width: f64, height: f64) -> Self {
        self.min_draw_width = width;
        self.min_draw_height = height;
        self
    }

    /// Sets the maximum logical draw size.
    #[must_use]
    pub fn with_max_draw_size(mut self, width: f64, height: f64) -> Self {
        self.max_draw_width = width;
        self.max_draw_height = height;
        self
    }

    /// Sets the zoom trigger distance in screen pixels.
    #[must_use]
    pub fn with_zoom_trigger_distance(mut self, distance: f64) -> Self {
        self.zoom_trigger_distance = distance;
        self
    }

    /// Sets the per-notch wheel zoom amount.
    #[must_use]
    pub fn with_zoom_per_wheel_notch(mut self, amount: f64) -> Self {
        self.zoom_per_wheel_notch = amount;
        self
    }

    /// Sets whether wheel zoom is anchored at the pointer.
    #[must_use]
    pub fn with_zoom_around_anchor(mut self, enabled: bool) -> Self {
        self.zoom_around_anchor = enabled;
        self
    }

    /// Sets the modifier key that arms panning.
    #[must_use]
    pub fn with_pan_modifier(mut self, modifier: PanModifier) -> Self {
        self.pan_modifier = modifier;
        self
    }

    /// Sets the host border insets.
    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("min_draw_width", self.min_draw_width),
            ("min_draw_height", self.min_draw_height),
            ("max_draw_width", self.max_draw_width),
            ("max_draw_height", self.max_draw_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if self.min_draw_width > self.max_draw_width
            || self.min_draw_height > self.max_draw_height
        {
            return Err(ChartError::InvalidConfig(
                "minimum draw size must not exceed maximum draw size".to_owned(),
            ));
        }
        if !self.zoom_trigger_distance.is_finite() || self.zoom_trigger_distance < 0.0 {
            return Err(ChartError::InvalidConfig(
                "`zoom_trigger_distance` must be finite and >= 0".to_owned(),
            ));
        }
        if !self.zoom_per_wheel_notch.is_finite() || self.zoom_per_wheel_notch <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "`zoom_per_wheel_notch` must be finite and > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("insets.top", self.insets.top),
            ("insets.left", self.insets.left),
            ("insets.bottom", self.insets.bottom),
            ("insets.right", self.insets.right),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_min_draw_width() -> f64 {
    300.0
}

fn default_min_draw_height() -> f64 {
    200.0
}

fn default_max_draw_width() -> f64 {
    1024.0
}

fn default_max_draw_height() -> f64 {
    768.0
}

fn default_zoom_trigger_distance() -> f64 {
    10.0
}

fn default_zoom_per_wheel_notch() -> f64 {
    0.1
}

fn default_zoom_around_anchor() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::ChartViewConfig;
    use crate::error::ChartError;

    #[test]
    fn default_config_validates() {
        assert!(ChartViewConfig::default().validate().is_ok());
    }

    #[test]
    fn min_above_max_is_rejected() {
        let config = ChartViewConfig::default()
            .with_min_draw_size(2000.0, 200.0)
            .with_max_draw_size(1024.0, 768.0);
        assert!(matches!(
            config.validate(),
            Err(ChartError::InvalidConfig(_))
        ));
    }

    #[test]
    fn json_round_trip_preserves_fields() {
        let config = ChartViewConfig::default()
            .with_zoom_trigger_distance(25.0)
            .with_zoom_per_wheel_notch(0.25);
        let json = config.to_json_pretty().expect("serialize");
        let parsed = ChartViewConfig::from_json_str(&json).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed = ChartViewConfig::from_json_str("{}").expect("parse");
        assert_eq!(parsed, ChartViewConfig::default());
    }
}
