//! The plot contract consumed by the layout pass and the viewport.
//!
//! Concrete plot renderers (bar, line, candlestick, ...) live outside this
//! crate; they honor the data-area rectangle handed to [`Plot::draw`] and
//! contribute entities and subplot geometry through [`PlotDrawContext`].
//! Zoom and pan are capability-gated: the viewport queries
//! [`Plot::capabilities`] once when a chart is attached and caches the
//! answer instead of re-probing per event.

mod null_plot;

pub use null_plot::NullPlot;

use serde::{Deserialize, Serialize};

use crate::core::{EntityCollection, Point, PlotRenderingInfo, Rect};
use crate::render::RenderFrame;

/// Orientation of the domain axis relative to the screen.
///
/// A vertical plot runs its domain along screen-x; a horizontal plot swaps
/// the domain/range roles for every gesture computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlotOrientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Axis-fraction operations a plot opts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlotCapabilities {
    pub domain_zoomable: bool,
    pub range_zoomable: bool,
    pub domain_pannable: bool,
    pub range_pannable: bool,
}

impl PlotCapabilities {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            domain_zoomable: false,
            range_zoomable: false,
            domain_pannable: false,
            range_pannable: false,
        }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            domain_zoomable: true,
            range_zoomable: true,
            domain_pannable: true,
            range_pannable: true,
        }
    }

    #[must_use]
    pub const fn zoomable(self) -> bool {
        self.domain_zoomable || self.range_zoomable
    }

    #[must_use]
    pub const fn pannable(self) -> bool {
        self.domain_pannable || self.range_pannable
    }
}

/// Mutable state a plot draw may write into.
///
/// `entities` is `None` when the caller did not request entity tracking;
/// tooltip/hit-test features then degrade silently.
pub struct PlotDrawContext<'a> {
    pub entities: Option<&'a mut EntityCollection>,
    pub info: &'a mut PlotRenderingInfo,
    /// Anchor point for auto-zoom/auto-range recentring, when one is set.
    pub anchor: Option<Point>,
}

impl PlotDrawContext<'_> {
    /// Records an entity when entity tracking is active.
    pub fn add_entity(&mut self, entity: crate::core::ChartEntity) {
        if let Some(entities) = self.entities.as_deref_mut() {
            entities.add(entity);
        }
    }
}

/// Contract between the chart layout pass, the viewport, and a plot.
///
/// Zoom/pan operations default to no-ops; a plot opts in by declaring the
/// matching capability and overriding the operation. Fraction arguments for
/// the `*_bounds` forms are normalized to `[0, 1]` of the current data
/// area; the multiplicative forms take a factor where values below 1.0
/// shrink the visible window (zoom in).
pub trait Plot {
    fn orientation(&self) -> PlotOrientation {
        PlotOrientation::Vertical
    }

    fn capabilities(&self) -> PlotCapabilities;

    /// Renders the plot into `data_area`, recording geometry and entities.
    ///
    /// Implementations must store `data_area` into `ctx.info` so pointer
    /// handling can resolve coordinates after the draw.
    fn draw(&mut self, frame: &mut RenderFrame, data_area: Rect, ctx: &mut PlotDrawContext<'_>);

    fn zoom_domain_axes(
        &mut self,
        _factor: f64,
        _info: &PlotRenderingInfo,
        _anchor: Point,
        _zoom_around_anchor: bool,
    ) {
    }

    fn zoom_range_axes(
        &mut self,
        _factor: f64,
        _info: &PlotRenderingInfo,
        _anchor: Point,
        _zoom_around_anchor: bool,
    ) {
    }

    fn zoom_domain_bounds(&mut self, _lower: f64, _upper: f64, _info: &PlotRenderingInfo) {}

    fn zoom_range_bounds(&mut self, _lower: f64, _upper: f64, _info: &PlotRenderingInfo) {}

    fn pan_domain_axes(&mut self, _fraction: f64, _info: &PlotRenderingInfo, _source: Point) {}

    fn pan_range_axes(&mut self, _fraction: f64, _info: &PlotRenderingInfo, _source: Point) {}

    /// Resets both axes to their automatically calculated bounds.
    fn restore_auto_bounds(&mut self) {}

    /// Notification-suspend toggle used to batch compound operations.
    fn set_notify(&mut self, _notify: bool) {}

    fn is_notify(&self) -> bool {
        true
    }
}

// Charts over trait objects stay usable wherever a concrete plot type fits.
impl<T: Plot + ?Sized> Plot for Box<T> {
    fn orientation(&self) -> PlotOrientation {
        (**self).orientation()
    }

    fn capabilities(&self) -> PlotCapabilities {
        (**self).capabilities()
    }

    fn draw(&mut self, frame: &mut RenderFrame, data_area: Rect, ctx: &mut PlotDrawContext<'_>) {
        (**self).draw(frame, data_area, ctx);
    }

    fn zoom_domain_axes(
        &mut self,
        factor: f64,
        info: &PlotRenderingInfo,
        anchor: Point,
        zoom_around_anchor: bool,
    ) {
        (**self).zoom_domain_axes(factor, info, anchor, zoom_around_anchor);
    }

    fn zoom_range_axes(
        &mut self,
        factor: f64,
        info: &PlotRenderingInfo,
        anchor: Point,
        zoom_around_anchor: bool,
    ) {
        (**self).zoom_range_axes(factor, info, anchor, zoom_around_anchor);
    }

    fn zoom_domain_bounds(&mut self, lower: f64, upper: f64, info: &PlotRenderingInfo) {
        (**self).zoom_domain_bounds(lower, upper, info);
    }

    fn zoom_range_bounds(&mut self, lower: f64, upper: f64, info: &PlotRenderingInfo) {
        (**self).zoom_range_bounds(lower, upper, info);
    }

    fn pan_domain_axes(&mut self, fraction: f64, info: &PlotRenderingInfo, source: Point) {
        (**self).pan_domain_axes(fraction, info, source);
    }

    fn pan_range_axes(&mut self, fraction: f64, info: &PlotRenderingInfo, source: Point) {
        (**self).pan_range_axes(fraction, info, source);
    }

    fn restore_auto_bounds(&mut self) {
        (**self).restore_auto_bounds();
    }

    fn set_notify(&mut self, notify: bool) {
        (**self).set_notify(notify);
    }

    fn is_notify(&self) -> bool {
        (**self).is_notify()
    }
}
