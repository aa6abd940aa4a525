use tracing::trace;

use crate::chart::Chart;
use crate::core::{ChartEntity, Point, Rect, RenderingInfo, Size, ViewTransform};
use crate::error::{ChartError, ChartResult};
use crate::interaction::Gesture;
use crate::plot::{Plot, PlotCapabilities, PlotOrientation};
use crate::render::{RenderFrame, Renderer};

use super::ChartViewConfig;

/// Cached scene for the last clamped logical draw size.
///
/// Reused across paints while no refresh is pending, so expose-only repaints
/// skip the layout and render work entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceBuffer {
    pub width: f64,
    pub height: f64,
    pub frame: RenderFrame,
}

/// Interactive viewport hosting one chart inside a host window.
///
/// Owns the device buffer the chart draws into, the rendering-info snapshot
/// pointer handling consults, and the gesture state machine. The host's
/// windowing layer forwards resize, paint, pointer, and wheel events; the
/// viewport reacts and asks the renderer to present frames.
pub struct ChartView<R: Renderer, P: Plot> {
    renderer: R,
    chart: Chart<P>,
    config: ChartViewConfig,
    available: Size,
    scale_x: f64,
    scale_y: f64,
    buffer: Option<DeviceBuffer>,
    refresh_needed: bool,
    info: RenderingInfo,
    pub(super) gesture: Gesture,
    /// Plot capabilities, queried once at attach time and cached.
    pub(super) capabilities: PlotCapabilities,
    pub(super) orientation: PlotOrientation,
    /// Logical anchor for the next draw, set by pointer presses.
    pub(super) anchor: Option<Point>,
}

impl<R: Renderer, P: Plot> ChartView<R, P> {
    pub fn new(renderer: R, chart: Chart<P>, config: ChartViewConfig) -> ChartResult<Self> {
        config.validate()?;
        let capabilities = chart.plot().capabilities();
        let orientation = chart.plot().orientation();
        Ok(Self {
            renderer,
            chart,
            config,
            available: Size::default(),
            scale_x: 1.0,
            scale_y: 1.0,
            buffer: None,
            refresh_needed: true,
            info: RenderingInfo::new(),
            gesture: Gesture::Idle,
            capabilities,
            orientation,
            anchor: None,
        })
    }

    /// Reacts to the host window's available drawing area changing.
    ///
    /// Invalidates the device buffer and recomputes the draw scale: when the
    /// area falls outside the configured min/max draw bounds, layout happens
    /// at the clamped size and the result is visually scaled to fill.
    pub fn set_available_size(&mut self, width: f64, height: f64) {
        self.available = Size::new(width, height);
        if self.available.is_valid() {
            let (_, scale_x) = clamp_axis(width, self.config.min_draw_width, self.config.max_draw_width);
            let (_, scale_y) =
                clamp_axis(height, self.config.min_draw_height, self.config.max_draw_height);
            self.scale_x = scale_x;
            self.scale_y = scale_y;
        } else {
            self.scale_x = 1.0;
            self.scale_y = 1.0;
        }
        self.buffer = None;
        self.refresh_needed = true;
        trace!(
            width,
            height,
            scale_x = self.scale_x,
            scale_y = self.scale_y,
            "available size changed"
        );
    }

    /// Logical size the chart is laid out at, after min/max clamping.
    #[must_use]
    pub fn logical_draw_size(&self) -> Size {
        let (width, _) = clamp_axis(
            self.available.width,
            self.config.min_draw_width,
            self.config.max_draw_width,
        );
        let (height, _) = clamp_axis(
            self.available.height,
            self.config.min_draw_height,
            self.config.max_draw_height,
        );
        Size::new(width, height)
    }

    /// Paints the chart, rebuilding the device buffer only when needed.
    ///
    /// Returns `true` when a full layout+render pass ran, `false` when the
    /// cached buffer was re-presented.
    pub fn paint(&mut self) -> ChartResult<bool> {
        if !self.available.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.available.width,
                height: self.available.height,
            });
        }
        if self.chart.take_change() {
            self.refresh_needed = true;
        }

        if self.refresh_needed || self.buffer.is_none() {
            let draw = self.logical_draw_size();
            let mut frame = RenderFrame::new(draw).with_scale(self.scale_x, self.scale_y);
            let chart_area = Rect::new(0.0, 0.0, draw.width, draw.height);
            let anchor = self.anchor.take();
            self.chart
                .draw(&mut frame, chart_area, anchor, Some(&mut self.info));
            trace!(
                width = draw.width,
                height = draw.height,
                entities = self.info.entities().len(),
                "device buffer rebuilt"
            );
            self.renderer.render(&frame)?;
            self.buffer = Some(DeviceBuffer {
                width: draw.width,
                height: draw.height,
                frame,
            });
            self.refresh_needed = false;
            return Ok(true);
        }

        if let Some(buffer) = &self.buffer {
            self.renderer.render(&buffer.frame)?;
        }
        Ok(false)
    }

    /// Forces the next paint to re-run layout and rendering.
    pub fn request_refresh(&mut self) {
        self.refresh_needed = true;
    }

    #[must_use]
    pub fn refresh_pending(&self) -> bool {
        self.refresh_needed || self.chart.is_change_pending()
    }

    #[must_use]
    pub fn current_scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        ViewTransform::new(self.config.insets, self.scale_x, self.scale_y)
    }

    #[must_use]
    pub fn screen_to_logical(&self, point: Point) -> Point {
        self.transform().screen_to_logical(point)
    }

    #[must_use]
    pub fn logical_to_screen(&self, point: Point) -> Point {
        self.transform().logical_to_screen(point)
    }

    /// Data area of the last draw, mapped into screen space.
    #[must_use]
    pub fn scaled_data_area(&self) -> Rect {
        self.transform().scale_rect(self.info.plot_info().data_area())
    }

    /// Entity under a screen point, from the last draw's snapshot.
    ///
    /// Degrades to `None` when no draw has happened yet or entity tracking
    /// found nothing there.
    #[must_use]
    pub fn entity_at(&self, screen_point: Point) -> Option<&ChartEntity> {
        let logical = self.screen_to_logical(screen_point);
        self.info.entity_at(logical)
    }

    /// Tooltip text under a screen point, if any.
    #[must_use]
    pub fn tooltip_at(&self, screen_point: Point) -> Option<&str> {
        self.entity_at(screen_point)?.tooltip.as_deref()
    }

    /// Index of the subplot under a screen point, for combined plots.
    #[must_use]
    pub fn subplot_index_at(&self, screen_point: Point) -> Option<usize> {
        let logical = self.screen_to_logical(screen_point);
        self.info.plot_info().subplot_index_at(logical)
    }

    #[must_use]
    pub fn rendering_info(&self) -> &RenderingInfo {
        &self.info
    }

    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    #[must_use]
    pub fn config(&self) -> ChartViewConfig {
        self.config
    }

    #[must_use]
    pub fn chart(&self) -> &Chart<P> {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut Chart<P> {
        &mut self.chart
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub(super) fn chart_and_info(&mut self) -> (&mut Chart<P>, &RenderingInfo) {
        (&mut self.chart, &self.info)
    }
}

fn clamp_axis(available: f64, min: f64, max: f64) -> (f64, f64) {
    if available < min {
        (min, available / min)
    } else if available > max {
        (max, available / max)
    } else {
        (available, 1.0)
    }
}
