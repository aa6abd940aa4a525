//! Pointer and wheel handling for [`ChartView`].
//!
//! Implements the Idle / Panning / ZoomSelecting state machine. All pointer
//! math runs in screen space against the scaled data area of the last draw;
//! only the operations handed to the plot are normalized (fractions) or
//! logical (wheel anchor).

use tracing::debug;

use crate::core::{Point, Rect};
use crate::interaction::{Gesture, PanState, PointerEvent, WheelEvent, ZoomState};
use crate::plot::{Plot, PlotOrientation};
use crate::render::Renderer;

use super::ChartView;

impl<R: Renderer, P: Plot> ChartView<R, P> {
    /// Screen-axis zoomability: which of (horizontal, vertical) drag extents
    /// may trigger a zoom, given capabilities and orientation.
    fn axis_zoomability(&self) -> (bool, bool) {
        let caps = self.capabilities;
        match self.orientation {
            PlotOrientation::Vertical => (caps.domain_zoomable, caps.range_zoomable),
            PlotOrientation::Horizontal => (caps.range_zoomable, caps.domain_zoomable),
        }
    }

    pub fn on_pointer_press(&mut self, event: PointerEvent) {
        let point = event.point();
        self.anchor = Some(self.screen_to_logical(point));
        if !self.gesture.is_idle() {
            return;
        }
        let data_area = self.scaled_data_area();
        if data_area.is_degenerate() {
            return;
        }

        if self.config().pan_modifier.is_active(event.modifiers) {
            if self.capabilities.pannable() && data_area.contains(point) {
                self.gesture = Gesture::Panning(PanState {
                    last: point,
                    base_width: data_area.width,
                    base_height: data_area.height,
                });
                debug!(x = point.x, y = point.y, "pan gesture started");
            }
        } else if self.capabilities.zoomable() {
            self.gesture = Gesture::ZoomSelecting(ZoomState {
                anchor: data_area.clamp_point(point),
                selection: None,
            });
        }
    }

    pub fn on_pointer_drag(&mut self, event: PointerEvent) {
        match self.gesture {
            Gesture::Panning(state) => self.continue_pan(state, event),
            Gesture::ZoomSelecting(state) => self.continue_zoom_selection(state, event),
            Gesture::Idle => {}
        }
    }

    pub fn on_pointer_release(&mut self, event: PointerEvent) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => {}
            Gesture::Panning(_) => {
                debug!("pan gesture finished");
                self.request_refresh();
            }
            Gesture::ZoomSelecting(state) => self.finish_zoom_selection(state, event),
        }
    }

    /// Hit-tests the hover position against the last draw's entities, so
    /// hosts can surface tooltips on pointer move.
    #[must_use]
    pub fn on_pointer_move(&self, event: PointerEvent) -> Option<&crate::core::ChartEntity> {
        self.entity_at(event.point())
    }

    /// Wheel zoom, anchored at the pointer, without entering a drag gesture.
    pub fn on_wheel(&mut self, event: WheelEvent) {
        if !self.gesture.is_idle() || event.notches == 0 {
            return;
        }
        let point = event.point();
        let data_area = self.scaled_data_area();
        if data_area.is_degenerate() || !data_area.contains(point) {
            return;
        }

        let base = 1.0 + self.config().zoom_per_wheel_notch;
        let mut factor = base.powi(event.notches.abs());
        if event.notches < 0 {
            factor = 1.0 / factor;
        }
        let anchor = self.screen_to_logical(point);
        let around_anchor = self.config().zoom_around_anchor;
        let caps = self.capabilities;

        let (chart, info) = self.chart_and_info();
        let saved = chart.plot().is_notify();
        let plot = chart.plot_mut();
        plot.set_notify(false);
        if caps.domain_zoomable {
            plot.zoom_domain_axes(factor, info.plot_info(), anchor, around_anchor);
        }
        if caps.range_zoomable {
            plot.zoom_range_axes(factor, info.plot_info(), anchor, around_anchor);
        }
        plot.set_notify(saved);
        self.request_refresh();
        debug!(factor, notches = event.notches, "wheel zoom applied");
    }

    fn continue_pan(&mut self, mut state: PanState, event: PointerEvent) {
        if state.base_width <= 0.0 || state.base_height <= 0.0 {
            return;
        }
        let dx = event.x - state.last.x;
        let dy = event.y - state.last.y;
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        let w_fraction = -dx / state.base_width;
        let h_fraction = dy / state.base_height;
        let (domain_fraction, range_fraction) = match self.orientation {
            PlotOrientation::Vertical => (w_fraction, h_fraction),
            PlotOrientation::Horizontal => (h_fraction, w_fraction),
        };
        let caps = self.capabilities;

        let (chart, info) = self.chart_and_info();
        let saved = chart.plot().is_notify();
        let plot = chart.plot_mut();
        plot.set_notify(false);
        if caps.domain_pannable {
            plot.pan_domain_axes(domain_fraction, info.plot_info(), state.last);
        }
        if caps.range_pannable {
            plot.pan_range_axes(range_fraction, info.plot_info(), state.last);
        }
        plot.set_notify(saved);

        state.last = event.point();
        self.gesture = Gesture::Panning(state);
        self.request_refresh();
    }

    fn continue_zoom_selection(&mut self, mut state: ZoomState, event: PointerEvent) {
        let data_area = self.scaled_data_area();
        if data_area.is_degenerate() {
            return;
        }
        let Some(selection) = self.selection_rect(state.anchor, event.point(), data_area) else {
            return;
        };
        state.selection = Some(selection);
        self.gesture = Gesture::ZoomSelecting(state);
    }

    fn finish_zoom_selection(&mut self, state: ZoomState, event: PointerEvent) {
        // A press without any drag is a plain click, not a zoom gesture.
        if state.selection.is_none() {
            return;
        }
        let data_area = self.scaled_data_area();
        if data_area.is_degenerate() {
            self.request_refresh();
            return;
        }

        let (h_zoom, v_zoom) = self.axis_zoomability();
        let trigger = self.config().zoom_trigger_distance;
        let extent_x = (event.x - state.anchor.x).abs();
        let extent_y = (event.y - state.anchor.y).abs();
        let triggered = (h_zoom && extent_x >= trigger) || (v_zoom && extent_y >= trigger);
        let reversed = (h_zoom && event.x < state.anchor.x) || (v_zoom && event.y < state.anchor.y);

        if triggered && !reversed {
            if let Some(selection) = self.selection_rect(state.anchor, event.point(), data_area) {
                self.apply_selection_zoom(selection, data_area);
            }
        } else {
            debug!(
                extent_x,
                extent_y, reversed, "drag too small or reversed, restoring auto bounds"
            );
            let (chart, _) = self.chart_and_info();
            let saved = chart.plot().is_notify();
            let plot = chart.plot_mut();
            plot.set_notify(false);
            plot.restore_auto_bounds();
            plot.set_notify(saved);
        }
        self.request_refresh();
    }

    /// Selection rectangle from anchor to pointer, restricted by which
    /// screen axes may zoom and clamped to the data area.
    fn selection_rect(&self, anchor: Point, pointer: Point, data_area: Rect) -> Option<Rect> {
        let (h_zoom, v_zoom) = self.axis_zoomability();
        let clamped = data_area.clamp_point(pointer);
        let rect = if h_zoom && v_zoom {
            Rect::from_corners(anchor, clamped)
        } else if h_zoom {
            Rect::from_corners(
                Point::new(anchor.x, data_area.y),
                Point::new(clamped.x, data_area.max_y()),
            )
        } else if v_zoom {
            Rect::from_corners(
                Point::new(data_area.x, anchor.y),
                Point::new(data_area.max_x(), clamped.y),
            )
        } else {
            return None;
        };
        Some(rect)
    }

    /// Converts a committed selection into normalized [0, 1] fractions of
    /// the data area and hands them to the plot's bounds-zoom operations.
    fn apply_selection_zoom(&mut self, selection: Rect, data_area: Rect) {
        let x_lower = ((selection.x - data_area.x) / data_area.width).clamp(0.0, 1.0);
        let x_upper = ((selection.max_x() - data_area.x) / data_area.width).clamp(0.0, 1.0);
        // Screen y grows downward; range fractions grow upward.
        let y_lower = ((data_area.max_y() - selection.max_y()) / data_area.height).clamp(0.0, 1.0);
        let y_upper = ((data_area.max_y() - selection.y) / data_area.height).clamp(0.0, 1.0);

        let ((domain_lower, domain_upper), (range_lower, range_upper)) = match self.orientation {
            PlotOrientation::Vertical => ((x_lower, x_upper), (y_lower, y_upper)),
            PlotOrientation::Horizontal => ((y_lower, y_upper), (x_lower, x_upper)),
        };
        let caps = self.capabilities;

        let (chart, info) = self.chart_and_info();
        let saved = chart.plot().is_notify();
        let plot = chart.plot_mut();
        plot.set_notify(false);
        if caps.domain_zoomable && domain_lower < domain_upper {
            plot.zoom_domain_bounds(domain_lower, domain_upper, info.plot_info());
        }
        if caps.range_zoomable && range_lower < range_upper {
            plot.zoom_range_bounds(range_lower, range_upper, info.plot_info());
        }
        plot.set_notify(saved);
        debug!(
            domain_lower,
            domain_upper, range_lower, range_upper, "zoom selection committed"
        );
    }
}
