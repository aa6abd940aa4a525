use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Point, PlotRenderingInfo, Rect};
use crate::plot::{Plot, PlotCapabilities, PlotDrawContext, PlotOrientation};
use crate::render::RenderFrame;

/// Headless plot used by tests and headless viewport usage.
///
/// It renders nothing but fulfils the whole plot contract: it records its
/// data area (and optional stacked subplot bands) into the rendering-info
/// tree and keeps counters for every zoom/pan call so interaction tests can
/// assert exactly which operations reached the plot.
#[derive(Debug)]
pub struct NullPlot {
    orientation: PlotOrientation,
    capabilities: PlotCapabilities,
    subplot_weights: SmallVec<[f64; 4]>,
    subplot_gap: f64,
    notify: bool,

    pub draw_count: usize,
    pub last_data_area: Option<Rect>,
    pub domain_zoom_factors: Vec<f64>,
    pub range_zoom_factors: Vec<f64>,
    pub last_zoom_anchor: Option<Point>,
    pub last_domain_bounds: Option<(f64, f64)>,
    pub last_range_bounds: Option<(f64, f64)>,
    pub domain_pan_total: f64,
    pub range_pan_total: f64,
    pub pan_calls: usize,
    pub auto_bounds_restores: usize,
    /// Every `set_notify` argument in call order, for batching assertions.
    pub notify_sequence: Vec<bool>,
}

impl Default for NullPlot {
    fn default() -> Self {
        Self::new(PlotCapabilities::all())
    }
}

impl NullPlot {
    #[must_use]
    pub fn new(capabilities: PlotCapabilities) -> Self {
        Self {
            orientation: PlotOrientation::Vertical,
            capabilities,
            subplot_weights: SmallVec::new(),
            subplot_gap: 0.0,
            notify: true,
            draw_count: 0,
            last_data_area: None,
            domain_zoom_factors: Vec::new(),
            range_zoom_factors: Vec::new(),
            last_zoom_anchor: None,
            last_domain_bounds: None,
            last_range_bounds: None,
            domain_pan_total: 0.0,
            range_pan_total: 0.0,
            pan_calls: 0,
            auto_bounds_restores: 0,
            notify_sequence: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: PlotOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Splits the data area into weighted stacked bands, one subplot node
    /// per weight, separated by `gap` logical units.
    #[must_use]
    pub fn with_subplots(mut self, weights: impl IntoIterator<Item = f64>, gap: f64) -> Self {
        self.subplot_weights = weights.into_iter().collect();
        self.subplot_gap = gap;
        self
    }
}

impl Plot for NullPlot {
    fn orientation(&self) -> PlotOrientation {
        self.orientation
    }

    fn capabilities(&self) -> PlotCapabilities {
        self.capabilities
    }

    fn draw(&mut self, _frame: &mut RenderFrame, data_area: Rect, ctx: &mut PlotDrawContext<'_>) {
        self.draw_count += 1;
        self.last_data_area = Some(data_area);
        ctx.info.set_data_area(data_area);

        let weight_total: f64 = self.subplot_weights.iter().sum();
        if weight_total <= 0.0 {
            return;
        }

        let band_count = self.subplot_weights.len();
        let gap_total = self.subplot_gap * (band_count.saturating_sub(1)) as f64;
        let usable_height = (data_area.height - gap_total).max(0.0);
        let mut cursor_y = data_area.y;
        for weight in &self.subplot_weights {
            let band_height = usable_height * weight / weight_total;
            let band = Rect::new(data_area.x, cursor_y, data_area.width, band_height);
            ctx.info.push_subplot(PlotRenderingInfo::new(band));
            cursor_y += band_height + self.subplot_gap;
        }
        trace!(bands = band_count, "null plot recorded subplot bands");
    }

    fn zoom_domain_axes(
        &mut self,
        factor: f64,
        _info: &PlotRenderingInfo,
        anchor: Point,
        _zoom_around_anchor: bool,
    ) {
        self.domain_zoom_factors.push(factor);
        self.last_zoom_anchor = Some(anchor);
    }

    fn zoom_range_axes(
        &mut self,
        factor: f64,
        _info: &PlotRenderingInfo,
        anchor: Point,
        _zoom_around_anchor: bool,
    ) {
        self.range_zoom_factors.push(factor);
        self.last_zoom_anchor = Some(anchor);
    }

    fn zoom_domain_bounds(&mut self, lower: f64, upper: f64, _info: &PlotRenderingInfo) {
        self.last_domain_bounds = Some((lower, upper));
    }

    fn zoom_range_bounds(&mut self, lower: f64, upper: f64, _info: &PlotRenderingInfo) {
        self.last_range_bounds = Some((lower, upper));
    }

    fn pan_domain_axes(&mut self, fraction: f64, _info: &PlotRenderingInfo, _source: Point) {
        self.domain_pan_total += fraction;
        self.pan_calls += 1;
    }

    fn pan_range_axes(&mut self, fraction: f64, _info: &PlotRenderingInfo, _source: Point) {
        self.range_pan_total += fraction;
        self.pan_calls += 1;
    }

    fn restore_auto_bounds(&mut self) {
        self.auto_bounds_restores += 1;
    }

    fn set_notify(&mut self, notify: bool) {
        self.notify = notify;
        self.notify_sequence.push(notify);
    }

    fn is_notify(&self) -> bool {
        self.notify
    }
}

#[cfg(test)]
mod tests {
    use super::NullPlot;
    use crate::core::{Point, PlotRenderingInfo, Rect, Size};
    use crate::plot::{Plot, PlotCapabilities, PlotDrawContext};
    use crate::render::RenderFrame;

    #[test]
    fn draw_splits_weighted_bands_with_gap() {
        let mut plot = NullPlot::new(PlotCapabilities::all()).with_subplots([1.0, 1.0], 10.0);
        let mut frame = RenderFrame::new(Size::new(100.0, 210.0));
        let mut info = PlotRenderingInfo::default();
        let mut ctx = PlotDrawContext {
            entities: None,
            info: &mut info,
            anchor: None,
        };

        plot.draw(
            &mut frame,
            Rect::new(0.0, 0.0, 100.0, 210.0),
            &mut ctx,
        );

        assert_eq!(info.subplot_count(), 2);
        assert_eq!(info.subplots()[0].data_area(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(
            info.subplots()[1].data_area(),
            Rect::new(0.0, 110.0, 100.0, 100.0)
        );
        assert_eq!(info.subplot_index_at(Point::new(50.0, 105.0)), None);
    }

    #[test]
    fn notify_sequence_records_batching() {
        let mut plot = NullPlot::default();
        plot.set_notify(false);
        plot.set_notify(true);
        assert_eq!(plot.notify_sequence, vec![false, true]);
        assert!(plot.is_notify());
    }
}
