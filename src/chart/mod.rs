//! The declarative chart model and its layout/draw entry point.
//!
//! A [`Chart`] is a plot plus an ordered list of titles. Drawing trims the
//! chart rectangle title-by-title, hands the residual rectangle to the plot
//! as its data area, and (when requested) records every placement into a
//! [`RenderingInfo`] snapshot for later hit-testing and gestures.

mod title;

pub use title::{MonospaceMeasurer, TextMeasurer, Title};

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{
    ChartEntity, EntityOwner, EntityShape, Insets, Point, PlotRenderingInfo, Rect, RenderingInfo,
};
use crate::plot::{Plot, PlotDrawContext};
use crate::render::{Color, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

pub struct Chart<P: Plot> {
    title: Option<Title>,
    subtitles: SmallVec<[Title; 2]>,
    plot: P,
    padding: Insets,
    background: Option<Color>,
    measurer: Box<dyn TextMeasurer>,
    notify: bool,
    change_pending: bool,
    suppressed_change: bool,
}

impl<P: Plot> Chart<P> {
    #[must_use]
    pub fn new(plot: P) -> Self {
        Self {
            title: None,
            subtitles: SmallVec::new(),
            plot,
            padding: Insets::default(),
            background: None,
            measurer: Box::new(MonospaceMeasurer::default()),
            notify: true,
            change_pending: false,
            suppressed_change: false,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: Title) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: Title) -> Self {
        self.subtitles.push(subtitle);
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn set_title(&mut self, title: Option<Title>) {
        self.title = title;
        self.mark_change();
    }

    pub fn add_subtitle(&mut self, subtitle: Title) {
        self.subtitles.push(subtitle);
        self.mark_change();
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
        self.mark_change();
    }

    pub fn set_background(&mut self, background: Option<Color>) {
        self.background = background;
        self.mark_change();
    }

    pub fn set_measurer(&mut self, measurer: Box<dyn TextMeasurer>) {
        self.measurer = measurer;
        self.mark_change();
    }

    #[must_use]
    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    #[must_use]
    pub fn subtitles(&self) -> &[Title] {
        &self.subtitles
    }

    #[must_use]
    pub fn padding(&self) -> Insets {
        self.padding
    }

    #[must_use]
    pub fn plot(&self) -> &P {
        &self.plot
    }

    pub fn plot_mut(&mut self) -> &mut P {
        &mut self.plot
    }

    /// Suspends or resumes change recording.
    ///
    /// Changes made while suspended coalesce into a single pending change
    /// when notifications are re-enabled, so a listener driving a redraw is
    /// not invoked redundantly mid-batch.
    pub fn set_notify(&mut self, notify: bool) {
        self.notify = notify;
        if notify && self.suppressed_change {
            self.suppressed_change = false;
            self.change_pending = true;
        }
    }

    #[must_use]
    pub fn is_notify(&self) -> bool {
        self.notify
    }

    #[must_use]
    pub fn is_change_pending(&self) -> bool {
        self.change_pending
    }

    /// Consumes the pending-change flag.
    pub fn take_change(&mut self) -> bool {
        std::mem::take(&mut self.change_pending)
    }

    fn mark_change(&mut self) {
        if self.notify {
            self.change_pending = true;
        } else {
            self.suppressed_change = true;
        }
    }

    /// Lays out and renders the chart into `chart_area`.
    ///
    /// When `info` is present it is cleared and fully repopulated; when
    /// absent no entity tracking occurs and tooltip/hit-test features
    /// degrade silently. Degenerate residual rectangles are clamped to zero
    /// extent rather than treated as errors.
    pub fn draw(
        &mut self,
        frame: &mut RenderFrame,
        chart_area: Rect,
        anchor: Option<Point>,
        mut info: Option<&mut RenderingInfo>,
    ) {
        trace!(?chart_area, "chart draw pass");
        if let Some(info) = info.as_deref_mut() {
            info.clear(chart_area);
        }

        if let Some(background) = self.background {
            frame.push_rect(RectPrimitive::new(
                chart_area.x,
                chart_area.y,
                chart_area.width,
                chart_area.height,
                background,
            ));
        }

        let mut remaining = self.padding.shrink(chart_area);

        let titles = self
            .title
            .iter()
            .chain(self.subtitles.iter())
            .cloned()
            .collect::<SmallVec<[Title; 4]>>();
        for (index, title) in titles.iter().enumerate() {
            if !title.visible {
                continue;
            }
            let title_rect = Self::allocate_title(&*self.measurer, title, &mut remaining);
            if title_rect.is_degenerate() {
                debug!(index, "degenerate residual, title contributes nothing");
                continue;
            }
            Self::emit_title(frame, title, title_rect);
            if let Some(info) = info.as_deref_mut() {
                info.entities_mut().add(
                    ChartEntity::new(EntityShape::Rect(title_rect), EntityOwner::Title { index })
                        .with_tooltip(title.text.clone()),
                );
            }
        }

        let data_area = remaining.clamped_non_negative();
        {
            let mut scratch = PlotRenderingInfo::default();
            let (entities, node) = match info.as_deref_mut() {
                Some(info) => {
                    let (entities, node) = info.split_mut();
                    (Some(entities), node)
                }
                None => (None, &mut scratch),
            };
            let mut ctx = PlotDrawContext {
                entities,
                info: node,
                anchor,
            };
            self.plot.draw(frame, data_area, &mut ctx);
        }

        // Recorded last: lookups are first-match-wins, so the whole-chart
        // entity must not shadow titles or series items.
        if let Some(info) = info {
            info.entities_mut().add(
                ChartEntity::new(EntityShape::Rect(chart_area), EntityOwner::Chart)
                    .with_tooltip("chart"),
            );
        }
    }

    /// Consumes a band along the title's edge and returns the drawn rect.
    ///
    /// Edge allocation follows list order: a left title allocated before a
    /// bottom title narrows the bottom title's available width.
    fn allocate_title(measurer: &dyn TextMeasurer, title: &Title, remaining: &mut Rect) -> Rect {
        let size = title.arrange(measurer, remaining.width, remaining.height);
        let rect = match title.edge {
            crate::core::RectEdge::Top => {
                let rect = Rect::new(
                    remaining.x + (remaining.width - size.width) / 2.0,
                    remaining.y,
                    size.width,
                    size.height,
                );
                remaining.y += size.height;
                remaining.height -= size.height;
                rect
            }
            crate::core::RectEdge::Bottom => {
                let rect = Rect::new(
                    remaining.x + (remaining.width - size.width) / 2.0,
                    remaining.max_y() - size.height,
                    size.width,
                    size.height,
                );
                remaining.height -= size.height;
                rect
            }
            crate::core::RectEdge::Left => {
                let rect = Rect::new(
                    remaining.x,
                    remaining.y + (remaining.height - size.height) / 2.0,
                    size.width,
                    size.height,
                );
                remaining.x += size.width;
                remaining.width -= size.width;
                rect
            }
            crate::core::RectEdge::Right => {
                let rect = Rect::new(
                    remaining.max_x() - size.width,
                    remaining.y + (remaining.height - size.height) / 2.0,
                    size.width,
                    size.height,
                );
                remaining.width -= size.width;
                rect
            }
        };
        *remaining = remaining.clamped_non_negative();
        rect
    }

    fn emit_title(frame: &mut RenderFrame, title: &Title, rect: Rect) {
        if title.text.is_empty() || title.font_size <= 0.0 {
            return;
        }
        let center = rect.center();
        let primitive = match title.edge {
            crate::core::RectEdge::Top | crate::core::RectEdge::Bottom => TextPrimitive::new(
                title.text.clone(),
                center.x,
                rect.max_y() - title.padding.bottom,
                title.font_size,
                Color::rgb(0.0, 0.0, 0.0),
                TextHAlign::Center,
            ),
            crate::core::RectEdge::Left => TextPrimitive::new(
                title.text.clone(),
                center.x,
                center.y,
                title.font_size,
                Color::rgb(0.0, 0.0, 0.0),
                TextHAlign::Center,
            )
            .with_rotation_deg(-90.0),
            crate::core::RectEdge::Right => TextPrimitive::new(
                title.text.clone(),
                center.x,
                center.y,
                title.font_size,
                Color::rgb(0.0, 0.0, 0.0),
                TextHAlign::Center,
            )
            .with_rotation_deg(90.0),
        };
        frame.push_text(primitive);
    }
}

#[cfg(test)]
mod tests {
    use super::{Chart, Title};
    use crate::core::{Insets, Rect, RectEdge, RenderingInfo, Size};
    use crate::plot::{NullPlot, PlotCapabilities};
    use crate::render::RenderFrame;

    fn draw_chart(chart: &mut Chart<NullPlot>, area: Rect) -> RenderingInfo {
        let mut frame = RenderFrame::new(Size::new(area.width, area.height));
        let mut info = RenderingInfo::new();
        chart.draw(&mut frame, area, None, Some(&mut info));
        info
    }

    #[test]
    fn titles_shrink_remaining_area_in_list_order() {
        let mut chart = Chart::new(NullPlot::new(PlotCapabilities::none()))
            .with_title(Title::new("main").with_edge(RectEdge::Left))
            .with_subtitle(Title::new("sub").with_edge(RectEdge::Bottom));

        let info = draw_chart(&mut chart, Rect::new(0.0, 0.0, 400.0, 300.0));
        let data_area = info.plot_info().data_area();

        let left_rect = match &info.entities().get(0).expect("left title entity").shape {
            crate::core::EntityShape::Rect(rect) => *rect,
            other => panic!("unexpected shape {other:?}"),
        };
        let bottom_rect = match &info.entities().get(1).expect("bottom title entity").shape {
            crate::core::EntityShape::Rect(rect) => *rect,
            other => panic!("unexpected shape {other:?}"),
        };

        // The left title consumed width first, narrowing the bottom title.
        assert!(bottom_rect.x >= left_rect.max_x());
        assert_eq!(data_area.x, left_rect.max_x());
        assert_eq!(data_area.max_y(), bottom_rect.y);
    }

    #[test]
    fn hidden_titles_consume_nothing() {
        let mut chart = Chart::new(NullPlot::new(PlotCapabilities::none()))
            .with_title(Title::new("main").with_visible(false));
        let info = draw_chart(&mut chart, Rect::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(info.plot_info().data_area(), Rect::new(0.0, 0.0, 400.0, 300.0));
    }

    #[test]
    fn degenerate_residual_is_tolerated() {
        let mut chart = Chart::new(NullPlot::new(PlotCapabilities::none()))
            .with_padding(Insets::uniform(300.0))
            .with_title(Title::new("main"));
        let info = draw_chart(&mut chart, Rect::new(0.0, 0.0, 400.0, 300.0));
        let data_area = info.plot_info().data_area();
        assert_eq!(data_area.width, 0.0);
        assert_eq!(data_area.height, 0.0);
    }

    #[test]
    fn notify_batching_coalesces_changes() {
        let mut chart = Chart::new(NullPlot::default());
        chart.set_notify(false);
        chart.set_padding(Insets::uniform(4.0));
        chart.set_title(Some(Title::new("t")));
        assert!(!chart.is_change_pending());

        chart.set_notify(true);
        assert!(chart.take_change());
        assert!(!chart.take_change());
    }
}
