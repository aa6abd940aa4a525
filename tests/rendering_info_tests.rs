use chartview::api::{ChartView, ChartViewConfig};
use chartview::chart::{Chart, Title};
use chartview::core::{EntityOwner, Point};
use chartview::plot::NullPlot;
use chartview::render::NullRenderer;

fn build_view(plot: NullPlot) -> ChartView<NullRenderer, NullPlot> {
    let chart = Chart::new(plot);
    let mut view = ChartView::new(NullRenderer::default(), chart, ChartViewConfig::default())
        .expect("view init");
    view.set_available_size(680.0, 420.0);
    view.paint().expect("initial paint");
    view
}

#[test]
fn entity_lookup_is_deterministic_and_misses_cleanly() {
    let view = build_view(NullPlot::default());

    let inside = Point::new(340.0, 210.0);
    let first = view.entity_at(inside).expect("hit").owner;
    for _ in 0..5 {
        assert_eq!(view.entity_at(inside).expect("hit").owner, first);
    }
    assert_eq!(first, EntityOwner::Chart);

    assert!(view.entity_at(Point::new(10_000.0, 210.0)).is_none());
    assert!(view.entity_at(Point::new(340.0, -5.0)).is_none());
}

#[test]
fn queries_before_first_paint_degrade_to_none() {
    let chart = Chart::new(NullPlot::default());
    let view = ChartView::new(NullRenderer::default(), chart, ChartViewConfig::default())
        .expect("view init");
    assert!(view.entity_at(Point::new(10.0, 10.0)).is_none());
    assert!(view.tooltip_at(Point::new(10.0, 10.0)).is_none());
    assert!(view.subplot_index_at(Point::new(10.0, 10.0)).is_none());
}

#[test]
fn stacked_subplots_resolve_by_containment() {
    let view = build_view(NullPlot::default().with_subplots([1.0, 1.0], 10.0));

    // 420 logical height minus the 10-unit gap splits into 205-unit bands.
    assert_eq!(view.subplot_index_at(Point::new(50.0, 100.0)), Some(0));
    assert_eq!(view.subplot_index_at(Point::new(50.0, 300.0)), Some(1));
    // The gap between bands belongs to no subplot.
    assert_eq!(view.subplot_index_at(Point::new(50.0, 210.0)), None);
    // Outside the data area entirely.
    assert_eq!(view.subplot_index_at(Point::new(50.0, 1_000.0)), None);
}

#[test]
fn subplot_lookup_accounts_for_viewport_scaling() {
    let mut view = build_view(NullPlot::default().with_subplots([1.0, 1.0], 10.0));
    view.set_available_size(150.0, 100.0);
    view.paint().expect("paint after resize");

    // Logical layout is 300x200: bands at y 0..95 and 105..200.
    assert_eq!(view.current_scale(), (0.5, 0.5));
    assert_eq!(view.subplot_index_at(Point::new(75.0, 25.0)), Some(0));
    assert_eq!(view.subplot_index_at(Point::new(75.0, 75.0)), Some(1));
    assert_eq!(view.subplot_index_at(Point::new(75.0, 50.0)), None);
}

#[test]
fn snapshot_is_rebuilt_in_full_on_every_draw() {
    let mut view = build_view(NullPlot::default());
    assert_eq!(view.rendering_info().entities().len(), 1);

    view.chart_mut().set_title(Some(Title::new("Sales")));
    view.paint().expect("paint with title");
    assert_eq!(view.rendering_info().entities().len(), 2);

    view.chart_mut().set_title(None);
    view.paint().expect("paint without title");
    assert_eq!(view.rendering_info().entities().len(), 1);
}

#[test]
fn title_tooltip_wins_over_chart_entity() {
    let mut view = build_view(NullPlot::default());
    view.chart_mut().set_title(Some(Title::new("Sales")));
    view.paint().expect("paint with title");

    // The title band sits at the top center of the chart.
    assert_eq!(view.tooltip_at(Point::new(340.0, 10.0)), Some("Sales"));
    assert_eq!(view.tooltip_at(Point::new(340.0, 210.0)), Some("chart"));
}
