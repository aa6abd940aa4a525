//! Geometry snapshot produced by one layout pass.
//!
//! A draw pass records where the chart area, data areas, and entities ended
//! up so later pointer handling can be geometry-driven instead of
//! re-deriving layout. The snapshot is rebuilt in full on every draw:
//! `clear` first, then repopulate, so stale geometry is never consulted.

use crate::core::entity::{ChartEntity, EntityCollection};
use crate::core::geometry::{Point, Rect};

/// Per-plot node of the rendering-info tree.
///
/// Combined/overlaid plots push one child node per subplot; the tree is
/// owned strictly top-down and rebuilt per draw, so no back-references are
/// needed for lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotRenderingInfo {
    data_area: Rect,
    subplots: Vec<PlotRenderingInfo>,
}

impl PlotRenderingInfo {
    #[must_use]
    pub fn new(data_area: Rect) -> Self {
        Self {
            data_area,
            subplots: Vec::new(),
        }
    }

    #[must_use]
    pub fn data_area(&self) -> Rect {
        self.data_area
    }

    pub fn set_data_area(&mut self, data_area: Rect) {
        self.data_area = data_area;
    }

    pub fn push_subplot(&mut self, info: PlotRenderingInfo) {
        self.subplots.push(info);
    }

    #[must_use]
    pub fn subplots(&self) -> &[PlotRenderingInfo] {
        &self.subplots
    }

    #[must_use]
    pub fn subplot_count(&self) -> usize {
        self.subplots.len()
    }

    /// Index of the direct subplot whose data area contains the point.
    ///
    /// A point in the gap between subplots, or outside all of them, yields
    /// `None`; callers fall back to this node's own data area.
    #[must_use]
    pub fn subplot_index_at(&self, point: Point) -> Option<usize> {
        self.subplots
            .iter()
            .position(|subplot| subplot.data_area.contains(point))
    }

    /// Deepest node in the tree whose data area contains the point.
    ///
    /// Resolves which subplot owns a pointer coordinate in nested
    /// combined/overlaid arrangements; falls back to `self`.
    #[must_use]
    pub fn subplot_info_at(&self, point: Point) -> &PlotRenderingInfo {
        match self.subplot_index_at(point) {
            Some(index) => self.subplots[index].subplot_info_at(point),
            None => self,
        }
    }
}

/// Geometry record for one full chart draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderingInfo {
    chart_area: Rect,
    entities: EntityCollection,
    plot_info: PlotRenderingInfo,
}

impl RenderingInfo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the record for a fresh draw pass.
    ///
    /// Must run before any title or plot drawing so the snapshot is never
    /// partially populated.
    pub fn clear(&mut self, chart_area: Rect) {
        self.chart_area = chart_area;
        self.entities.clear();
        self.plot_info = PlotRenderingInfo::default();
    }

    #[must_use]
    pub fn chart_area(&self) -> Rect {
        self.chart_area
    }

    #[must_use]
    pub fn entities(&self) -> &EntityCollection {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityCollection {
        &mut self.entities
    }

    #[must_use]
    pub fn plot_info(&self) -> &PlotRenderingInfo {
        &self.plot_info
    }

    pub fn plot_info_mut(&mut self) -> &mut PlotRenderingInfo {
        &mut self.plot_info
    }

    /// Splits mutable borrows for a plot draw that records entities and
    /// geometry at the same time.
    pub fn split_mut(&mut self) -> (&mut EntityCollection, &mut PlotRenderingInfo) {
        (&mut self.entities, &mut self.plot_info)
    }

    #[must_use]
    pub fn entity_at(&self, point: Point) -> Option<&ChartEntity> {
        self.entities.entity_at(point)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlotRenderingInfo, RenderingInfo};
    use crate::core::entity::{ChartEntity, EntityOwner, EntityShape};
    use crate::core::geometry::{Point, Rect};

    #[test]
    fn clear_resets_all_sections() {
        let mut info = RenderingInfo::new();
        info.entities_mut().add(ChartEntity::new(
            EntityShape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0)),
            EntityOwner::Chart,
        ));
        info.plot_info_mut()
            .push_subplot(PlotRenderingInfo::new(Rect::new(0.0, 0.0, 5.0, 5.0)));

        info.clear(Rect::new(0.0, 0.0, 100.0, 50.0));

        assert_eq!(info.chart_area(), Rect::new(0.0, 0.0, 100.0, 50.0));
        assert!(info.entities().is_empty());
        assert_eq!(info.plot_info().subplot_count(), 0);
        assert_eq!(info.plot_info().data_area(), Rect::default());
    }

    #[test]
    fn subplot_index_resolves_stacked_bands_and_gaps() {
        let mut root = PlotRenderingInfo::new(Rect::new(0.0, 0.0, 100.0, 210.0));
        root.push_subplot(PlotRenderingInfo::new(Rect::new(0.0, 0.0, 100.0, 100.0)));
        root.push_subplot(PlotRenderingInfo::new(Rect::new(0.0, 110.0, 100.0, 100.0)));

        assert_eq!(root.subplot_index_at(Point::new(50.0, 40.0)), Some(0));
        assert_eq!(root.subplot_index_at(Point::new(50.0, 150.0)), Some(1));
        assert_eq!(root.subplot_index_at(Point::new(50.0, 105.0)), None);
    }

    #[test]
    fn subplot_info_at_descends_nested_nodes() {
        let mut inner = PlotRenderingInfo::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        inner.push_subplot(PlotRenderingInfo::new(Rect::new(0.0, 0.0, 50.0, 100.0)));
        let mut root = PlotRenderingInfo::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        root.push_subplot(inner);

        let node = root.subplot_info_at(Point::new(25.0, 50.0));
        assert_eq!(node.data_area(), Rect::new(0.0, 0.0, 50.0, 100.0));

        // A gap point resolves to the root itself.
        let node = root.subplot_info_at(Point::new(150.0, 50.0));
        assert_eq!(node.data_area(), root.data_area());
    }
}
