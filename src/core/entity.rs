//! Hit-testable records of what was drawn where.
//!
//! Every interactive element placed by a draw pass registers a
//! [`ChartEntity`] describing its screen region, the domain object it stands
//! for, and optional tooltip/url payloads. Lookups scan in insertion order,
//! so hit-testing is deterministic regardless of paint order.

use serde::{Deserialize, Serialize};

use crate::core::geometry::{Point, Rect};

/// Geometric region covered by an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityShape {
    Rect(Rect),
    Ellipse(Rect),
    Polygon(Vec<Point>),
}

impl EntityShape {
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Self::Rect(rect) => rect.contains(point),
            Self::Ellipse(bounds) => {
                if bounds.is_degenerate() {
                    return false;
                }
                let center = bounds.center();
                let nx = (point.x - center.x) / (bounds.width / 2.0);
                let ny = (point.y - center.y) / (bounds.height / 2.0);
                nx * nx + ny * ny <= 1.0
            }
            Self::Polygon(vertices) => polygon_contains(vertices, point),
        }
    }
}

// Even-odd ray cast; open polygons are treated as implicitly closed.
fn polygon_contains(vertices: &[Point], point: Point) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[j];
        if (a.y > point.y) != (b.y > point.y) {
            let slope_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < slope_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Domain object an entity stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityOwner {
    Chart,
    Title { index: usize },
    SeriesItem { series: usize, item: usize },
    LegendItem { series: usize },
    Plot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEntity {
    pub shape: EntityShape,
    pub owner: EntityOwner,
    pub tooltip: Option<String>,
    pub url: Option<String>,
}

impl ChartEntity {
    #[must_use]
    pub fn new(shape: EntityShape, owner: EntityOwner) -> Self {
        Self {
            shape,
            owner,
            tooltip: None,
            url: None,
        }
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Insertion-ordered entity store for one draw pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityCollection {
    entities: Vec<ChartEntity>,
}

impl EntityCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: ChartEntity) {
        self.entities.push(entity);
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ChartEntity> {
        self.entities.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartEntity> {
        self.entities.iter()
    }

    /// Returns the first entity whose shape contains the point.
    ///
    /// Collection order is the tie-break; a point outside every shape yields
    /// `None`.
    #[must_use]
    pub fn entity_at(&self, point: Point) -> Option<&ChartEntity> {
        self.entities
            .iter()
            .find(|entity| entity.shape.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartEntity, EntityCollection, EntityOwner, EntityShape};
    use crate::core::geometry::{Point, Rect};

    fn rect_entity(x: f64, width: f64, owner: EntityOwner) -> ChartEntity {
        ChartEntity::new(EntityShape::Rect(Rect::new(x, 0.0, width, 10.0)), owner)
    }

    #[test]
    fn first_matching_entity_wins_on_overlap() {
        let mut collection = EntityCollection::new();
        collection.add(rect_entity(0.0, 20.0, EntityOwner::Chart));
        collection.add(rect_entity(10.0, 20.0, EntityOwner::Plot));

        let hit = collection
            .entity_at(Point::new(15.0, 5.0))
            .expect("overlap hit");
        assert_eq!(hit.owner, EntityOwner::Chart);
    }

    #[test]
    fn miss_returns_none() {
        let mut collection = EntityCollection::new();
        collection.add(rect_entity(0.0, 20.0, EntityOwner::Chart));
        assert!(collection.entity_at(Point::new(100.0, 5.0)).is_none());
    }

    #[test]
    fn ellipse_containment_uses_inscribed_shape() {
        let shape = EntityShape::Ellipse(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(shape.contains(Point::new(5.0, 5.0)));
        // Corner of the bounds, outside the inscribed ellipse.
        assert!(!shape.contains(Point::new(0.5, 0.5)));
    }

    #[test]
    fn polygon_containment_even_odd() {
        let shape = EntityShape::Polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ]);
        assert!(shape.contains(Point::new(5.0, 4.0)));
        assert!(!shape.contains(Point::new(0.5, 9.0)));
    }

    #[test]
    fn degenerate_polygon_never_matches() {
        let shape = EntityShape::Polygon(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        assert!(!shape.contains(Point::new(5.0, 0.0)));
    }
}
