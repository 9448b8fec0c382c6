//! Area objects: floor slabs and wall panels

use serde::{Deserialize, Serialize};

use crate::bim::Point;
use crate::geometry::{FloorGeometry, VerticalGeometry};
use crate::range::StorySpan;

/// An area object defined by its corner coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaElement {
    /// Requested name (empty lets the sink choose)
    pub name: String,
    /// Section label
    pub section: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub zs: Vec<f64>,
}

impl AreaElement {
    /// Create an area object from its vertices
    pub fn from_vertices(name: &str, section: &str, vertices: &[Point]) -> Self {
        Self {
            name: name.to_string(),
            section: section.to_string(),
            xs: vertices.iter().map(|p| p.x).collect(),
            ys: vertices.iter().map(|p| p.y).collect(),
            zs: vertices.iter().map(|p| p.z).collect(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.xs.len()
    }

    pub fn vertices(&self) -> Vec<Point> {
        self.xs
            .iter()
            .zip(&self.ys)
            .zip(&self.zs)
            .map(|((&x, &y), &z)| Point::new(x, y, z))
            .collect()
    }
}

/// Slab from a floor outline.
///
/// One vertex per outline segment; the polygon closes from the last vertex
/// back to the first.
pub fn build_floor(name: &str, section: &str, floor: &FloorGeometry) -> AreaElement {
    AreaElement::from_vertices(name, section, &floor.vertices)
}

/// One vertical panel per spanned story, baseline extruded from the story's
/// elevation to the next one.
pub fn build_walls(
    section: &str,
    wall: &VerticalGeometry,
    spans: &[StorySpan],
) -> Vec<AreaElement> {
    let (s, e) = (&wall.start, &wall.end);
    spans
        .iter()
        .map(|span| {
            AreaElement::from_vertices(
                "",
                section,
                &[
                    Point::new(s.x, s.y, span.bottom),
                    Point::new(s.x, s.y, span.top),
                    Point::new(e.x, e.y, span.top),
                    Point::new(e.x, e.y, span.bottom),
                ],
            )
        })
        .collect()
}
