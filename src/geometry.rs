//! Geometry extraction from received elements
//!
//! Coordinates are rounded to whole model units on read. Ties go to the even
//! neighbour.

use crate::bim::{BimElement, LevelRef, Point, Segment, SegmentKind};
use crate::error::{ImportError, ImportResult};

/// Round a coordinate to the nearest whole unit
pub fn round_unit(value: f64) -> f64 {
    value.round_ties_even()
}

/// Round x and y of a point; z is left as received
pub fn round_plan(point: &Point) -> Point {
    Point::new(round_unit(point.x), round_unit(point.y), point.z)
}

/// Start point of an outline segment (`start` for lines, `startPoint` otherwise)
pub fn segment_start(segment: &Segment) -> Option<Point> {
    match segment.kind() {
        SegmentKind::Line => segment.start,
        SegmentKind::Arc => segment.start_point,
    }
}

/// Planar outline of a floor
#[derive(Debug, Clone, PartialEq)]
pub struct FloorGeometry {
    /// One vertex per outline segment, in outline order
    pub vertices: Vec<Point>,
    /// Rounded elevation of the floor's level
    pub elevation: f64,
}

/// Plan location and level span of a wall or column
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalGeometry {
    /// Rounded plan position of the baseline start
    pub start: Point,
    /// Rounded plan position of the baseline end
    pub end: Point,
    pub base_level: String,
    pub top_level: String,
}

/// Extract a floor's outline vertices at its level elevation
pub fn floor_geometry(label: &str, floor: &BimElement) -> ImportResult<FloorGeometry> {
    let level = floor
        .level
        .as_ref()
        .ok_or_else(|| ImportError::malformed(label, "floor has no level"))?;
    let outline = floor
        .outline
        .as_ref()
        .ok_or_else(|| ImportError::malformed(label, "floor has no outline"))?;

    if outline.segments.is_empty() {
        return Err(ImportError::malformed(label, "outline has no segments"));
    }

    let elevation = round_unit(level.elevation);
    let vertices = outline
        .segments
        .iter()
        .enumerate()
        .map(|(seg_idx, segment)| -> ImportResult<Point> {
            let start = segment_start(segment).ok_or_else(|| {
                ImportError::malformed(
                    label,
                    format!("segment {seg_idx} has neither a line start nor an arc start point"),
                )
            })?;
            Ok(Point::new(round_unit(start.x), round_unit(start.y), elevation))
        })
        .collect::<ImportResult<Vec<_>>>()?;

    Ok(FloorGeometry { vertices, elevation })
}

/// Extract the rounded baseline and level names of a wall or column
pub fn vertical_geometry(label: &str, element: &BimElement) -> ImportResult<VerticalGeometry> {
    let (base, top) = level_pair(label, element)?;
    let base_line = element
        .base_line
        .as_ref()
        .ok_or_else(|| ImportError::malformed(label, "element has no baseline"))?;
    let start = base_line
        .start
        .ok_or_else(|| ImportError::malformed(label, "baseline has no start point"))?;
    let end = base_line
        .end
        .ok_or_else(|| ImportError::malformed(label, "baseline has no end point"))?;

    Ok(VerticalGeometry {
        start: round_plan(&start),
        end: round_plan(&end),
        base_level: base.name.clone(),
        top_level: top.name.clone(),
    })
}

fn level_pair<'a>(
    label: &str,
    element: &'a BimElement,
) -> ImportResult<(&'a LevelRef, &'a LevelRef)> {
    match (&element.level, &element.top_level) {
        (Some(base), Some(top)) => Ok((base, top)),
        (None, _) => Err(ImportError::malformed(label, "element has no base level")),
        (_, None) => Err(ImportError::malformed(label, "element has no top level")),
    }
}
