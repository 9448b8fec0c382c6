//! Frame objects: column pieces

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::bim::Point;
use crate::geometry::VerticalGeometry;
use crate::range::StorySpan;

/// A frame object between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameElement {
    pub start: Point,
    pub end: Point,
}

impl FrameElement {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        let (start, end): (Point3<f64>, Point3<f64>) = (self.start.into(), self.end.into());
        nalgebra::distance(&start, &end)
    }
}

/// One frame per spanned story. Plan position comes from the baseline ends,
/// only z changes from story to story.
pub fn build_columns(column: &VerticalGeometry, spans: &[StorySpan]) -> Vec<FrameElement> {
    spans
        .iter()
        .map(|span| {
            FrameElement::new(
                Point::new(column.start.x, column.start.y, span.bottom),
                Point::new(column.end.x, column.end.y, span.top),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_column_pieces() {
        let column = VerticalGeometry {
            start: Point::new(1000.0, 2000.0, 0.0),
            end: Point::new(1000.0, 2000.0, 7000.0),
            base_level: "L1".into(),
            top_level: "L3".into(),
        };
        let spans = vec![
            StorySpan { story: "L1".into(), bottom: 0.0, top: 3500.0 },
            StorySpan { story: "L2".into(), bottom: 3500.0, top: 7000.0 },
        ];
        let frames = build_columns(&column, &spans);

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].start, Point::new(1000.0, 2000.0, 0.0));
        assert_eq!(frames[0].end, Point::new(1000.0, 2000.0, 3500.0));
        assert_eq!(frames[1].start.z, frames[0].end.z);
        assert_relative_eq!(frames[1].length(), 3500.0);
    }
}
