//! Object graph received from the model exchange service
//!
//! Only the fields the importer reads are modelled. Every field is optional
//! or defaulted so that a single odd element does not fail deserialization
//! of the whole commit; the geometry extractor reports what is missing.

mod categories;

pub use categories::{collect_levels, ModelCategories};

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::ImportResult;

/// Type discriminator of straight outline segments
pub const LINE_TYPE: &str = "Objects.Geometry.Line";

/// A 3D point in model units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<Point> for Point3<f64> {
    fn from(p: Point) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}

/// A level referenced by an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelRef {
    pub name: String,
    #[serde(default)]
    pub elevation: f64,
}

impl LevelRef {
    pub fn new(name: &str, elevation: f64) -> Self {
        Self {
            name: name.to_string(),
            elevation,
        }
    }
}

/// Kind of an outline segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Line,
    Arc,
}

/// One segment of a polycurve outline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub speckle_type: String,
    /// Start of a line
    #[serde(default)]
    pub start: Option<Point>,
    /// End of a line
    #[serde(default)]
    pub end: Option<Point>,
    /// Start of an arc
    #[serde(default, rename = "startPoint")]
    pub start_point: Option<Point>,
    /// End of an arc
    #[serde(default, rename = "endPoint")]
    pub end_point: Option<Point>,
}

impl Segment {
    /// Create a line segment
    pub fn line(start: Point, end: Point) -> Self {
        Self {
            speckle_type: LINE_TYPE.to_string(),
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    /// Create an arc segment (only its end points are kept)
    pub fn arc(start: Point, end: Point) -> Self {
        Self {
            speckle_type: "Objects.Geometry.Arc".to_string(),
            start_point: Some(start),
            end_point: Some(end),
            ..Default::default()
        }
    }

    /// Anything that is not a line is treated as an arc
    pub fn kind(&self) -> SegmentKind {
        if self.speckle_type == LINE_TYPE {
            SegmentKind::Line
        } else {
            SegmentKind::Arc
        }
    }
}

/// Closed boundary of a planar element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// Location line of a wall or column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    #[serde(default)]
    pub start: Option<Point>,
    #[serde(default)]
    pub end: Option<Point>,
}

impl Baseline {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }
}

/// A floor, wall or column as received
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BimElement {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub speckle_type: String,
    #[serde(default)]
    pub level: Option<LevelRef>,
    #[serde(default, rename = "topLevel")]
    pub top_level: Option<LevelRef>,
    #[serde(default, rename = "baseLine")]
    pub base_line: Option<Baseline>,
    #[serde(default)]
    pub outline: Option<Outline>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl BimElement {
    /// Create an element with the given type discriminator
    pub fn new(speckle_type: &str) -> Self {
        Self {
            speckle_type: speckle_type.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_level(mut self, name: &str, elevation: f64) -> Self {
        self.level = Some(LevelRef::new(name, elevation));
        self
    }

    pub fn with_top_level(mut self, name: &str, elevation: f64) -> Self {
        self.top_level = Some(LevelRef::new(name, elevation));
        self
    }

    pub fn with_base_line(mut self, start: Point, end: Point) -> Self {
        self.base_line = Some(Baseline::new(start, end));
        self
    }

    pub fn with_outline(mut self, segments: Vec<Segment>) -> Self {
        self.outline = Some(Outline { segments });
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }
}

/// A named group of elements (e.g. "Walls")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "@elements")]
    pub elements: Vec<BimElement>,
}

impl Category {
    pub fn new(name: &str, elements: Vec<BimElement>) -> Self {
        Self {
            name: name.to_string(),
            elements,
        }
    }
}

/// Root object of a received commit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectGraph {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "@elements")]
    pub elements: Vec<Category>,
}

impl ObjectGraph {
    /// Create a graph from categories
    pub fn new(elements: Vec<Category>) -> Self {
        Self { id: None, elements }
    }

    /// Parse a graph from JSON text
    pub fn from_json_str(text: &str) -> ImportResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Find a category by name
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.elements.iter().find(|c| c.name == name)
    }
}
