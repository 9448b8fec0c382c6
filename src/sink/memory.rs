//! In-memory structural model implementing the sink calls

use log::debug;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::{ModelSink, SUCCESS};

/// Reasons the in-memory model refuses a call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Area section '{0}' not found in model")]
    SectionNotFound(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

impl ModelError {
    /// Return code reported through the sink interface
    pub fn code(&self) -> i32 {
        match self {
            ModelError::InvalidInput(_) => 1,
            ModelError::DuplicateName(_) => 2,
            ModelError::SectionNotFound(_) => 3,
            ModelError::InvalidGeometry(_) => 4,
        }
    }
}

/// Kind of an area section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaSectionKind {
    Slab,
    Wall,
}

/// A named area property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaSection {
    pub kind: AreaSectionKind,
    pub thickness: f64,
}

impl AreaSection {
    pub fn slab(thickness: f64) -> Self {
        Self {
            kind: AreaSectionKind::Slab,
            thickness,
        }
    }

    pub fn wall(thickness: f64) -> Self {
        Self {
            kind: AreaSectionKind::Wall,
            thickness,
        }
    }
}

/// A story above the model base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryDefinition {
    pub name: String,
    pub height: f64,
    /// Elevation of the story's top, accumulated from the base
    pub elevation: f64,
    pub is_master: bool,
    pub similar_to: String,
    pub splice_above: bool,
    pub splice_height: f64,
}

/// An area object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaObject {
    pub section: String,
    pub points: Vec<[f64; 3]>,
}

/// A frame object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameObject {
    pub i: [f64; 3],
    pub j: [f64; 3],
}

impl FrameObject {
    pub fn length(&self) -> f64 {
        nalgebra::distance(&Point3::from(self.i), &Point3::from(self.j))
    }
}

/// A structural model holding stories, area objects and frame objects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuralModel {
    /// Elevation of the model base
    pub base_elevation: f64,
    /// Stories above the base, bottom up
    pub stories: Vec<StoryDefinition>,
    /// Area properties
    pub area_sections: HashMap<String, AreaSection>,
    /// Area objects (slabs, walls)
    pub areas: HashMap<String, AreaObject>,
    /// Frame objects (columns)
    pub frames: HashMap<String, FrameObject>,

    #[serde(skip)]
    next_area: usize,
    #[serde(skip)]
    next_frame: usize,
}

impl StructuralModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an area section to the model
    pub fn add_area_section(&mut self, name: &str, section: AreaSection) -> Result<(), ModelError> {
        if self.area_sections.contains_key(name) {
            return Err(ModelError::DuplicateName(name.to_string()));
        }
        self.area_sections.insert(name.to_string(), section);
        Ok(())
    }

    /// Replace the story table
    #[allow(clippy::too_many_arguments)]
    pub fn set_stories(
        &mut self,
        base_elevation: f64,
        count: usize,
        names: &[String],
        heights: &[f64],
        is_master: &[bool],
        similar_to: &[String],
        splice_above: &[bool],
        splice_height: &[f64],
    ) -> Result<(), ModelError> {
        let lengths = [
            names.len(),
            heights.len(),
            is_master.len(),
            similar_to.len(),
            splice_above.len(),
            splice_height.len(),
        ];
        if lengths.iter().any(|&len| len != count) {
            return Err(ModelError::InvalidInput(format!(
                "story arrays {lengths:?} do not match count {count}"
            )));
        }
        for (idx, name) in names.iter().enumerate() {
            if names[..idx].contains(name) {
                return Err(ModelError::DuplicateName(name.clone()));
            }
        }
        if let Some(pos) = heights.iter().position(|&h| h <= 0.0) {
            return Err(ModelError::InvalidGeometry(format!(
                "story '{}' has non-positive height {}",
                names[pos], heights[pos]
            )));
        }

        let mut elevation = base_elevation;
        self.stories = (0..count)
            .map(|idx| {
                elevation += heights[idx];
                StoryDefinition {
                    name: names[idx].clone(),
                    height: heights[idx],
                    elevation,
                    is_master: is_master[idx],
                    similar_to: similar_to[idx].clone(),
                    splice_above: splice_above[idx],
                    splice_height: splice_height[idx],
                }
            })
            .collect();
        self.base_elevation = base_elevation;
        Ok(())
    }

    /// Add an area object; an empty name gets the next free `A<n>`.
    /// Returns the name used.
    pub fn add_area(
        &mut self,
        name: &str,
        section: &str,
        points: Vec<[f64; 3]>,
    ) -> Result<String, ModelError> {
        if !self.area_sections.contains_key(section) {
            return Err(ModelError::SectionNotFound(section.to_string()));
        }
        if points.len() < 3 {
            return Err(ModelError::InvalidGeometry(format!(
                "area needs at least 3 points, got {}",
                points.len()
            )));
        }
        if polygon_area(&points) < 1e-10 {
            return Err(ModelError::InvalidGeometry("area has zero extent".to_string()));
        }

        let name = if name.trim().is_empty() {
            self.next_area_name()
        } else if self.areas.contains_key(name) {
            return Err(ModelError::DuplicateName(name.to_string()));
        } else {
            name.to_string()
        };

        self.areas.insert(
            name.clone(),
            AreaObject {
                section: section.to_string(),
                points,
            },
        );
        Ok(name)
    }

    /// Add a frame object under the next free `F<n>`. Returns the name used.
    pub fn add_frame(&mut self, i: [f64; 3], j: [f64; 3]) -> Result<String, ModelError> {
        let frame = FrameObject { i, j };
        if frame.length() < 1e-10 {
            return Err(ModelError::InvalidGeometry(format!(
                "frame has zero length at {i:?}"
            )));
        }
        let name = self.next_frame_name();
        self.frames.insert(name.clone(), frame);
        Ok(name)
    }

    /// Story by name
    pub fn story(&self, name: &str) -> Option<&StoryDefinition> {
        self.stories.iter().find(|s| s.name == name)
    }

    /// Areas using a section, sorted by name
    pub fn areas_with_section(&self, section: &str) -> Vec<(&String, &AreaObject)> {
        let mut areas: Vec<_> = self
            .areas
            .iter()
            .filter(|(_, area)| area.section == section)
            .collect();
        areas.sort_by(|a, b| a.0.cmp(b.0));
        areas
    }

    fn next_area_name(&mut self) -> String {
        loop {
            self.next_area += 1;
            let name = format!("A{}", self.next_area);
            if !self.areas.contains_key(&name) {
                return name;
            }
        }
    }

    fn next_frame_name(&mut self) -> String {
        loop {
            self.next_frame += 1;
            let name = format!("F{}", self.next_frame);
            if !self.frames.contains_key(&name) {
                return name;
            }
        }
    }
}

/// Area of a planar polygon (Newell's method)
fn polygon_area(points: &[[f64; 3]]) -> f64 {
    let n = points.len();
    let normal: Vector3<f64> = (0..n)
        .map(|idx| {
            let a = Vector3::from(points[idx]);
            let b = Vector3::from(points[(idx + 1) % n]);
            a.cross(&b)
        })
        .sum();
    normal.norm() / 2.0
}

fn to_code(result: Result<(), ModelError>) -> i32 {
    match result {
        Ok(()) => SUCCESS,
        Err(err) => {
            debug!("model rejected call: {}", err);
            err.code()
        }
    }
}

impl ModelSink for StructuralModel {
    fn define_stories(
        &mut self,
        base_elevation: f64,
        count: usize,
        names: &[String],
        heights: &[f64],
        is_master: &[bool],
        similar_to: &[String],
        splice_above: &[bool],
        splice_height: &[f64],
    ) -> i32 {
        to_code(self.set_stories(
            base_elevation,
            count,
            names,
            heights,
            is_master,
            similar_to,
            splice_above,
            splice_height,
        ))
    }

    fn add_area_by_coordinates(
        &mut self,
        vertex_count: usize,
        xs: &[f64],
        ys: &[f64],
        zs: &[f64],
        name: &str,
        section: &str,
    ) -> i32 {
        if xs.len() != vertex_count || ys.len() != vertex_count || zs.len() != vertex_count {
            return to_code(Err(ModelError::InvalidInput(format!(
                "expected {vertex_count} coordinates per axis"
            ))));
        }
        let points = (0..vertex_count).map(|idx| [xs[idx], ys[idx], zs[idx]]).collect();
        to_code(self.add_area(name, section, points).map(|_| ()))
    }

    fn add_frame_by_coordinates(
        &mut self,
        x1: f64,
        y1: f64,
        z1: f64,
        x2: f64,
        y2: f64,
        z2: f64,
    ) -> i32 {
        to_code(self.add_frame([x1, y1, z1], [x2, y2, z2]).map(|_| ()))
    }
}
