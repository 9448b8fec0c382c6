//! Model sink: the structural application's element creation calls

mod memory;

pub use memory::{
    AreaObject, AreaSection, AreaSectionKind, FrameObject, ModelError, StoryDefinition,
    StructuralModel,
};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::builders::{AreaElement, FrameElement};
use crate::levels::StoryTable;

/// Return code of an accepted call
pub const SUCCESS: i32 = 0;

/// Element creation API of a structural analysis application.
///
/// Every call returns `SUCCESS` or an application-defined failure code.
pub trait ModelSink {
    /// Replace the story table in one batch
    #[allow(clippy::too_many_arguments)]
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
    ) -> i32;

    /// Add an area object through its corner coordinates
    fn add_area_by_coordinates(
        &mut self,
        vertex_count: usize,
        xs: &[f64],
        ys: &[f64],
        zs: &[f64],
        name: &str,
        section: &str,
    ) -> i32;

    /// Add a frame object between two points
    #[allow(clippy::too_many_arguments)]
    fn add_frame_by_coordinates(
        &mut self,
        x1: f64,
        y1: f64,
        z1: f64,
        x2: f64,
        y2: f64,
        z2: f64,
    ) -> i32;
}

/// Which sink call a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SinkCall {
    DefineStories,
    AddArea,
    AddFrame,
}

impl fmt::Display for SinkCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SinkCall::DefineStories => "define_stories",
            SinkCall::AddArea => "add_area_by_coordinates",
            SinkCall::AddFrame => "add_frame_by_coordinates",
        };
        f.write_str(name)
    }
}

/// Send a story table
pub fn send_story_table<S: ModelSink + ?Sized>(sink: &mut S, table: &StoryTable) -> i32 {
    sink.define_stories(
        table.base_elevation,
        table.count(),
        &table.names,
        &table.heights,
        &table.is_master,
        &table.similar_to,
        &table.splice_above,
        &table.splice_height,
    )
}

/// Send an area object
pub fn send_area<S: ModelSink + ?Sized>(sink: &mut S, area: &AreaElement) -> i32 {
    sink.add_area_by_coordinates(
        area.vertex_count(),
        &area.xs,
        &area.ys,
        &area.zs,
        &area.name,
        &area.section,
    )
}

/// Send a frame object
pub fn send_frame<S: ModelSink + ?Sized>(sink: &mut S, frame: &FrameElement) -> i32 {
    let (s, e) = (&frame.start, &frame.end);
    sink.add_frame_by_coordinates(s.x, s.y, s.z, e.x, e.y, e.z)
}
