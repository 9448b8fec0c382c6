//! BIM Struct Import - BIM object graphs to structural analysis models
//!
//! This library translates a building model received from a model exchange
//! service into the objects of a structural analysis model:
//! - Levels become a story table (datum removed, sorted by elevation)
//! - Floors become slab area objects
//! - Columns become one frame object per spanned story
//! - Walls become one vertical area object per spanned story
//!
//! ## Example
//! ```rust
//! use bim_struct_import::prelude::*;
//!
//! let column = BimElement::new("Objects.BuiltElements.Column")
//!     .with_level("L1", 0.0)
//!     .with_top_level("L3", 7000.0)
//!     .with_base_line(Point::new(0.0, 0.0, 0.0), Point::new(0.0, 0.0, 7000.0));
//!
//! let floors: Vec<BimElement> = [("DATUM", 0.0), ("L1", 0.0), ("L2", 3500.0), ("L3", 7000.0)]
//!     .iter()
//!     .map(|(name, elevation)| BimElement::new("floor").with_level(name, *elevation))
//!     .collect();
//!
//! let graph = ObjectGraph::new(vec![
//!     Category::new("Floors", floors),
//!     Category::new("Structural Columns", vec![column]),
//! ]);
//!
//! let mut model = StructuralModel::new();
//! let report = Importer::default().run(&graph, &mut model).unwrap();
//!
//! assert_eq!(report.stories, vec!["L1", "L2", "L3"]);
//! assert_eq!(report.column_frames, 2);
//! ```

pub mod bim;
pub mod builders;
pub mod config;
pub mod error;
pub mod geometry;
pub mod import;
pub mod levels;
pub mod range;
pub mod sink;
pub mod source;

// Re-export common types
pub mod prelude {
    pub use crate::bim::{BimElement, Category, LevelRef, ObjectGraph, Point, Segment};
    pub use crate::builders::{AreaElement, FrameElement};
    pub use crate::config::{CategoryNames, ImportOptions, LevelSource};
    pub use crate::error::{ImportError, ImportResult};
    pub use crate::import::{ImportReport, Importer, SinkFailure, SkippedElement};
    pub use crate::levels::{Story, StorySchema, StoryTable};
    pub use crate::range::{resolve_span, StorySpan};
    pub use crate::sink::{AreaSection, ModelSink, StructuralModel, SUCCESS};
    pub use crate::source::{CommitHandle, JsonModelSource, ModelSource};
}
