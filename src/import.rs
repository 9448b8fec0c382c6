//! Import pipeline: object graph → stories, slabs, columns and wall panels

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::bim::{collect_levels, BimElement, ModelCategories, ObjectGraph};
use crate::builders::{build_columns, build_floor, build_walls, AreaElement, FrameElement};
use crate::config::ImportOptions;
use crate::error::{ImportError, ImportResult};
use crate::geometry::{floor_geometry, vertical_geometry};
use crate::levels::{StorySchema, StoryTable};
use crate::range::resolve_span;
use crate::sink::{send_area, send_frame, send_story_table, ModelSink, SinkCall, SUCCESS};
use crate::source::ModelSource;

/// An element that was not translated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedElement {
    pub element: String,
    pub reason: String,
}

/// A sink call that did not return success
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkFailure {
    pub call: SinkCall,
    pub element: String,
    pub code: i32,
}

impl SinkFailure {
    pub fn to_error(&self) -> ImportError {
        ImportError::SinkRejection {
            call: self.call.to_string(),
            code: self.code,
        }
    }
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Normalized story names, bottom up
    pub stories: Vec<String>,
    /// Whether the story table was accepted
    pub stories_defined: bool,
    /// Slabs created
    pub floors: usize,
    /// Floors ignored because of their type
    pub floors_ignored: usize,
    /// Wall panels created (one per wall and story)
    pub wall_panels: usize,
    /// Column pieces created (one per column and story)
    pub column_frames: usize,
    pub skipped: Vec<SkippedElement>,
    pub sink_failures: Vec<SinkFailure>,
}

impl ImportReport {
    /// True when every element was translated and accepted
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.sink_failures.is_empty()
    }
}

/// Runs imports with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct Importer {
    options: ImportOptions,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Fetch a commit from a model source and import it
    pub fn import_commit<M, S>(
        &self,
        source: &M,
        stream_id: &str,
        commit_id: &str,
        sink: &mut S,
    ) -> ImportResult<ImportReport>
    where
        M: ModelSource + ?Sized,
        S: ModelSink + ?Sized,
    {
        let graph = source.fetch(stream_id, commit_id)?;
        self.run(&graph, sink)
    }

    /// Import an object graph into a sink.
    ///
    /// Every element is translated before the first sink call, so a
    /// structural error (missing datum, unresolved level in strict mode)
    /// leaves the sink untouched.
    pub fn run<S: ModelSink + ?Sized>(
        &self,
        graph: &ObjectGraph,
        sink: &mut S,
    ) -> ImportResult<ImportReport> {
        let levels = collect_levels(graph, &self.options.level_source())?;
        let schema = StorySchema::normalize(levels, &self.options.datum_level)?;
        let categories = ModelCategories::resolve(graph, &self.options.categories);
        info!(
            "importing {} floors, {} columns, {} walls over {} stories",
            categories.floors.len(),
            categories.columns.len(),
            categories.walls.len(),
            schema.len()
        );

        let mut planner = Planner {
            options: &self.options,
            schema: &schema,
            report: ImportReport {
                stories: schema.names(),
                ..Default::default()
            },
        };
        let plan = ImportPlan {
            slabs: planner.floors(categories.floors)?,
            columns: planner.columns(categories.columns)?,
            walls: planner.walls(categories.walls)?,
        };

        let mut emitter = Emitter {
            sink,
            report: planner.report,
        };
        emitter.define_stories(&schema.story_table());
        emitter.emit(plan);

        let report = emitter.report;
        info!(
            "import finished: {} slabs, {} column frames, {} wall panels, {} skipped, {} sink failures",
            report.floors,
            report.column_frames,
            report.wall_panels,
            report.skipped.len(),
            report.sink_failures.len()
        );
        if self.options.fail_on_sink_rejection && !report.sink_failures.is_empty() {
            return Err(ImportError::SinkFailures(report.sink_failures.len()));
        }
        Ok(report)
    }
}

/// Translated elements waiting to be sent, keyed by element label
#[derive(Debug, Default)]
struct ImportPlan {
    slabs: Vec<(String, AreaElement)>,
    columns: Vec<(String, Vec<FrameElement>)>,
    walls: Vec<(String, Vec<AreaElement>)>,
}

/// Translates elements without touching the sink
struct Planner<'a> {
    options: &'a ImportOptions,
    schema: &'a StorySchema,
    report: ImportReport,
}

impl Planner<'_> {
    fn floors(&mut self, floors: &[BimElement]) -> ImportResult<Vec<(String, AreaElement)>> {
        let mut slabs = Vec::new();
        for (index, floor) in floors.iter().enumerate() {
            let label = element_label("floor", index, floor);
            if floor.speckle_type != self.options.floor_type {
                debug!("ignoring {} of type '{}'", label, floor.speckle_type);
                self.report.floors_ignored += 1;
                continue;
            }

            let geometry = match floor_geometry(&label, floor) {
                Ok(geometry) => geometry,
                Err(err) => {
                    self.skip(&label, err)?;
                    continue;
                }
            };
            let name = format!("{} {}", self.options.floor_name_prefix, index);
            let slab = build_floor(&name, &self.options.slab_section, &geometry);
            debug!(
                "{}: slab '{}' with {} vertices at z={}",
                label,
                name,
                slab.vertex_count(),
                geometry.elevation
            );
            slabs.push((label, slab));
        }
        Ok(slabs)
    }

    fn columns(
        &mut self,
        columns: &[BimElement],
    ) -> ImportResult<Vec<(String, Vec<FrameElement>)>> {
        let mut planned = Vec::new();
        for (index, column) in columns.iter().enumerate() {
            let label = element_label("column", index, column);
            let frames = match vertical_geometry(&label, column).and_then(|geometry| {
                let spans =
                    resolve_span(self.schema, &label, &geometry.base_level, &geometry.top_level)?;
                Ok(build_columns(&geometry, &spans))
            }) {
                Ok(frames) => frames,
                Err(err) => {
                    self.skip(&label, err)?;
                    continue;
                }
            };
            debug!("{}: {} story pieces", label, frames.len());
            planned.push((label, frames));
        }
        Ok(planned)
    }

    fn walls(&mut self, walls: &[BimElement]) -> ImportResult<Vec<(String, Vec<AreaElement>)>> {
        let min_height = self.schema.min_height();
        let mut planned = Vec::new();
        for (index, wall) in walls.iter().enumerate() {
            let label = element_label("wall", index, wall);
            if wall.level.is_none() || wall.top_level.is_none() {
                let err =
                    ImportError::malformed(&label, "wall is not bound to a base and top level");
                self.skip(&label, err)?;
                continue;
            }
            match wall.height {
                Some(height) if height >= min_height => {}
                other => {
                    let reason = format!(
                        "wall height {other:?} is below the smallest story height {min_height}"
                    );
                    self.skip(&label, ImportError::malformed(&label, reason))?;
                    continue;
                }
            }

            let panels = match vertical_geometry(&label, wall).and_then(|geometry| {
                let spans =
                    resolve_span(self.schema, &label, &geometry.base_level, &geometry.top_level)?;
                Ok(build_walls(&self.options.wall_section, &geometry, &spans))
            }) {
                Ok(panels) => panels,
                Err(err) => {
                    self.skip(&label, err)?;
                    continue;
                }
            };
            debug!("{}: {} story panels", label, panels.len());
            planned.push((label, panels));
        }
        Ok(planned)
    }

    /// Record a per-element failure, or abort on a structural one in strict mode
    fn skip(&mut self, label: &str, err: ImportError) -> ImportResult<()> {
        if err.is_structural() && self.options.strict_level_references {
            return Err(err);
        }
        warn!("skipping {}: {}", label, err);
        self.report.skipped.push(SkippedElement {
            element: label.to_string(),
            reason: err.to_string(),
        });
        Ok(())
    }
}

/// Sends a finished plan and records rejected calls
struct Emitter<'a, S: ModelSink + ?Sized> {
    sink: &'a mut S,
    report: ImportReport,
}

impl<S: ModelSink + ?Sized> Emitter<'_, S> {
    fn define_stories(&mut self, table: &StoryTable) {
        let code = send_story_table(&mut *self.sink, table);
        self.report.stories_defined = self.accepted(SinkCall::DefineStories, "story table", code);
    }

    fn emit(&mut self, plan: ImportPlan) {
        for (label, slab) in &plan.slabs {
            let code = send_area(&mut *self.sink, slab);
            if self.accepted(SinkCall::AddArea, label, code) {
                self.report.floors += 1;
            }
        }
        for (label, frames) in &plan.columns {
            for frame in frames {
                let code = send_frame(&mut *self.sink, frame);
                if self.accepted(SinkCall::AddFrame, label, code) {
                    self.report.column_frames += 1;
                }
            }
        }
        for (label, panels) in &plan.walls {
            for panel in panels {
                let code = send_area(&mut *self.sink, panel);
                if self.accepted(SinkCall::AddArea, label, code) {
                    self.report.wall_panels += 1;
                }
            }
        }
    }

    fn accepted(&mut self, call: SinkCall, label: &str, code: i32) -> bool {
        if code == SUCCESS {
            return true;
        }
        let failure = SinkFailure {
            call,
            element: label.to_string(),
            code,
        };
        warn!("{}: {}", label, failure.to_error());
        self.report.sink_failures.push(failure);
        false
    }
}

fn element_label(kind: &str, index: usize, element: &BimElement) -> String {
    match &element.id {
        Some(id) => format!("{kind} {index} [{id}]"),
        None => format!("{kind} {index}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bim::{Category, Point, Segment};
    use crate::config::REVIT_FLOOR_TYPE;
    use crate::sink::{AreaSection, StructuralModel};

    fn rect(w: f64, d: f64) -> Vec<Segment> {
        let p = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(w, 0.0, 0.0),
            Point::new(w, d, 0.0),
            Point::new(0.0, d, 0.0),
        ];
        (0..4).map(|i| Segment::line(p[i], p[(i + 1) % 4])).collect()
    }

    fn floor(level: &str, elevation: f64) -> BimElement {
        BimElement::new(REVIT_FLOOR_TYPE)
            .with_level(level, elevation)
            .with_outline(rect(8000.0, 6000.0))
    }

    fn graph(columns: Vec<BimElement>, walls: Vec<BimElement>) -> ObjectGraph {
        ObjectGraph::new(vec![
            Category::new("Walls", walls),
            Category::new("Structural Columns", columns),
            Category::new(
                "Floors",
                vec![
                    floor("DATUM", 0.0),
                    floor("L1", 0.0),
                    floor("L2", 3500.0),
                    floor("L3", 7000.0),
                ],
            ),
        ])
    }

    fn model() -> StructuralModel {
        let mut model = StructuralModel::new();
        model.add_area_section("Slab1", AreaSection::slab(200.0)).unwrap();
        model.add_area_section("CW-200-C40", AreaSection::wall(200.0)).unwrap();
        model
    }

    fn column(base: &str, top: &str) -> BimElement {
        BimElement::new("column")
            .with_level(base, 0.0)
            .with_top_level(top, 0.0)
            .with_base_line(Point::new(0.0, 0.0, 0.0), Point::new(0.0, 0.0, 7000.0))
    }

    #[test]
    fn test_full_import() {
        let wall = BimElement::new("wall")
            .with_level("L1", 0.0)
            .with_top_level("L3", 7000.0)
            .with_height(7000.0)
            .with_base_line(Point::new(0.0, 0.0, 0.0), Point::new(8000.0, 0.0, 0.0));
        let graph = graph(vec![column("L1", "L3")], vec![wall]);
        let mut model = model();

        let report = Importer::default().run(&graph, &mut model).unwrap();

        assert_eq!(report.stories, vec!["L1", "L2", "L3"]);
        assert!(report.stories_defined);
        // the DATUM floor is still a floor
        assert_eq!(report.floors, 4);
        assert_eq!(report.column_frames, 2);
        assert_eq!(report.wall_panels, 2);
        assert!(report.is_clean());

        assert_eq!(model.stories.len(), 2);
        assert!(model.areas.contains_key("floor 2"));
        assert_eq!(model.frames.len(), 2);
        assert_eq!(model.areas_with_section("CW-200-C40").len(), 2);
    }

    #[test]
    fn test_unresolved_level_aborts_in_strict_mode() {
        let graph = graph(vec![column("L1", "Roof")], vec![]);
        let err = Importer::default().run(&graph, &mut model()).unwrap_err();
        assert!(matches!(err, ImportError::UnresolvedLevelReference { .. }));
    }

    #[test]
    fn test_unresolved_level_leaves_sink_untouched() {
        let graph = graph(vec![column("L1", "L3"), column("L1", "Roof")], vec![]);
        let mut model = model();
        let err = Importer::default().run(&graph, &mut model).unwrap_err();

        assert!(matches!(
            err,
            ImportError::UnresolvedLevelReference { ref level, .. } if level == "Roof"
        ));
        assert!(model.stories.is_empty());
        assert!(model.areas.is_empty());
        assert!(model.frames.is_empty());
    }

    #[test]
    fn test_unresolved_level_skipped_when_lenient() {
        let graph = graph(vec![column("L1", "Roof"), column("L2", "L3")], vec![]);
        let importer = Importer::new(ImportOptions::default().lenient_levels());
        let report = importer.run(&graph, &mut model()).unwrap();
        assert_eq!(report.column_frames, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].element, "column 0");
    }

    #[test]
    fn test_element_label() {
        let element = BimElement::new("wall").with_id("5f2a");
        assert_eq!(element_label("wall", 3, &element), "wall 3 [5f2a]");
        assert_eq!(element_label("wall", 3, &BimElement::default()), "wall 3");
    }
}
