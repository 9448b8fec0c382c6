//! Import a BIM object graph from a JSON file into an in-memory structural model
//!
//! Usage:
//!   bim-import <graph.json>
//!   bim-import <export.json> <stream_id> <commit_id>
//!
//! `BIM_IMPORT_OPTIONS` may point at a JSON options file. The report and the
//! resulting model are written to stdout as JSON.

use anyhow::{bail, Context, Result};
use serde::Serialize;

use bim_struct_import::prelude::*;
use bim_struct_import::sink::AreaSection;

/// Section thickness used for the labels the import references
const DEFAULT_THICKNESS: f64 = 200.0;

#[derive(Serialize)]
struct Output<'a> {
    report: &'a ImportReport,
    model: &'a StructuralModel,
}

fn load_options() -> Result<ImportOptions> {
    match std::env::var("BIM_IMPORT_OPTIONS") {
        Ok(path) => ImportOptions::from_json_file(&path)
            .with_context(|| format!("reading options from {path}")),
        Err(_) => Ok(ImportOptions::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = load_options()?;

    let mut model = StructuralModel::new();
    model
        .add_area_section(&options.slab_section, AreaSection::slab(DEFAULT_THICKNESS))
        .context("adding slab section")?;
    if options.wall_section != options.slab_section {
        model
            .add_area_section(&options.wall_section, AreaSection::wall(DEFAULT_THICKNESS))
            .context("adding wall section")?;
    }

    let importer = Importer::new(options);
    let report = match args.as_slice() {
        [graph_path] => {
            let text = std::fs::read_to_string(graph_path)
                .with_context(|| format!("reading {graph_path}"))?;
            let graph = ObjectGraph::from_json_str(&text)
                .with_context(|| format!("parsing object graph {graph_path}"))?;
            importer.run(&graph, &mut model)?
        }
        [export_path, stream_id, commit_id] => {
            let source = JsonModelSource::from_json_file(export_path)
                .with_context(|| format!("loading export {export_path}"))?;
            importer.import_commit(&source, stream_id, commit_id, &mut model)?
        }
        _ => bail!("usage: bim-import <graph.json> | <export.json> <stream_id> <commit_id>"),
    };

    let output = Output {
        report: &report,
        model: &model,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    if !report.sink_failures.is_empty() {
        log::warn!("{} sink call(s) were rejected", report.sink_failures.len());
    }
    Ok(())
}
