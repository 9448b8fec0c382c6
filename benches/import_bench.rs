//! Benchmarks for the import pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use bim_struct_import::config::REVIT_FLOOR_TYPE;
use bim_struct_import::prelude::*;

fn level_name(story: usize) -> String {
    format!("L{}", story + 1)
}

fn rectangle(width: f64, depth: f64, z: f64) -> Vec<Segment> {
    let corners = [
        Point::new(0.0, 0.0, z),
        Point::new(width, 0.0, z),
        Point::new(width, depth, z),
        Point::new(0.0, depth, z),
    ];
    (0..4)
        .map(|i| Segment::line(corners[i], corners[(i + 1) % 4]))
        .collect()
}

/// Building with a column grid, perimeter walls running full height and one
/// floor per story
fn create_multi_story_building(stories: usize, bays: usize) -> ObjectGraph {
    let story_height = 3500.0;
    let bay_width = 6000.0;
    let width = bays as f64 * bay_width;
    let top = level_name(stories);
    let top_elevation = stories as f64 * story_height;

    // Create floors
    let mut floors = vec![BimElement::new(REVIT_FLOOR_TYPE)
        .with_level("DATUM", 0.0)
        .with_outline(rectangle(width, width, 0.0))];
    for story in 0..=stories {
        let z = story as f64 * story_height;
        floors.push(
            BimElement::new(REVIT_FLOOR_TYPE)
                .with_level(&level_name(story), z)
                .with_outline(rectangle(width, width, z)),
        );
    }

    // Create columns
    let mut columns = Vec::new();
    for i in 0..=bays {
        for j in 0..=bays {
            let x = i as f64 * bay_width;
            let y = j as f64 * bay_width;
            columns.push(
                BimElement::new("column")
                    .with_level(&level_name(0), 0.0)
                    .with_top_level(&top, top_elevation)
                    .with_base_line(Point::new(x, y, 0.0), Point::new(x, y, top_elevation)),
            );
        }
    }

    // Create perimeter walls
    let walls = rectangle(width, width, 0.0)
        .into_iter()
        .filter_map(|seg| Some((seg.start?, seg.end?)))
        .map(|(start, end)| {
            BimElement::new("wall")
                .with_level(&level_name(0), 0.0)
                .with_top_level(&top, top_elevation)
                .with_height(top_elevation)
                .with_base_line(start, end)
        })
        .collect();

    ObjectGraph::new(vec![
        Category::new("Walls", walls),
        Category::new("Structural Columns", columns),
        Category::new("Floors", floors),
    ])
}

fn create_model() -> StructuralModel {
    let mut model = StructuralModel::new();
    model.add_area_section("Slab1", AreaSection::slab(200.0)).unwrap();
    model.add_area_section("CW-200-C40", AreaSection::wall(200.0)).unwrap();
    model
}

fn benchmark_normalize(c: &mut Criterion) {
    let graph = create_multi_story_building(40, 4);
    let floors = &graph.category("Floors").unwrap().elements;
    c.bench_function("normalize_40story", |b| {
        b.iter(|| {
            let schema =
                StorySchema::normalize(floors.iter().filter_map(|f| f.level.as_ref()), "DATUM")
                    .unwrap();
            black_box(&schema);
        })
    });
}

fn benchmark_small_building(c: &mut Criterion) {
    let graph = create_multi_story_building(3, 2);
    c.bench_function("import_3story_2bay", |b| {
        b.iter(|| {
            let mut model = create_model();
            let report = Importer::default().run(&graph, &mut model).unwrap();
            black_box(&report);
        })
    });
}

fn benchmark_medium_building(c: &mut Criterion) {
    let graph = create_multi_story_building(10, 5);
    c.bench_function("import_10story_5bay", |b| {
        b.iter(|| {
            let mut model = create_model();
            let report = Importer::default().run(&graph, &mut model).unwrap();
            black_box(&report);
        })
    });
}

criterion_group!(
    benches,
    benchmark_normalize,
    benchmark_small_building,
    benchmark_medium_building,
);

criterion_main!(benches);
