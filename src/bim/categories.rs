//! Category lookup by name

use log::warn;

use super::{BimElement, LevelRef, ObjectGraph};
use crate::config::{CategoryNames, LevelSource};
use crate::error::{ImportError, ImportResult};

/// Element collections of a graph, resolved once by category name
#[derive(Debug, Clone, Copy)]
pub struct ModelCategories<'a> {
    pub floors: &'a [BimElement],
    pub columns: &'a [BimElement],
    pub walls: &'a [BimElement],
}

impl<'a> ModelCategories<'a> {
    /// Resolve the floor, column and wall categories.
    ///
    /// A missing category is treated as empty.
    pub fn resolve(graph: &'a ObjectGraph, names: &CategoryNames) -> Self {
        let lookup = |name: &str| -> &'a [BimElement] {
            match graph.category(name) {
                Some(category) => category.elements.as_slice(),
                None => {
                    warn!("category '{}' not present in object graph", name);
                    &[]
                }
            }
        };

        Self {
            floors: lookup(&names.floors),
            columns: lookup(&names.columns),
            walls: lookup(&names.walls),
        }
    }

    /// Total number of elements across the three categories
    pub fn len(&self) -> usize {
        self.floors.len() + self.columns.len() + self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collect level references in encounter order.
///
/// For a named category this is the `level` of each of its elements and the
/// category must exist. For all categories, `level` then `topLevel` of each
/// element of each category.
pub fn collect_levels<'a>(
    graph: &'a ObjectGraph,
    source: &LevelSource,
) -> ImportResult<Vec<&'a LevelRef>> {
    match source {
        LevelSource::Category(name) => {
            let category = graph
                .category(name)
                .ok_or_else(|| ImportError::MissingCategory(name.clone()))?;
            Ok(category
                .elements
                .iter()
                .filter_map(|element| element.level.as_ref())
                .collect())
        }
        LevelSource::AllCategories => Ok(graph
            .elements
            .iter()
            .flat_map(|category| category.elements.iter())
            .flat_map(|element| element.level.iter().chain(element.top_level.iter()))
            .collect()),
    }
}
