//! Import options

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ImportResult;

/// Type discriminator of floors that are translated into slabs
pub const REVIT_FLOOR_TYPE: &str =
    "Objects.BuiltElements.Floor:Objects.BuiltElements.Revit.RevitFloor";

/// Names of the object graph categories holding each element kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryNames {
    pub floors: String,
    pub columns: String,
    pub walls: String,
}

impl Default for CategoryNames {
    fn default() -> Self {
        Self {
            floors: "Floors".to_string(),
            columns: "Structural Columns".to_string(),
            walls: "Walls".to_string(),
        }
    }
}

/// Where the level normalizer collects level references from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelSource {
    /// Only the `level` of each element in the named category
    Category(String),
    /// `level` and `topLevel` of every element in every category
    AllCategories,
}

/// Options controlling an import
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Name of the synthetic reference level to drop
    pub datum_level: String,
    /// Floors with any other `speckle_type` are skipped
    pub floor_type: String,
    /// Section label for slab area objects
    pub slab_section: String,
    /// Section label for wall area objects
    pub wall_section: String,
    /// Floor area objects are named `"{prefix} {index}"`
    pub floor_name_prefix: String,
    /// Category names in the object graph
    pub categories: CategoryNames,
    /// Level reference source (None = the floors category)
    pub level_source: Option<LevelSource>,
    /// Abort on unresolved level names instead of skipping the element
    pub strict_level_references: bool,
    /// Turn collected sink rejections into an error at the end of the import
    pub fail_on_sink_rejection: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            datum_level: "DATUM".to_string(),
            floor_type: REVIT_FLOOR_TYPE.to_string(),
            slab_section: "Slab1".to_string(),
            wall_section: "CW-200-C40".to_string(),
            floor_name_prefix: "floor".to_string(),
            categories: CategoryNames::default(),
            level_source: None,
            strict_level_references: true,
            fail_on_sink_rejection: false,
        }
    }
}

impl ImportOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> ImportResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Resolved level source
    pub fn level_source(&self) -> LevelSource {
        self.level_source
            .clone()
            .unwrap_or_else(|| LevelSource::Category(self.categories.floors.clone()))
    }

    /// Set the datum level name
    pub fn with_datum(mut self, name: &str) -> Self {
        self.datum_level = name.to_string();
        self
    }

    /// Set slab and wall section labels
    pub fn with_sections(mut self, slab: &str, wall: &str) -> Self {
        self.slab_section = slab.to_string();
        self.wall_section = wall.to_string();
        self
    }

    /// Set category names
    pub fn with_categories(mut self, categories: CategoryNames) -> Self {
        self.categories = categories;
        self
    }

    /// Set the level source
    pub fn with_level_source(mut self, source: LevelSource) -> Self {
        self.level_source = Some(source);
        self
    }

    /// Skip elements with unresolved level names instead of aborting
    pub fn lenient_levels(mut self) -> Self {
        self.strict_level_references = false;
        self
    }

    /// Fail the import when any sink call was rejected
    pub fn fail_on_sink_rejection(mut self) -> Self {
        self.fail_on_sink_rejection = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ImportOptions::default();
        assert_eq!(opts.datum_level, "DATUM");
        assert_eq!(opts.slab_section, "Slab1");
        assert_eq!(opts.wall_section, "CW-200-C40");
        assert!(opts.strict_level_references);
        assert_eq!(opts.level_source(), LevelSource::Category("Floors".to_string()));
    }

    #[test]
    fn test_partial_json() {
        let opts: ImportOptions =
            serde_json::from_str(r#"{"slab_section": "S200", "level_source": "AllCategories"}"#)
                .unwrap();
        assert_eq!(opts.slab_section, "S200");
        assert_eq!(opts.wall_section, "CW-200-C40");
        assert_eq!(opts.level_source(), LevelSource::AllCategories);
    }

    #[test]
    fn test_builders() {
        let opts = ImportOptions::new()
            .with_datum("REF")
            .with_sections("S1", "W1")
            .lenient_levels();
        assert_eq!(opts.datum_level, "REF");
        assert_eq!(opts.wall_section, "W1");
        assert!(!opts.strict_level_references);
    }
}
