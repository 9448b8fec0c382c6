//! Level normalization: levels referenced by elements become an ordered story schema

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::bim::LevelRef;
use crate::error::{ImportError, ImportResult};
use crate::geometry::round_unit;

/// One story of the normalized schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Level name
    pub name: String,
    /// Rounded elevation
    pub elevation: f64,
    /// Elevation above the previous story (the first story is measured from zero)
    pub height: f64,
    /// Position in the sorted sequence
    pub index: usize,
}

/// Stories sorted by elevation, datum removed, unique by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySchema {
    stories: Vec<Story>,
}

impl StorySchema {
    /// Normalize level references.
    ///
    /// The first elevation seen for a name wins. The datum level must be
    /// present and is dropped.
    pub fn normalize<'a, I>(levels: I, datum: &str) -> ImportResult<Self>
    where
        I: IntoIterator<Item = &'a LevelRef>,
    {
        let mut seen = HashSet::new();
        let mut unique: Vec<(String, f64)> = Vec::new();
        for level in levels {
            if seen.insert(level.name.as_str()) {
                unique.push((level.name.clone(), round_unit(level.elevation)));
            }
        }
        debug!("{} unique level names", unique.len());

        let datum_pos = unique
            .iter()
            .position(|(name, _)| name == datum)
            .ok_or_else(|| ImportError::MissingDatum(datum.to_string()))?;
        unique.remove(datum_pos);

        if unique.is_empty() {
            return Err(ImportError::EmptyStorySchema);
        }

        // Stable: equal elevations keep encounter order
        unique.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut stories = Vec::with_capacity(unique.len());
        let mut prev_elevation = 0.0;
        for (index, (name, elevation)) in unique.into_iter().enumerate() {
            stories.push(Story {
                name,
                elevation,
                height: elevation - prev_elevation,
                index,
            });
            prev_elevation = elevation;
        }

        let schema = Self { stories };
        info!(
            "story schema: {} stories from {} to {}",
            schema.len(),
            schema.base_elevation(),
            schema.stories[schema.len() - 1].elevation
        );
        Ok(schema)
    }

    /// Normalize `(name, elevation)` pairs
    pub fn from_pairs(pairs: &[(&str, f64)], datum: &str) -> ImportResult<Self> {
        let levels: Vec<LevelRef> = pairs
            .iter()
            .map(|(name, elevation)| LevelRef::new(name, *elevation))
            .collect();
        Self::normalize(&levels, datum)
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Story by name
    pub fn get(&self, name: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.name == name)
    }

    /// Position of a story by name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.stories.iter().position(|s| s.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.stories.iter().map(|s| s.name.clone()).collect()
    }

    pub fn elevations(&self) -> Vec<f64> {
        self.stories.iter().map(|s| s.elevation).collect()
    }

    pub fn heights(&self) -> Vec<f64> {
        self.stories.iter().map(|s| s.height).collect()
    }

    /// Elevation of the lowest story
    pub fn base_elevation(&self) -> f64 {
        self.stories.first().map(|s| s.elevation).unwrap_or(0.0)
    }

    /// Smallest story height, including the first story's height above zero
    pub fn min_height(&self) -> f64 {
        self.stories
            .iter()
            .map(|s| s.height)
            .fold(f64::INFINITY, f64::min)
    }

    /// Story definition table for the sink.
    ///
    /// The lowest story is the model base; the table lists the stories above it.
    pub fn story_table(&self) -> StoryTable {
        let above = &self.stories[1.min(self.stories.len())..];
        let count = above.len();
        StoryTable {
            base_elevation: self.base_elevation(),
            names: above.iter().map(|s| s.name.clone()).collect(),
            heights: above.iter().map(|s| s.height).collect(),
            is_master: vec![false; count],
            similar_to: vec!["None".to_string(); count],
            splice_above: vec![false; count],
            splice_height: vec![0.0; count],
        }
    }
}

/// Arguments of a batch story definition call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryTable {
    pub base_elevation: f64,
    pub names: Vec<String>,
    pub heights: Vec<f64>,
    pub is_master: Vec<bool>,
    pub similar_to: Vec<String>,
    pub splice_above: Vec<bool>,
    pub splice_height: Vec<f64>,
}

impl StoryTable {
    /// Number of stories above the base
    pub fn count(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn example() -> StorySchema {
        StorySchema::from_pairs(
            &[("DATUM", 0.0), ("L1", 0.0), ("L2", 3500.0), ("L3", 7000.0)],
            "DATUM",
        )
        .unwrap()
    }

    #[test]
    fn test_example_schema() {
        let schema = example();
        assert_eq!(schema.names(), vec!["L1", "L2", "L3"]);
        assert_eq!(schema.elevations(), vec![0.0, 3500.0, 7000.0]);
        assert_eq!(schema.heights(), vec![0.0, 3500.0, 3500.0]);
        assert_eq!(schema.base_elevation(), 0.0);
    }

    #[test]
    fn test_sorting_and_heights() {
        let schema = StorySchema::from_pairs(
            &[("L3", 9000.0), ("DATUM", -100.0), ("L1", 1000.0), ("L2", 4200.0)],
            "DATUM",
        )
        .unwrap();
        assert_eq!(schema.names(), vec!["L1", "L2", "L3"]);
        let elev = schema.elevations();
        let heights = schema.heights();
        assert_relative_eq!(heights[0], elev[0]);
        for i in 1..elev.len() {
            assert_relative_eq!(heights[i], elev[i] - elev[i - 1]);
        }
        assert_eq!(schema.stories()[2].index, 2);
    }

    #[test]
    fn test_first_elevation_wins() {
        let schema = StorySchema::from_pairs(
            &[("DATUM", 0.0), ("L1", 100.0), ("L1", 5000.0), ("L2", 3000.0)],
            "DATUM",
        )
        .unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.get("L1").unwrap().elevation, 100.0);
    }

    #[test]
    fn test_elevations_rounded() {
        let schema =
            StorySchema::from_pairs(&[("DATUM", 0.0), ("L1", 2999.7)], "DATUM").unwrap();
        assert_eq!(schema.elevations(), vec![3000.0]);
    }

    #[test]
    fn test_missing_datum() {
        let err = StorySchema::from_pairs(&[("L1", 0.0), ("L2", 3000.0)], "DATUM").unwrap_err();
        assert!(matches!(err, ImportError::MissingDatum(ref d) if d == "DATUM"));
    }

    #[test]
    fn test_only_datum() {
        let err = StorySchema::from_pairs(&[("DATUM", 0.0)], "DATUM").unwrap_err();
        assert!(matches!(err, ImportError::EmptyStorySchema));
    }

    #[test]
    fn test_story_table() {
        let table = example().story_table();
        assert_eq!(table.base_elevation, 0.0);
        assert_eq!(table.count(), 2);
        assert_eq!(table.names, vec!["L2", "L3"]);
        assert_eq!(table.heights, vec![3500.0, 3500.0]);
        assert_eq!(table.similar_to, vec!["None", "None"]);
        assert!(table.is_master.iter().all(|m| !m));
    }

    #[test]
    fn test_min_height() {
        assert_eq!(example().min_height(), 0.0);
        let raised = StorySchema::from_pairs(
            &[("DATUM", 0.0), ("L1", 3000.0), ("L2", 5500.0)],
            "DATUM",
        )
        .unwrap();
        assert_eq!(raised.min_height(), 2500.0);
    }
}
