//! Vertical range resolution: which stories a wall or column spans

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, ImportResult};
use crate::levels::StorySchema;

/// Walk state while scanning the story sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeState {
    SeekingBase,
    InRange,
    Done,
}

/// One story-high piece of a vertical element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySpan {
    /// Story the piece starts on
    pub story: String,
    pub bottom: f64,
    pub top: f64,
}

impl StorySpan {
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
}

/// Resolve the stories between `base` and `top`.
///
/// Emits one span per story from the base story up to (but not beyond) the
/// top story. Equal base and top give no spans. Both names must be stories
/// and the top must not lie below the base.
pub fn resolve_span(
    schema: &StorySchema,
    element: &str,
    base: &str,
    top: &str,
) -> ImportResult<Vec<StorySpan>> {
    let unresolved = |level: &str| ImportError::UnresolvedLevelReference {
        element: element.to_string(),
        level: level.to_string(),
    };
    let base_idx = schema.position(base).ok_or_else(|| unresolved(base))?;
    let top_idx = schema.position(top).ok_or_else(|| unresolved(top))?;
    if top_idx < base_idx {
        return Err(ImportError::InvertedLevelRange {
            element: element.to_string(),
            base: base.to_string(),
            top: top.to_string(),
        });
    }

    Ok(walk(schema, base, top))
}

/// Scan adjacent story pairs, entering the range on the base name and
/// stopping once the next story is the top.
fn walk(schema: &StorySchema, base: &str, top: &str) -> Vec<StorySpan> {
    let mut spans = Vec::new();
    let mut state = RangeState::SeekingBase;

    for pair in schema.stories().windows(2) {
        let (current, next) = (&pair[0], &pair[1]);

        if state == RangeState::SeekingBase && current.name == base {
            state = if current.name == top {
                RangeState::Done
            } else {
                RangeState::InRange
            };
        }

        if state == RangeState::InRange {
            spans.push(StorySpan {
                story: current.name.clone(),
                bottom: current.elevation,
                top: next.elevation,
            });
            if next.name == top {
                state = RangeState::Done;
            }
        }

        if state == RangeState::Done {
            break;
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> StorySchema {
        StorySchema::from_pairs(
            &[
                ("DATUM", 0.0),
                ("L1", 0.0),
                ("L2", 3500.0),
                ("L3", 7000.0),
                ("Roof", 10000.0),
            ],
            "DATUM",
        )
        .unwrap()
    }

    #[test]
    fn test_two_story_column() {
        let spans = resolve_span(&schema(), "column 0", "L1", "L3").unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].bottom, spans[0].top), (0.0, 3500.0));
        assert_eq!((spans[1].bottom, spans[1].top), (3500.0, 7000.0));
        assert_eq!(spans[1].story, "L2");
    }

    #[test]
    fn test_same_base_and_top() {
        assert!(resolve_span(&schema(), "c", "L2", "L2").unwrap().is_empty());
        assert!(resolve_span(&schema(), "c", "Roof", "Roof").unwrap().is_empty());
    }

    #[test]
    fn test_top_is_topmost_story() {
        let spans = resolve_span(&schema(), "c", "L2", "Roof").unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans.last().unwrap().top, 10000.0);
    }

    #[test]
    fn test_continuity() {
        let spans = resolve_span(&schema(), "c", "L1", "Roof").unwrap();
        assert_eq!(spans.len(), 3);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].top, pair[1].bottom);
        }
        assert!(spans.iter().all(|s| s.height() > 0.0));
    }

    #[test]
    fn test_unknown_levels() {
        let err = resolve_span(&schema(), "wall 4", "B1", "L2").unwrap_err();
        assert!(matches!(
            err,
            ImportError::UnresolvedLevelReference { ref level, .. } if level == "B1"
        ));
        let err = resolve_span(&schema(), "wall 4", "L1", "Attic").unwrap_err();
        assert!(matches!(
            err,
            ImportError::UnresolvedLevelReference { ref level, .. } if level == "Attic"
        ));
    }

    #[test]
    fn test_inverted_range() {
        let err = resolve_span(&schema(), "wall 2", "L3", "L1").unwrap_err();
        assert!(matches!(err, ImportError::InvertedLevelRange { .. }));
    }
}
