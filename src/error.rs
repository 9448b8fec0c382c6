//! Error types for the BIM import pipeline

use thiserror::Error;

/// Main error type for import operations
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Datum level '{0}' not found among model levels")]
    MissingDatum(String),

    #[error("No stories left after removing the datum level")]
    EmptyStorySchema,

    #[error("Category '{0}' not found in object graph")]
    MissingCategory(String),

    #[error("Element '{element}' references level '{level}' which is not a story")]
    UnresolvedLevelReference { element: String, level: String },

    #[error("Element '{element}' has top level '{top}' below base level '{base}'")]
    InvertedLevelRange {
        element: String,
        base: String,
        top: String,
    },

    #[error("Malformed geometry on '{element}': {reason}")]
    MalformedGeometry { element: String, reason: String },

    #[error("Sink rejected {call} with code {code}")]
    SinkRejection { call: String, code: i32 },

    #[error("{0} sink call(s) were rejected")]
    SinkFailures(usize),

    #[error("Object '{0}' not found in model source")]
    ObjectNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ImportError {
    /// Create a malformed geometry error for an element
    pub fn malformed(element: &str, reason: impl Into<String>) -> Self {
        Self::MalformedGeometry {
            element: element.to_string(),
            reason: reason.into(),
        }
    }

    /// Errors that leave the story schema or category layout unusable.
    ///
    /// Unresolved level references are structural too; whether they abort the
    /// import is decided by `ImportOptions::strict_level_references`.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ImportError::MissingDatum(_)
                | ImportError::EmptyStorySchema
                | ImportError::MissingCategory(_)
                | ImportError::UnresolvedLevelReference { .. }
                | ImportError::ObjectNotFound(_)
                | ImportError::IoError(_)
                | ImportError::SerializationError(_)
        )
    }
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_classification() {
        assert!(ImportError::MissingDatum("DATUM".into()).is_structural());
        assert!(ImportError::UnresolvedLevelReference {
            element: "column 0".into(),
            level: "L9".into(),
        }
        .is_structural());
        assert!(!ImportError::malformed("floor 1", "no segments").is_structural());
        assert!(!ImportError::InvertedLevelRange {
            element: "wall 2".into(),
            base: "L3".into(),
            top: "L1".into(),
        }
        .is_structural());
    }

    #[test]
    fn test_messages() {
        let err = ImportError::SinkRejection {
            call: "add_frame_by_coordinates".into(),
            code: 1,
        };
        assert_eq!(err.to_string(), "Sink rejected add_frame_by_coordinates with code 1");
    }
}
