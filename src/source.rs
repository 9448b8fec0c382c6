//! Model source: commit lookup and object retrieval

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::bim::ObjectGraph;
use crate::error::{ImportError, ImportResult};

/// A commit on a stream, pointing at its root object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitHandle {
    pub id: String,
    #[serde(rename = "referencedObject")]
    pub referenced_object: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Something that can resolve a commit and hand out its object graph.
///
/// Authentication and transport belong to the implementation.
pub trait ModelSource {
    /// Look up a commit on a stream
    fn get_commit(&self, stream_id: &str, commit_id: &str) -> ImportResult<CommitHandle>;

    /// Receive the object graph rooted at `referenced_object`
    fn receive(&self, stream_id: &str, referenced_object: &str) -> ImportResult<ObjectGraph>;

    /// Resolve a commit and receive its root object
    fn fetch(&self, stream_id: &str, commit_id: &str) -> ImportResult<ObjectGraph> {
        let commit = self.get_commit(stream_id, commit_id)?;
        log::info!(
            "receiving object {} for commit {} on stream {}",
            commit.referenced_object,
            commit.id,
            stream_id
        );
        self.receive(stream_id, &commit.referenced_object)
    }
}

/// One stream of a local export
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamExport {
    #[serde(default)]
    pub commits: Vec<CommitHandle>,
    #[serde(default)]
    pub objects: HashMap<String, ObjectGraph>,
}

/// Model source backed by a JSON export of one or more streams
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonModelSource {
    pub streams: HashMap<String, StreamExport>,
}

impl JsonModelSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an export file
    pub fn from_json_file(path: impl AsRef<Path>) -> ImportResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Register a graph as a commit's root object
    pub fn add_commit(&mut self, stream_id: &str, commit_id: &str, graph: ObjectGraph) {
        let object_id = graph
            .id
            .clone()
            .unwrap_or_else(|| format!("{commit_id}-root"));
        let stream = self.streams.entry(stream_id.to_string()).or_default();
        stream.commits.push(CommitHandle {
            id: commit_id.to_string(),
            referenced_object: object_id.clone(),
            message: None,
        });
        stream.objects.insert(object_id, graph);
    }

    fn stream(&self, stream_id: &str) -> ImportResult<&StreamExport> {
        self.streams
            .get(stream_id)
            .ok_or_else(|| ImportError::ObjectNotFound(format!("stream {stream_id}")))
    }
}

impl ModelSource for JsonModelSource {
    fn get_commit(&self, stream_id: &str, commit_id: &str) -> ImportResult<CommitHandle> {
        self.stream(stream_id)?
            .commits
            .iter()
            .find(|c| c.id == commit_id)
            .cloned()
            .ok_or_else(|| ImportError::ObjectNotFound(format!("commit {commit_id}")))
    }

    fn receive(&self, stream_id: &str, referenced_object: &str) -> ImportResult<ObjectGraph> {
        self.stream(stream_id)?
            .objects
            .get(referenced_object)
            .cloned()
            .ok_or_else(|| ImportError::ObjectNotFound(referenced_object.to_string()))
    }
}
