//! Conventional cache layout
//!
//! Primary data goes under `graph/<step>/...`, secondary indexes under
//! `index/...` as links back into `graph`. Nothing in the cache core
//! depends on these names.

/// Top-level directory for primary data
pub const GRAPH_DIR: &str = "graph";

/// Top-level directory for symlinked indexes
pub const INDEX_DIR: &str = "index";

/// Kind of object stored in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Entity,
    Relationship,
}

impl ObjectKind {
    fn dir(&self) -> &'static str {
        match self {
            Self::Entity => "entities",
            Self::Relationship => "relationships",
        }
    }
}

/// Path of an object written by a collection step
///
/// `graph/<step>/<entities|relationships>/<id>.json`
pub fn graph_path(step: &str, kind: ObjectKind, id: &str) -> String {
    format!("{}/{}/{}/{}.json", GRAPH_DIR, step, kind.dir(), file_stem(id))
}

/// Path of the index entry for an object of a given type
///
/// `index/<entities|relationships>/<type>/<id>.json`
pub fn index_path(kind: ObjectKind, object_type: &str, id: &str) -> String {
    format!(
        "{}/{}/{}/{}.json",
        INDEX_DIR,
        kind.dir(),
        object_type,
        file_stem(id)
    )
}

/// Subtree holding every index entry of one type
pub fn index_subtree(kind: ObjectKind, object_type: &str) -> String {
    format!("{}/{}/{}", INDEX_DIR, kind.dir(), object_type)
}

/// Turn an object id into a single path segment
fn file_stem(id: &str) -> String {
    id.replace(['/', '\\'], "_")
}
