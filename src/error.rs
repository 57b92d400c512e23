use thiserror::Error;

/// Everything that can go wrong while reading a PCB description or querying
/// the index.
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("line {line} references undefined id {reference}")]
    DanglingReference { line: usize, reference: String },

    #[error("query issued against a scene with no primitives")]
    EmptyScene,

    #[error("traversal stack exhausted")]
    StackOverflow,

    #[error(transparent)]
    Io(#[from] std::io::Error)
}

pub type Result<T> = std::result::Result<T, Error>;

/// Result of a collision query that completed. An empty hit list is not a
/// failure, but callers often want to branch on it without inspecting the
/// list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueryStatus {
    Hits,
    NoHits
}
