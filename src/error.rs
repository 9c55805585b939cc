//! Error type shared by the surface, the trigger glue and the binary.
//!
//! The numbering engine itself never returns these past its boundary: a failed heading overwrite
//! is logged and counted, and the pass carries on.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
/// Everything that can go wrong outside the pure numbering algorithm.
pub enum Error {
    /// The editable surface did not become available within the bounded wait.
    #[error("editing surface not ready after {0:?}")]
    SurfaceTimeout(Duration),

    /// Reading or writing a document failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The tree-sitter grammar could not be loaded into the parser.
    #[error("Language error: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The tree-sitter query for headings was rejected.
    #[error("Query error: {0}")]
    Query(#[from] tree_sitter::QueryError),

    /// tree-sitter produced no tree for the document.
    #[error("failed to parse document")]
    Parse,

    /// A heading index did not refer to a heading on the surface.
    #[error("no heading at index {index} (surface has {len})")]
    NoSuchHeading {
        /// Requested heading position.
        index: usize,
        /// Number of headings on the surface.
        len: usize,
    },

    /// A key chord description could not be understood.
    #[error("invalid key chord: {0:?}")]
    InvalidChord(String),

    /// Serialising a report failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
