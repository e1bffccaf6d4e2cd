//! Error types for topotree

use thiserror::Error;

/// Main error type for topotree operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    /// The live topology disagrees with what an operation expects, e.g. a
    /// replayed order that no longer matches the tree it is applied to.
    #[error("Consistency violation: {0}")]
    Consistency(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
