//! Error types for the resume merger library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the resume merger library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Request or reply could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// A required request field was empty
    #[error("Missing {0} path")]
    MissingField(&'static str),

    /// The merge executor could not be started on this machine
    #[error("Merge executor is not available: {0}")]
    ExecutorUnavailable(String),

    /// A merge is already in flight for this session
    #[error("A merge is already in progress")]
    Busy,

    /// General error
    #[error("{0}")]
    General(String),
}
