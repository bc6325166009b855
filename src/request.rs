//! Merge request and result values

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The three paths needed for one merge attempt.
///
/// Serialized with exactly the keys `resume`, `cover_letter` and `output`,
/// which is the argument the merge executor receives. Missing keys
/// deserialize to empty paths so that validation can report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// First document of the merged output
    #[serde(default)]
    pub resume: PathBuf,
    /// Second document of the merged output
    #[serde(default)]
    pub cover_letter: PathBuf,
    /// Destination of the merged PDF
    #[serde(default)]
    pub output: PathBuf,
}

impl MergeRequest {
    pub fn new(
        resume: impl Into<PathBuf>,
        cover_letter: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            resume: resume.into(),
            cover_letter: cover_letter.into(),
            output: output.into(),
        }
    }

    /// Input documents in merge order
    pub fn inputs(&self) -> [&Path; 2] {
        [&self.resume, &self.cover_letter]
    }

    /// Check that every field is present and both inputs are regular files.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("resume", &self.resume),
            ("cover letter", &self.cover_letter),
            ("output", &self.output),
        ];
        for (name, path) in fields {
            if path.as_os_str().is_empty() {
                return Err(Error::MissingField(name));
            }
        }

        for path in self.inputs() {
            if !path.is_file() {
                return Err(Error::FileNotFound(path.to_path_buf()));
            }
        }

        Ok(())
    }

    /// JSON form handed to an out-of-process executor
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Why a merge attempt ended in an error.
///
/// Only used locally to pick how a failure is rendered; it never crosses
/// the executor boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A required path was absent or an input file does not exist
    MissingInput,
    /// The executor could not be started
    ExecutorUnavailable,
    /// Non-zero exit, signal, or diagnostic text on stderr
    ExecutorFailure,
    /// The executor answered with a well-formed error reply
    Rejected,
    /// The executor's output was not a well-formed reply
    MalformedResponse,
}

impl FailureKind {
    pub fn label(self) -> &'static str {
        match self {
            FailureKind::MissingInput => "missing input",
            FailureKind::ExecutorUnavailable => "executor unavailable",
            FailureKind::ExecutorFailure => "executor failure",
            FailureKind::Rejected => "rejected",
            FailureKind::MalformedResponse => "malformed response",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized outcome of one merge request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeResult {
    Success { message: String },
    Error { message: String, kind: FailureKind },
}

impl MergeResult {
    pub fn success(message: impl Into<String>) -> Self {
        MergeResult::Success {
            message: message.into(),
        }
    }

    pub fn error(kind: FailureKind, message: impl Into<String>) -> Self {
        MergeResult::Error {
            message: message.into(),
            kind,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MergeResult::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            MergeResult::Success { message } | MergeResult::Error { message, .. } => message,
        }
    }

    /// Failure classification, `None` on success
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            MergeResult::Success { .. } => None,
            MergeResult::Error { kind, .. } => Some(*kind),
        }
    }
}

impl From<&Error> for FailureKind {
    fn from(error: &Error) -> Self {
        match error {
            Error::MissingField(_) | Error::FileNotFound(_) => FailureKind::MissingInput,
            Error::ExecutorUnavailable(_) => FailureKind::ExecutorUnavailable,
            _ => FailureKind::ExecutorFailure,
        }
    }
}
