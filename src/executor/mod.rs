//! Merge executors
//!
//! The dispatcher only sees the [`MergeExecutor`] trait. Two executors are
//! provided: [`ProcessExecutor`] runs an external program and hands back its
//! raw streams, [`InProcessExecutor`] merges with lopdf directly and answers
//! with a typed reply.

pub mod local;
pub mod process;

pub use local::{handle_argument, run_request, InProcessExecutor};
pub use process::ProcessExecutor;

use crate::error::Result;
use crate::protocol::Reply;
use crate::request::MergeRequest;

/// Something that can carry out a merge request
pub trait MergeExecutor: Send + Sync {
    /// Run one request to completion.
    ///
    /// `Err` is reserved for failures to run the executor at all; anything
    /// the executor itself reports comes back as an [`Outcome`].
    fn execute(&self, request: &MergeRequest) -> Result<Outcome>;
}

impl<E: MergeExecutor + ?Sized> MergeExecutor for Box<E> {
    fn execute(&self, request: &MergeRequest) -> Result<Outcome> {
        (**self).execute(request)
    }
}

/// What an executor produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Typed reply from an in-process executor
    Reply(Reply),
    /// Raw output of an out-of-process executor, not yet interpreted
    Process(ProcessOutput),
}

/// Captured streams and exit status of an executor process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn exited_ok(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::Output> for ProcessOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
