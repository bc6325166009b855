//! Out-of-process executor
//!
//! Starts `<program> [args...] <request-json>` and captures everything the
//! program writes. Interpreting the streams is the dispatcher's job.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{MergeExecutor, Outcome, ProcessOutput};
use crate::error::{Error, Result};
use crate::request::MergeRequest;

/// File name of the bundled executor binary
pub const EXECUTOR_BINARY: &str = "merge-executor";

/// Executor backed by an external program
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ProcessExecutor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Fixed arguments placed before the request JSON
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The bundled `merge-executor` binary next to the running executable
    pub fn bundled() -> Result<Self> {
        let current = std::env::current_exe()?;
        let dir = current
            .parent()
            .ok_or_else(|| Error::General("Executable has no parent directory".to_string()))?;

        let program = dir.join(format!("{}{}", EXECUTOR_BINARY, std::env::consts::EXE_SUFFIX));
        if !program.exists() {
            return Err(Error::ExecutorUnavailable(format!(
                "{} not found next to {}",
                EXECUTOR_BINARY,
                current.display()
            )));
        }

        Ok(Self::new(program))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);

        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;
            // CREATE_NO_WINDOW
            cmd.creation_flags(0x08000000);
        }

        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl MergeExecutor for ProcessExecutor {
    fn execute(&self, request: &MergeRequest) -> Result<Outcome> {
        let payload = request.to_json()?;
        tracing::debug!(program = %self.program.display(), %payload, "starting merge executor");

        let output = self.command().arg(payload).output().map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                Error::ExecutorUnavailable(format!("{}: {}", self.program.display(), e))
            }
            _ => Error::Io(e),
        })?;

        let output = ProcessOutput::from(output);
        tracing::debug!(
            code = ?output.code,
            stdout = %output.stdout.trim(),
            stderr = %output.stderr.trim(),
            "merge executor finished"
        );

        Ok(Outcome::Process(output))
    }
}
