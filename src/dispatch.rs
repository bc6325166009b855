//! Request dispatcher
//!
//! Validates a [`MergeRequest`], hands it to a [`MergeExecutor`] and turns
//! whatever came back into exactly one [`MergeResult`]. Nothing an executor
//! produces is dropped: unexpected output always becomes an error result.

use std::sync::Arc;

use crate::error::Error;
use crate::executor::{local::MISSING_PATHS_MESSAGE, MergeExecutor, Outcome, ProcessOutput};
use crate::open::{Opener, SystemOpener};
use crate::protocol::{parse_reply, Reply};
use crate::request::{FailureKind, MergeRequest, MergeResult};

/// Runs merge requests against one executor
pub struct Dispatcher<E> {
    executor: E,
    open_on_success: bool,
    opener: Arc<dyn Opener>,
}

impl<E: MergeExecutor> Dispatcher<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            open_on_success: false,
            opener: Arc::new(SystemOpener),
        }
    }

    /// Open the merged file after a successful merge
    pub fn open_on_success(mut self, enabled: bool) -> Self {
        self.open_on_success = enabled;
        self
    }

    pub fn with_opener(mut self, opener: Arc<dyn Opener>) -> Self {
        self.opener = opener;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Validate, execute and normalize one request
    pub fn dispatch(&self, request: &MergeRequest) -> MergeResult {
        if let Err(e) = request.validate() {
            tracing::warn!(error = %e, "merge request rejected before execution");
            let message = match &e {
                Error::MissingField(_) => MISSING_PATHS_MESSAGE.to_string(),
                other => other.to_string(),
            };
            return MergeResult::error(FailureKind::from(&e), message);
        }

        let result = match self.executor.execute(request) {
            Ok(outcome) => normalize(outcome),
            Err(e) => {
                tracing::error!(error = %e, "merge executor could not run");
                MergeResult::error(FailureKind::from(&e), e.to_string())
            }
        };

        match &result {
            MergeResult::Success { message } => {
                tracing::info!(output = %request.output.display(), %message, "merge succeeded");
                if self.open_on_success {
                    // The reported result stands even if the viewer fails to launch
                    if let Err(e) = self.opener.open_path(&request.output) {
                        tracing::warn!(error = %e, "failed to open merged PDF");
                    }
                }
            }
            MergeResult::Error { message, kind } => {
                tracing::warn!(%kind, %message, "merge failed");
            }
        }

        result
    }
}

/// Interpret an executor outcome as exactly one result
pub fn normalize(outcome: Outcome) -> MergeResult {
    match outcome {
        Outcome::Reply(reply) => reply.into_result(),
        Outcome::Process(output) => normalize_process(&output),
    }
}

fn normalize_process(output: &ProcessOutput) -> MergeResult {
    let stdout = output.stdout.trim();
    let stderr = output.stderr.trim();

    if !stdout.is_empty() {
        return match parse_reply(stdout) {
            Ok(Reply::Error { message }) => MergeResult::error(FailureKind::Rejected, message),
            Ok(Reply::Success { message, .. }) if output.exited_ok() && stderr.is_empty() => {
                MergeResult::success(message)
            }
            Ok(Reply::Success { .. }) => MergeResult::error(
                FailureKind::ExecutorFailure,
                abnormal_exit_message(output.code, stderr),
            ),
            Err(e) => {
                tracing::debug!(error = %e, "executor reply is malformed");
                MergeResult::error(
                    FailureKind::MalformedResponse,
                    format!("Unexpected response from merge executor. Received: {}", stdout),
                )
            }
        };
    }

    if !stderr.is_empty() || !output.exited_ok() {
        return MergeResult::error(
            FailureKind::ExecutorFailure,
            abnormal_exit_message(output.code, stderr),
        );
    }

    MergeResult::error(
        FailureKind::MalformedResponse,
        "Merge executor exited without a response",
    )
}

fn abnormal_exit_message(code: Option<i32>, stderr: &str) -> String {
    let exit = match code {
        Some(0) => None,
        Some(code) => Some(format!("PDF merge failed. Process exited with code {}", code)),
        None => Some("PDF merge failed. Process was terminated by a signal".to_string()),
    };

    match (exit, stderr.is_empty()) {
        (Some(exit), true) => exit,
        (Some(exit), false) => format!("{}: {}", exit, stderr),
        (None, _) => stderr.to_string(),
    }
}
