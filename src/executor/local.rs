//! In-process executor
//!
//! Also the body of the `merge-executor` binary, so both executors answer
//! a request with the same replies.

use super::{MergeExecutor, Outcome};
use crate::error::{Error, Result};
use crate::pdf::{merge_documents, MergeOptions};
use crate::protocol::Reply;
use crate::request::MergeRequest;

pub const SUCCESS_MESSAGE: &str = "PDFs merged successfully!";
pub const MISSING_PATHS_MESSAGE: &str = "Missing file paths!";

/// Merge a request with lopdf and describe the outcome as a reply
pub fn run_request(request: &MergeRequest) -> Reply {
    if let Err(e @ Error::MissingField(_)) = request.validate() {
        tracing::debug!(error = %e, "rejecting incomplete request");
        return Reply::error(MISSING_PATHS_MESSAGE);
    }

    let options = MergeOptions::new(request.inputs(), &request.output);
    match merge_documents(&options) {
        Ok(pages) => Reply::Success {
            message: SUCCESS_MESSAGE.to_string(),
            output: Some(request.output.clone()),
            pages: Some(pages),
        },
        Err(e) => Reply::error(format!("PDF merge failed: {}", e)),
    }
}

/// Answer the single command-line argument of the `merge-executor` binary
pub fn handle_argument(argument: Option<&str>) -> Reply {
    let Some(argument) = argument else {
        return Reply::error("Invalid JSON input: no request argument given");
    };

    match serde_json::from_str::<MergeRequest>(argument) {
        Ok(request) => run_request(&request),
        Err(e) => Reply::error(format!("Invalid JSON input: {}", e)),
    }
}

/// Executor that merges on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct InProcessExecutor;

impl MergeExecutor for InProcessExecutor {
    fn execute(&self, request: &MergeRequest) -> Result<Outcome> {
        Ok(Outcome::Reply(run_request(request)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_paths_reply() {
        let reply = run_request(&MergeRequest::new("", "b.pdf", "out.pdf"));
        assert_eq!(reply, Reply::error(MISSING_PATHS_MESSAGE));
    }

    #[test]
    fn test_argument_must_be_json() {
        match handle_argument(Some("resume.pdf cover.pdf")) {
            Reply::Error { message } => assert!(message.starts_with("Invalid JSON input: ")),
            other => panic!("unexpected reply {:?}", other),
        }
        assert!(matches!(handle_argument(None), Reply::Error { .. }));
    }

    #[test]
    fn test_argument_missing_key() {
        let reply = handle_argument(Some(r#"{"resume":"a.pdf","output":"out.pdf"}"#));
        assert_eq!(reply, Reply::error(MISSING_PATHS_MESSAGE));
    }

    #[test]
    fn test_unreadable_input_reply() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let resume = temp_dir.path().join("resume.pdf");
        std::fs::write(&resume, b"not a pdf").unwrap();

        let request = MergeRequest::new(&resume, &resume, temp_dir.path().join("out.pdf"));
        match run_request(&request) {
            Reply::Error { message } => assert!(message.starts_with("PDF merge failed: ")),
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[test]
    fn test_missing_input_file_reply_names_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let request = MergeRequest::new(
            temp_dir.path().join("gone.pdf"),
            temp_dir.path().join("gone-too.pdf"),
            temp_dir.path().join("out.pdf"),
        );

        let reply = InProcessExecutor.execute(&request).unwrap();
        match reply {
            Outcome::Reply(Reply::Error { message }) => assert!(message.contains("gone.pdf")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
