//! Executor wire protocol
//!
//! An executor answers a request with exactly one JSON object on stdout:
//!
//! ```text
//! {"status":"success","message":"PDFs merged successfully!"}
//! {"status":"error","message":"PDF merge failed: ..."}
//! ```
//!
//! Replies may carry extra fields of any type; readers only look at
//! `status` and `message`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::request::{FailureKind, MergeResult};

/// One executor reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Reply {
    Success {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        output: Option<PathBuf>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pages: Option<usize>,
    },
    Error {
        message: String,
    },
}

impl Reply {
    pub fn success(message: impl Into<String>) -> Self {
        Reply::Success {
            message: message.into(),
            output: None,
            pages: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Reply::Error {
            message: message.into(),
        }
    }

    /// Serialize as the single stdout line an executor prints
    pub fn to_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Map a well-formed reply onto the dispatcher's result type
    pub fn into_result(self) -> MergeResult {
        match self {
            Reply::Success { message, .. } => MergeResult::success(message),
            Reply::Error { message } => MergeResult::error(FailureKind::Rejected, message),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum Status {
    Success,
    Error,
}

/// The fields a reader relies on; everything else in the object is skipped
#[derive(Deserialize)]
struct Envelope {
    status: Status,
    message: String,
}

/// Parse executor stdout as a reply.
///
/// The trimmed text must be a single object bounded by `{` and `}` with a
/// known `status`; anything else is an error.
pub fn parse_reply(stdout: &str) -> Result<Reply> {
    let text = stdout.trim();
    if !(text.starts_with('{') && text.ends_with('}')) {
        return Err(Error::General(format!("reply is not a JSON object: {}", text)));
    }

    let envelope: Envelope = serde_json::from_str(text)?;
    Ok(match envelope.status {
        Status::Success => Reply::success(envelope.message),
        Status::Error => Reply::error(envelope.message),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_reply() {
        let reply = parse_reply(r#"{"status":"success","message":"Merged!"}"#).unwrap();
        assert_eq!(reply, Reply::success("Merged!"));
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace_and_extra_fields() {
        let stdout = concat!(
            "  {\"status\":\"success\",\"message\":\"done\",",
            "\"output\":\"/tmp/x.pdf\",\"extra\":1}\n",
        );
        assert_eq!(parse_reply(stdout).unwrap(), Reply::success("done"));
    }

    #[test]
    fn test_parse_ignores_extra_field_types() {
        let replies = [
            r#"{"status":"success","message":"done","pages":"2"}"#,
            r#"{"status":"success","message":"done","output":42}"#,
            r#"{"status":"success","message":"done","pages":-1,"output":null}"#,
        ];
        for stdout in replies {
            assert_eq!(parse_reply(stdout).unwrap(), Reply::success("done"), "{}", stdout);
        }

        let reply = parse_reply(r#"{"status":"error","message":"bad","pages":[1]}"#).unwrap();
        assert_eq!(reply, Reply::error("bad"));
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(parse_reply("not json at all").is_err());
        assert!(parse_reply("").is_err());
        assert!(parse_reply("[1, 2]").is_err());
        assert!(parse_reply("warning: x\n{\"status\":\"success\",\"message\":\"m\"}").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        assert!(parse_reply(r#"{"status":"pending","message":"later"}"#).is_err());
        assert!(parse_reply(r#"{"message":"no status"}"#).is_err());
    }

    #[test]
    fn test_error_reply_maps_to_rejected() {
        let result = Reply::error("Bad PDF").into_result();
        assert_eq!(result, MergeResult::error(FailureKind::Rejected, "Bad PDF"));
    }

    #[test]
    fn test_reply_line_shape() {
        let line = Reply::error("Missing file paths!").to_line().unwrap();
        assert_eq!(line, r#"{"status":"error","message":"Missing file paths!"}"#);

        let line = Reply::success("ok").to_line().unwrap();
        assert_eq!(line, r#"{"status":"success","message":"ok"}"#);
    }
}
