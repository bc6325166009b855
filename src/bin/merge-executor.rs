//! Merge executor
//!
//! Out-of-process half of the merge protocol. Takes one JSON argument with
//! `resume`, `cover_letter` and `output` paths, merges the two PDFs, and
//! prints exactly one JSON reply on stdout. Exits 0 on success, 2 otherwise.
//!
//! Nothing else may be written to stdout or stderr: the caller treats any
//! stderr text as a failure.

use std::process;

use resume_merger::executor::handle_argument;
use resume_merger::protocol::Reply;

/// Printed if a reply somehow fails to serialize
const FALLBACK_REPLY: &str = r#"{"status":"error","message":"Failed to encode executor reply"}"#;

fn main() {
    let argument = std::env::args().nth(1);
    let reply = handle_argument(argument.as_deref());

    match reply.to_line() {
        Ok(line) => println!("{}", line),
        Err(_) => println!("{}", FALLBACK_REPLY),
    }

    let code = match reply {
        Reply::Success { .. } => 0,
        Reply::Error { .. } => 2,
    };
    process::exit(code);
}
