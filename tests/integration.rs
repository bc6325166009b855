//! Integration tests for the resume merger

mod common;

use std::process::Command;
use std::time::Duration;

use resume_merger::dispatch::Dispatcher;
use resume_merger::executor::{InProcessExecutor, ProcessExecutor};
use resume_merger::pdf::count_pages;
use resume_merger::session::MergeSession;
use resume_merger::{FailureKind, MergeRequest, MergeResult};
use tempfile::TempDir;

use common::write_pdf;

fn bundled_executor() -> ProcessExecutor {
    ProcessExecutor::new(env!("CARGO_BIN_EXE_merge-executor"))
}

#[test]
fn test_in_process_merge_sums_pages() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let resume = write_pdf(&temp_dir.path().join("resume.pdf"), "resume", 2);
    let cover = write_pdf(&temp_dir.path().join("cover.pdf"), "cover", 1);
    let output = temp_dir.path().join("Resume.pdf");

    let request = MergeRequest::new(resume, cover, &output);
    let result = Dispatcher::new(InProcessExecutor).dispatch(&request);

    assert_eq!(result, MergeResult::success("PDFs merged successfully!"));
    assert_eq!(count_pages(&output).expect("Failed to count pages"), 3);
}

#[test]
fn test_executor_binary_merges() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let resume = write_pdf(&temp_dir.path().join("resume.pdf"), "resume", 1);
    let cover = write_pdf(&temp_dir.path().join("cover.pdf"), "cover", 3);
    let output = temp_dir.path().join("merged.pdf");

    let request = MergeRequest::new(resume, cover, &output);
    let result = Dispatcher::new(bundled_executor()).dispatch(&request);

    assert!(result.is_success(), "merge failed: {}", result.message());
    assert_eq!(count_pages(&output).expect("Failed to count pages"), 4);
}

#[test]
fn test_executor_binary_reports_bad_pdf() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let resume = write_pdf(&temp_dir.path().join("resume.pdf"), "resume", 1);
    let cover = temp_dir.path().join("cover.pdf");
    std::fs::write(&cover, b"this is not a pdf").unwrap();
    let output = temp_dir.path().join("merged.pdf");

    let request = MergeRequest::new(resume, cover, &output);
    let result = Dispatcher::new(bundled_executor()).dispatch(&request);

    assert_eq!(result.kind(), Some(FailureKind::Rejected));
    assert!(result.message().starts_with("PDF merge failed: "), "{}", result.message());
    assert!(!output.exists());
}

#[test]
fn test_executor_binary_protocol_on_bad_argument() {
    let output = Command::new(env!("CARGO_BIN_EXE_merge-executor"))
        .arg("not json at all")
        .output()
        .expect("Failed to run merge-executor");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stderr.is_empty());

    let reply: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reply["status"], "error");
    assert!(reply["message"].as_str().unwrap().starts_with("Invalid JSON input"));
}

#[test]
fn test_executor_binary_success_reply_shape() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let resume = write_pdf(&temp_dir.path().join("resume.pdf"), "resume", 1);
    let cover = write_pdf(&temp_dir.path().join("cover.pdf"), "cover", 1);
    let request = MergeRequest::new(resume, cover, temp_dir.path().join("out.pdf"));

    let output = Command::new(env!("CARGO_BIN_EXE_merge-executor"))
        .arg(request.to_json().unwrap())
        .output()
        .expect("Failed to run merge-executor");

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stderr.is_empty());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    let reply: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(reply["status"], "success");
    assert_eq!(reply["message"], "PDFs merged successfully!");
    assert_eq!(reply["pages"], 2);
}

#[test]
fn test_session_runs_executor_binary_in_background() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let resume = write_pdf(&temp_dir.path().join("resume.pdf"), "resume", 2);
    let cover = write_pdf(&temp_dir.path().join("cover.pdf"), "cover", 2);
    let output = temp_dir.path().join("merged.pdf");

    let mut session = MergeSession::new(Dispatcher::new(bundled_executor()));
    session.begin(MergeRequest::new(resume, cover, &output)).unwrap();

    let result = session
        .wait(Duration::from_secs(30))
        .expect("merge should finish");

    assert!(result.is_success(), "merge failed: {}", result.message());
    assert_eq!(count_pages(&output).expect("Failed to count pages"), 4);
}

#[test]
fn test_missing_executor_is_unavailable() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let resume = write_pdf(&temp_dir.path().join("resume.pdf"), "resume", 1);
    let cover = write_pdf(&temp_dir.path().join("cover.pdf"), "cover", 1);

    let executor = ProcessExecutor::new(temp_dir.path().join("no-such-executor"));
    let request = MergeRequest::new(resume, cover, temp_dir.path().join("out.pdf"));
    let result = Dispatcher::new(executor).dispatch(&request);

    assert_eq!(result.kind(), Some(FailureKind::ExecutorUnavailable));
}
