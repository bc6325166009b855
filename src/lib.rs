//! Resume Merger Library
//!
//! Glue between a small desktop window and a PDF merge executor.
//! This library provides functionality to:
//! - Describe a merge request (resume, cover letter, destination)
//! - Run it through a pluggable executor (subprocess or in-process)
//! - Normalize whatever the executor produced into a success/error result
//! - Drive the pick-pick-save dialog sequence and render the outcome
//!
//! # Example
//!
//! ```no_run
//! use resume_merger::dispatch::Dispatcher;
//! use resume_merger::executor::InProcessExecutor;
//! use resume_merger::request::MergeRequest;
//!
//! let dispatcher = Dispatcher::new(InProcessExecutor);
//! let request = MergeRequest::new("resume.pdf", "cover_letter.pdf", "Resume.pdf");
//!
//! println!("{}", dispatcher.dispatch(&request).message());
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod open;
pub mod pdf;
pub mod protocol;
pub mod request;
pub mod session;
pub mod surface;
pub mod window;

// Re-export commonly used items
pub use error::{Error, Result};
pub use request::{FailureKind, MergeRequest, MergeResult};
