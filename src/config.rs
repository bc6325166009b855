//! Runtime settings resolved from the command line and environment

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::dispatch::Dispatcher;
use crate::executor::process::EXECUTOR_BINARY;
use crate::executor::{InProcessExecutor, MergeExecutor, ProcessExecutor};
use crate::open::{is_external_link, Opener, SystemOpener};

/// Which executor merge requests go to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorChoice {
    /// The `merge-executor` binary installed next to this one
    Bundled,
    /// A user-supplied program speaking the same protocol
    Program(PathBuf),
    /// Merge on a worker thread without a subprocess
    InProcess,
}

/// A labelled link shown in the window footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    pub label: String,
    pub url: String,
}

impl FromStr for ExternalLink {
    type Err = String;

    /// Parses `Label=https://...`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, url) = s
            .split_once('=')
            .ok_or_else(|| format!("Expected LABEL=URL, got: {}", s))?;
        let (label, url) = (label.trim(), url.trim());

        if label.is_empty() {
            return Err(format!("Link has no label: {}", s));
        }
        if !is_external_link(url) {
            return Err(format!("Not an external link: {}", url));
        }

        Ok(Self {
            label: label.to_string(),
            url: url.to_string(),
        })
    }
}

impl fmt::Display for ExternalLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.label, self.url)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub executor: ExecutorChoice,
    /// Open the merged PDF with the default viewer after a success
    pub open_on_success: bool,
    pub links: Vec<ExternalLink>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            executor: ExecutorChoice::Bundled,
            open_on_success: true,
            links: Vec::new(),
        }
    }
}

impl Settings {
    /// Build the configured executor.
    ///
    /// A missing bundled binary is not fatal here; the `PATH` lookup that
    /// replaces it reports the executor as unavailable on each attempt.
    pub fn executor(&self) -> Box<dyn MergeExecutor> {
        match &self.executor {
            ExecutorChoice::InProcess => Box::new(InProcessExecutor),
            ExecutorChoice::Program(program) => Box::new(ProcessExecutor::new(program)),
            ExecutorChoice::Bundled => match ProcessExecutor::bundled() {
                Ok(executor) => {
                    let program = executor.program().display();
                    tracing::debug!(%program, "using bundled executor");
                    Box::new(executor)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "falling back to {} on PATH", EXECUTOR_BINARY);
                    Box::new(ProcessExecutor::new(EXECUTOR_BINARY))
                }
            },
        }
    }

    pub fn opener(&self) -> Arc<dyn Opener> {
        Arc::new(SystemOpener)
    }

    pub fn dispatcher(&self) -> Dispatcher<Box<dyn MergeExecutor>> {
        Dispatcher::new(self.executor())
            .open_on_success(self.open_on_success)
            .with_opener(self.opener())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_link() {
        let link: ExternalLink = "Portfolio = https://example.com/me".parse().unwrap();
        assert_eq!(link.label, "Portfolio");
        assert_eq!(link.url, "https://example.com/me");
        assert_eq!(link.to_string(), "Portfolio=https://example.com/me");
    }

    #[test]
    fn test_parse_link_rejects_bad_input() {
        assert!("https://example.com".parse::<ExternalLink>().is_err());
        assert!("=https://example.com".parse::<ExternalLink>().is_err());
        assert!("Local=./index.html".parse::<ExternalLink>().is_err());
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.executor, ExecutorChoice::Bundled);
        assert!(settings.open_on_success);
        assert!(settings.links.is_empty());
    }

    #[test]
    fn test_in_process_dispatcher_validates_requests() {
        let settings = Settings {
            executor: ExecutorChoice::InProcess,
            open_on_success: false,
            links: Vec::new(),
        };
        let dispatcher = settings.dispatcher();

        let result = dispatcher.dispatch(&crate::MergeRequest::new("", "", ""));
        assert_eq!(result.kind(), Some(crate::FailureKind::MissingInput));
    }
}
