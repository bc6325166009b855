//! Interactive surface logic shared by the window and the terminal
//!
//! Walks the pick-resume, pick-cover-letter, pick-destination sequence,
//! feeds the finished request to a [`MergeSession`] and keeps the banner
//! that describes the last outcome.

use std::path::PathBuf;

use crate::executor::MergeExecutor;
use crate::request::{FailureKind, MergeRequest, MergeResult};
use crate::session::MergeSession;

/// Suggested file name in the save dialog
pub const DEFAULT_OUTPUT_NAME: &str = "Resume.pdf";

/// Which input document a dialog is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Resume,
    CoverLetter,
}

impl DocumentRole {
    pub fn dialog_title(self) -> &'static str {
        match self {
            DocumentRole::Resume => "Select Resume",
            DocumentRole::CoverLetter => "Select Cover Letter",
        }
    }
}

/// Source of user-selected paths, usually native dialogs.
///
/// `None` means the user cancelled that step.
pub trait DocumentPicker {
    fn pick_document(&mut self, role: DocumentRole) -> Option<PathBuf>;
    fn pick_destination(&mut self) -> Option<PathBuf>;
}

/// How a banner should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    /// The executor answered with something that was not a reply
    Warning,
    /// Local feedback such as a cancelled selection
    Notice,
}

/// Status line shown after an attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub tone: Tone,
    pub text: String,
}

impl Banner {
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }

    pub fn selection_cancelled() -> Self {
        Self::new(Tone::Notice, "File selection cancelled.")
    }

    pub fn save_cancelled() -> Self {
        Self::new(Tone::Notice, "Save cancelled.")
    }

    /// Single-line form for terminals and logs
    pub fn headline(&self) -> String {
        let prefix = match self.tone {
            Tone::Success => "Success",
            Tone::Error => "Error",
            Tone::Warning => "Warning",
            Tone::Notice => "Notice",
        };
        format!("{}: {}", prefix, self.text)
    }
}

impl From<&MergeResult> for Banner {
    fn from(result: &MergeResult) -> Self {
        let tone = match result.kind() {
            None => Tone::Success,
            Some(FailureKind::MalformedResponse) => Tone::Warning,
            Some(_) => Tone::Error,
        };
        Banner::new(tone, result.message())
    }
}

/// Result of walking the dialog sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    Ready(MergeRequest),
    Cancelled(Banner),
}

/// Ask for the three paths in order, stopping at the first cancel
pub fn acquire_request(picker: &mut impl DocumentPicker) -> Acquisition {
    let Some(resume) = picker.pick_document(DocumentRole::Resume) else {
        tracing::debug!("resume selection cancelled");
        return Acquisition::Cancelled(Banner::selection_cancelled());
    };
    tracing::debug!(path = %resume.display(), "selected resume");

    let Some(cover_letter) = picker.pick_document(DocumentRole::CoverLetter) else {
        tracing::debug!("cover letter selection cancelled");
        return Acquisition::Cancelled(Banner::selection_cancelled());
    };
    tracing::debug!(path = %cover_letter.display(), "selected cover letter");

    let Some(output) = picker.pick_destination() else {
        tracing::debug!("save path selection cancelled");
        return Acquisition::Cancelled(Banner::save_cancelled());
    };
    tracing::debug!(path = %output.display(), "selected save path");

    Acquisition::Ready(MergeRequest::new(resume, cover_letter, output))
}

/// What happened when the Merge action was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// A request was handed to the session
    Dispatched,
    /// The user cancelled one of the dialogs
    Cancelled,
    /// An attempt was already in flight; nothing was asked
    Ignored,
    /// The request could not be started
    Failed,
}

/// State behind the Merge button
pub struct MergeFlow<E> {
    session: MergeSession<E>,
    banner: Option<Banner>,
}

impl<E: MergeExecutor + 'static> MergeFlow<E> {
    pub fn new(session: MergeSession<E>) -> Self {
        Self {
            session,
            banner: None,
        }
    }

    pub fn session(&self) -> &MergeSession<E> {
        &self.session
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    /// Handle one activation of the Merge action
    pub fn activate(&mut self, picker: &mut impl DocumentPicker) -> Activation {
        if self.session.is_busy() {
            tracing::debug!("merge already in progress, activation ignored");
            return Activation::Ignored;
        }

        self.banner = None;
        let request = match acquire_request(picker) {
            Acquisition::Ready(request) => request,
            Acquisition::Cancelled(banner) => {
                self.banner = Some(banner);
                return Activation::Cancelled;
            }
        };

        tracing::info!(
            resume = %request.resume.display(),
            cover_letter = %request.cover_letter.display(),
            output = %request.output.display(),
            "dispatching merge request"
        );
        match self.session.begin(request) {
            Ok(()) => Activation::Dispatched,
            Err(e) => {
                tracing::error!(error = %e, "could not start merge");
                self.banner = Some(Banner::new(Tone::Error, e.to_string()));
                Activation::Failed
            }
        }
    }

    /// Pick up a finished attempt; returns it so callers can react
    pub fn poll(&mut self) -> Option<MergeResult> {
        let result = self.session.poll()?;
        self.banner = Some(Banner::from(&result));
        Some(result)
    }

    /// Blocking variant of [`MergeFlow::poll`]
    pub fn wait(&mut self, timeout: std::time::Duration) -> Option<MergeResult> {
        let result = self.session.wait(timeout)?;
        self.banner = Some(Banner::from(&result));
        Some(result)
    }
}
