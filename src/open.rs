//! Hand files and links to the platform's default handler

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Opens things outside the application
pub trait Opener: Send + Sync {
    /// Open a file with its default application
    fn open_path(&self, path: &Path) -> Result<()>;

    /// Open an external link in the default browser
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Opener backed by `open`, `xdg-open` or `start`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl SystemOpener {
    fn launch(target: &OsStr) -> Result<()> {
        let mut cmd = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]);
            cmd
        } else {
            Command::new("xdg-open")
        };

        cmd.arg(target).spawn()?;
        Ok(())
    }
}

impl Opener for SystemOpener {
    fn open_path(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        tracing::info!(path = %path.display(), "opening file with default application");
        Self::launch(path.as_os_str())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        if !is_external_link(url) {
            return Err(Error::General(format!("Not an external link: {}", url)));
        }
        tracing::info!(%url, "opening external link");
        Self::launch(OsStr::new(url))
    }
}

/// Links that belong in the browser rather than in the window
pub fn is_external_link(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://") || lower.starts_with("mailto:")
}
