//! Handing pin targets to the OS shell.

use crate::error::LaunchError;
use tracing::info;

/// Opens a file, folder or URL with the system default handler.
pub trait Launcher {
    fn open(&self, target: &str) -> Result<(), LaunchError>;
}

/// Launcher backed by the `open` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

/// Bare `www.` links get an https scheme so the shell treats them as URLs.
pub fn normalize_target(target: &str) -> String {
    let trimmed = target.trim();
    if trimmed.to_lowercase().starts_with("www.") {
        format!("https://{trimmed}")
    } else {
        trimmed.to_string()
    }
}

impl Launcher for SystemLauncher {
    fn open(&self, target: &str) -> Result<(), LaunchError> {
        let target = normalize_target(target);
        if target.is_empty() {
            return Err(LaunchError::EmptyTarget);
        }
        info!(%target, "Opening with system handler");
        open::that(&target).map_err(|source| LaunchError::Open { target, source })
    }
}
