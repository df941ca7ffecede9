//! Removal of generated files once they have been sent.

use std::mem;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Deletes a file, logging instead of failing.
pub async fn remove_artifact(path: PathBuf) {
    match tokio::fs::remove_file(&path).await {
        Ok(()) => debug!(file = %path.display(), "Removed temporary file"),
        Err(e) => warn!(file = %path.display(), "Could not remove temporary file: {}", e),
    }
}

fn remove_artifact_blocking(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(file = %path.display(), "Removed temporary file"),
        Err(e) => warn!(file = %path.display(), "Could not remove temporary file: {}", e),
    }
}

/// Schedules deletion of a file when dropped.
///
/// Owned by the response body, so the drop happens once the body has been
/// sent or abandoned.
#[derive(Debug)]
pub struct CleanupGuard {
    path: PathBuf,
}

impl CleanupGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let path = mem::take(&mut self.path);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(remove_artifact(path));
            }
            Err(_) => remove_artifact_blocking(&path),
        }
    }
}
