use crate::Result;
use std::path::Path;
use tempfile::TempDir;

/// Fresh Chrome user data directory, deleted when dropped
pub struct TempProfile {
    dir: TempDir,
}

impl TempProfile {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("widgetshot-profile-")
            .tempdir()?;

        tracing::debug!("Created temporary profile at {}", dir.path().display());

        Ok(Self { dir })
    }

    /// Get the profile directory path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
