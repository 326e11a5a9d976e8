use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Executable names tried on `PATH` when no install location matches
const PATH_CANDIDATES: &[&str] = &["google-chrome", "chromium", "chromium-browser", "chrome"];

#[cfg(target_os = "macos")]
const INSTALL_LOCATIONS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
];

#[cfg(target_os = "linux")]
const INSTALL_LOCATIONS: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
];

#[cfg(target_os = "windows")]
const INSTALL_LOCATIONS: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const INSTALL_LOCATIONS: &[&str] = &[];

/// Resolves which Chrome binary a capture should launch.
///
/// An explicit path is authoritative: if it is unusable the lookup fails
/// instead of silently picking another browser.
pub struct ChromeFinder {
    custom_path: Option<PathBuf>,
}

impl ChromeFinder {
    pub fn new(custom_path: Option<PathBuf>) -> Self {
        Self { custom_path }
    }

    pub fn find(&self) -> Result<PathBuf> {
        if let Some(path) = &self.custom_path {
            return usable_binary(path);
        }

        let installed = INSTALL_LOCATIONS
            .iter()
            .map(Path::new)
            .find_map(|path| usable_binary(path).ok());
        if let Some(path) = installed {
            tracing::debug!("Found Chrome at install location {}", path.display());
            return Ok(path);
        }

        let on_path = PATH_CANDIDATES
            .iter()
            .find_map(|name| which::which(name).ok());
        if let Some(path) = on_path {
            tracing::debug!("Found Chrome on PATH at {}", path.display());
            return Ok(path);
        }

        Err(Error::Browser(format!(
            "Chrome not found. Looked in [{}] and for {} on PATH. \
             Use --chrome-path or WIDGETSHOT_CHROME to point at a browser binary.",
            INSTALL_LOCATIONS.join(", "),
            PATH_CANDIDATES.join("/")
        )))
    }
}

fn usable_binary(path: &Path) -> Result<PathBuf> {
    let metadata = std::fs::metadata(path)
        .map_err(|_| Error::Browser(format!("Chrome not found at: {}", path.display())))?;

    if !metadata.is_file() {
        return Err(Error::Browser(format!(
            "Chrome path is not a file: {}",
            path.display()
        )));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(Error::Browser(format!(
                "Chrome binary not executable: {}",
                path.display()
            )));
        }
    }

    Ok(path.to_path_buf())
}
