use crate::{Error, Result};
use chromiumoxide::browser::BrowserConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Upper bound for a single CDP command; navigation waits are bounded by the caller
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Builds the launch configuration for a throwaway Chrome process
pub struct ChromeLauncher {
    chrome_path: PathBuf,
    profile_path: PathBuf,
    headless: bool,
}

impl ChromeLauncher {
    pub fn new(chrome_path: PathBuf, profile_path: PathBuf, headless: bool) -> Self {
        Self {
            chrome_path,
            profile_path,
            headless,
        }
    }

    /// Assemble the chromiumoxide launch configuration
    pub fn config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .chrome_executable(&self.chrome_path)
            .user_data_dir(&self.profile_path)
            .request_timeout(REQUEST_TIMEOUT)
            .args(self.build_args());

        if !self.headless {
            builder = builder.with_head();
        }

        builder
            .build()
            .map_err(|e| Error::Browser(format!("Invalid Chrome configuration: {}", e)))
    }

    /// Extra Chrome command-line arguments on top of chromiumoxide's defaults
    fn build_args(&self) -> Vec<String> {
        vec![
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--hide-scrollbars".to_string(),
            "--mute-audio".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher(headless: bool) -> ChromeLauncher {
        ChromeLauncher::new(
            PathBuf::from("/usr/bin/google-chrome"),
            PathBuf::from("/tmp/profile"),
            headless,
        )
    }

    #[test]
    fn test_chrome_launcher_builds_args() {
        let args = launcher(true).build_args();

        assert!(args.contains(&"--no-first-run".to_string()));
        assert!(args.contains(&"--no-default-browser-check".to_string()));
        assert!(args.contains(&"--hide-scrollbars".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("--user-data-dir=")));
    }

    #[test]
    fn test_chrome_launcher_config_builds_with_explicit_binary() {
        assert!(launcher(true).config().is_ok());
        assert!(launcher(false).config().is_ok());
    }
}
