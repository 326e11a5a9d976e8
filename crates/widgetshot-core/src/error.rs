use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Navigation to {target} timed out after {}ms", timeout.as_millis())]
    NavigationTimeout { target: String, timeout: Duration },

    #[error("Selector '{selector}' did not appear within {}ms", timeout.as_millis())]
    ReadinessTimeout { selector: String, timeout: Duration },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Failed to write screenshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid target URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
