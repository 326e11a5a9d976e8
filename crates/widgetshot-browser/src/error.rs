use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

impl From<Error> for widgetshot_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Navigation(msg) => widgetshot_core::Error::Navigation(msg),
            Error::Io(e) => widgetshot_core::Error::Io(e),
            Error::Browser(msg) => widgetshot_core::Error::Browser(msg),
            Error::Cdp(msg) => widgetshot_core::Error::Browser(format!("CDP: {}", msg)),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
