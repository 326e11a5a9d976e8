pub mod capture;
pub mod engine;
pub mod error;
pub mod job;
pub mod output;

pub use capture::{CaptureReport, run};
pub use engine::{BrowserEngine, BrowserSession, PageHandle};
pub use error::{Error, Result};
pub use job::{
    CaptureJob, CaptureSource, NavigationPolicy, OutputTarget, ReadySelector, Viewport, WaitUntil,
};
