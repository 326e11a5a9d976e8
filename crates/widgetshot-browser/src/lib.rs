mod chrome_finder;
mod engine;
mod error;
mod launcher;
mod profile;

pub use chrome_finder::ChromeFinder;
pub use engine::{ChromiumEngine, ChromiumPage, ChromiumSession};
pub use error::{Error, Result};
pub use launcher::ChromeLauncher;
pub use profile::TempProfile;
