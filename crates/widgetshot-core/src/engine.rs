//! Capabilities the capture procedure needs from a browser automation backend.

use crate::{Result, Viewport, WaitUntil};
use async_trait::async_trait;
use url::Url;

/// Starts browser processes
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    type Session: BrowserSession;

    async fn launch(&self, headless: bool) -> Result<Self::Session>;
}

/// A running browser process owned by one capture run
#[async_trait]
pub trait BrowserSession: Send + Sync {
    type Page: PageHandle;

    async fn new_page(&self) -> Result<Self::Page>;

    /// Terminate the browser process and release everything it holds
    async fn close(self) -> Result<()>;
}

#[async_trait]
pub trait PageHandle: Send + Sync {
    async fn set_viewport(&self, viewport: Viewport) -> Result<()>;

    /// Load `url` and resolve once `wait_until` is reached.
    ///
    /// No timeout is applied here; the caller bounds the whole call.
    async fn navigate(&self, url: &Url, wait_until: WaitUntil) -> Result<()>;

    /// Replace the document with `html` and resolve once it has loaded
    async fn set_content(&self, html: &str) -> Result<()>;

    async fn selector_present(&self, selector: &str) -> Result<bool>;

    /// True when the first match for `selector` has a non-empty, rendered box
    async fn element_visible(&self, selector: &str) -> Result<bool>;

    /// PNG bytes of the viewport, or of the whole scrollable page
    async fn screenshot(&self, full_page: bool) -> Result<Vec<u8>>;

    /// PNG bytes clipped to the first match for `selector`
    async fn screenshot_element(&self, selector: &str) -> Result<Vec<u8>>;
}
