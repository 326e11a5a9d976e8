use crate::{ChromeLauncher, Error, Result, TempProfile};
use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, EventLifecycleEvent, NavigateParams,
};
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use url::Url;
use widgetshot_core::{BrowserEngine, BrowserSession, PageHandle, Viewport, WaitUntil};

const PRESENT_CHECK: &str = "el !== null";

const VISIBLE_CHECK: &str = "{
    if (el === null) return false;
    const style = getComputedStyle(el);
    const rect = el.getBoundingClientRect();
    return style.visibility !== 'hidden' && style.display !== 'none'
        && rect.width > 0 && rect.height > 0;
}";

/// Launches a local Chrome binary and drives it over CDP
pub struct ChromiumEngine {
    chrome_path: PathBuf,
}

impl ChromiumEngine {
    pub fn new(chrome_path: PathBuf) -> Self {
        Self { chrome_path }
    }

    async fn start(&self, headless: bool) -> Result<ChromiumSession> {
        let profile = TempProfile::new()?;
        let launcher = ChromeLauncher::new(
            self.chrome_path.clone(),
            profile.path().to_path_buf(),
            headless,
        );

        let (browser, mut handler) = Browser::launch(launcher.config()?).await?;
        tracing::debug!("Chrome started from {}", self.chrome_path.display());

        // The handler must be polled for any CDP command to complete
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        Ok(ChromiumSession {
            browser,
            handler_task,
            _profile: profile,
        })
    }
}

#[async_trait]
impl BrowserEngine for ChromiumEngine {
    type Session = ChromiumSession;

    async fn launch(&self, headless: bool) -> widgetshot_core::Result<ChromiumSession> {
        Ok(self.start(headless).await?)
    }
}

/// One running Chrome process with its own temporary profile
pub struct ChromiumSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    _profile: TempProfile,
}

impl ChromiumSession {
    async fn shutdown(&mut self) -> Result<()> {
        let closed = self.browser.close().await;

        if let Err(ref e) = closed {
            tracing::warn!("Chrome did not close cleanly ({}), killing it", e);
            if let Some(Err(kill_err)) = self.browser.kill().await {
                tracing::warn!("Failed to kill Chrome: {}", kill_err);
            }
        }

        if let Some(status) = self.browser.wait().await? {
            tracing::debug!("Chrome exited with {}", status);
        }
        self.handler_task.abort();

        closed.map(|_| ()).map_err(Error::from)
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    type Page = ChromiumPage;

    async fn new_page(&self) -> widgetshot_core::Result<ChromiumPage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(Error::from)?;
        Ok(ChromiumPage { page })
    }

    async fn close(mut self) -> widgetshot_core::Result<()> {
        Ok(self.shutdown().await?)
    }
}

pub struct ChromiumPage {
    page: Page,
}

impl ChromiumPage {
    async fn load(&self, url: &Url, wait_until: WaitUntil) -> Result<()> {
        // Subscribe before navigating so no lifecycle event is missed
        let mut lifecycle = self.page.event_listener::<EventLifecycleEvent>().await?;

        let navigation = self
            .page
            .execute(NavigateParams::new(url.as_str()))
            .await?
            .result;

        if let Some(error_text) = navigation.error_text {
            return Err(Error::Navigation(format!("{}: {}", url, error_text)));
        }

        let target = wait_until.lifecycle_event();
        while let Some(event) = lifecycle.next().await {
            if event.frame_id != navigation.frame_id {
                continue;
            }
            if let Some(ref loader_id) = navigation.loader_id {
                if &event.loader_id != loader_id {
                    continue;
                }
            }

            tracing::debug!("Lifecycle event: {}", event.name);
            if event.name == target {
                return Ok(());
            }
        }

        Err(Error::Navigation(format!(
            "{}: page closed before {}",
            url, target
        )))
    }

    async fn check_selector(&self, selector: &str, check: &str) -> Result<bool> {
        self.page
            .evaluate(selector_expression(selector, check)?)
            .await?
            .into_value::<bool>()
            .map_err(|e| Error::Cdp(format!("Unexpected selector result: {}", e)))
    }
}

/// Wrap `check` in a call on `document.querySelector(selector)`
fn selector_expression(selector: &str, check: &str) -> Result<String> {
    let literal = serde_json::to_string(selector).map_err(|e| Error::Cdp(e.to_string()))?;
    Ok(format!("((el) => {})(document.querySelector({}))", check, literal))
}

#[async_trait]
impl PageHandle for ChromiumPage {
    async fn set_viewport(&self, viewport: Viewport) -> widgetshot_core::Result<()> {
        let params =
            SetDeviceMetricsOverrideParams::new(viewport.width, viewport.height, 1.0, false);
        self.page.execute(params).await.map_err(Error::from)?;
        Ok(())
    }

    async fn navigate(&self, url: &Url, wait_until: WaitUntil) -> widgetshot_core::Result<()> {
        Ok(self.load(url, wait_until).await?)
    }

    async fn set_content(&self, html: &str) -> widgetshot_core::Result<()> {
        self.page.set_content(html).await.map_err(Error::from)?;
        Ok(())
    }

    async fn selector_present(&self, selector: &str) -> widgetshot_core::Result<bool> {
        Ok(self.check_selector(selector, PRESENT_CHECK).await?)
    }

    async fn element_visible(&self, selector: &str) -> widgetshot_core::Result<bool> {
        Ok(self.check_selector(selector, VISIBLE_CHECK).await?)
    }

    async fn screenshot(&self, full_page: bool) -> widgetshot_core::Result<Vec<u8>> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(full_page)
            .build();

        let bytes = self.page.screenshot(params).await.map_err(Error::from)?;
        Ok(bytes)
    }

    async fn screenshot_element(&self, selector: &str) -> widgetshot_core::Result<Vec<u8>> {
        let element = self.page.find_element(selector).await.map_err(Error::from)?;
        let bytes = element
            .screenshot(CaptureScreenshotFormat::Png)
            .await
            .map_err(Error::from)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_expression_quotes_selector() {
        let expr = selector_expression("div:not([data-x=\"a'b\"])", PRESENT_CHECK).unwrap();

        assert_eq!(
            expr,
            r#"((el) => el !== null)(document.querySelector("div:not([data-x=\"a'b\"])"))"#
        );
    }

    #[test]
    fn test_visibility_check_handles_missing_element() {
        let expr = selector_expression("div#forecast", VISIBLE_CHECK).unwrap();

        assert!(expr.starts_with("((el) => {"));
        assert!(expr.contains("if (el === null) return false;"));
        assert!(expr.ends_with("(document.querySelector(\"div#forecast\"))"));
    }
}
