use crate::engine::{BrowserEngine, BrowserSession, PageHandle};
use crate::output::{ScreenshotWriter, png_dimensions};
use crate::{CaptureJob, CaptureSource, Error, ReadySelector, Result};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Outcome of a successful capture run
#[derive(Debug, Clone)]
pub struct CaptureReport {
    pub path: PathBuf,
    pub bytes: usize,
    /// Pixel size of the written image, when it could be read
    pub dimensions: Option<(u32, u32)>,
    /// Selector the shot was cropped to, if any matched
    pub cropped_to: Option<String>,
    pub elapsed: Duration,
}

struct Shot {
    bytes: usize,
    dimensions: Option<(u32, u32)>,
    cropped_to: Option<String>,
}

/// Run one capture: launch, load, wait, screenshot, close.
///
/// The browser is closed exactly once whether or not the steps in between
/// succeed. When a step fails its error is returned and a close failure is
/// only logged.
pub async fn run<E: BrowserEngine>(engine: &E, job: &CaptureJob) -> Result<CaptureReport> {
    let started = Instant::now();

    tracing::info!("Launching browser (headless: {})", job.headless);
    let session = engine.launch(job.headless).await?;

    let outcome = capture_with(&session, job).await;

    tracing::debug!("Closing browser");
    let closed = session.close().await;

    let shot = match (outcome, closed) {
        (Ok(shot), Ok(())) => shot,
        (Ok(_), Err(e)) => return Err(e),
        (Err(e), closed) => {
            if let Err(close_err) = closed {
                tracing::warn!("Failed to close browser after error: {}", close_err);
            }
            return Err(e);
        }
    };

    let report = CaptureReport {
        path: job.output.path.clone(),
        bytes: shot.bytes,
        dimensions: shot.dimensions,
        cropped_to: shot.cropped_to,
        elapsed: started.elapsed(),
    };

    tracing::info!(
        "Captured {} in {:.1}s",
        report.path.display(),
        report.elapsed.as_secs_f64()
    );

    Ok(report)
}

async fn capture_with<S: BrowserSession>(session: &S, job: &CaptureJob) -> Result<Shot> {
    let page = session.new_page().await?;

    tracing::debug!(
        "Setting viewport to {}x{}",
        job.viewport.width,
        job.viewport.height
    );
    page.set_viewport(job.viewport).await?;

    let policy = job.navigation;
    let load = async {
        match &job.source {
            CaptureSource::Url(url) => {
                tracing::info!(
                    "Navigating to {} (waiting for {}, timeout {}s)",
                    url,
                    policy.wait_until.lifecycle_event(),
                    policy.timeout.as_secs()
                );
                page.navigate(url, policy.wait_until).await
            }
            CaptureSource::Html(html) => {
                tracing::info!("Loading {}", job.source);
                page.set_content(html).await
            }
        }
    };
    tokio::time::timeout(policy.timeout, load)
        .await
        .map_err(|_| Error::NavigationTimeout {
            target: job.source.to_string(),
            timeout: policy.timeout,
        })??;

    tracing::info!(
        "Page loaded, waiting {}s for content to render",
        job.settle_delay.as_secs_f64()
    );
    tokio::time::sleep(job.settle_delay).await;

    if let Some(ready) = &job.ready_selector {
        wait_for_selector(&page, ready).await?;
    }

    let cropped_to = first_visible(&page, &job.output.crop_to).await?;
    let bytes = match &cropped_to {
        Some(selector) => {
            tracing::debug!("Taking screenshot of '{}'", selector);
            page.screenshot_element(selector).await?
        }
        None => {
            if !job.output.crop_to.is_empty() {
                tracing::info!("No crop target visible, capturing the viewport instead");
            }
            tracing::debug!("Taking screenshot (full page: {})", job.output.full_page);
            page.screenshot(job.output.full_page).await?
        }
    };

    let dimensions = png_dimensions(&bytes);
    if let Some((width, height)) = dimensions {
        tracing::debug!("Screenshot is {}x{}", width, height);
    }

    ScreenshotWriter::to_file(&bytes, &job.output.path)?;

    Ok(Shot {
        bytes: bytes.len(),
        dimensions,
        cropped_to,
    })
}

/// First selector whose element is rendered, checked in order
async fn first_visible<P: PageHandle>(page: &P, candidates: &[String]) -> Result<Option<String>> {
    for selector in candidates {
        if page.element_visible(selector).await? {
            return Ok(Some(selector.clone()));
        }
        tracing::debug!("Crop candidate '{}' not visible", selector);
    }
    Ok(None)
}

async fn wait_for_selector<P: PageHandle>(page: &P, ready: &ReadySelector) -> Result<()> {
    tracing::debug!("Waiting for selector '{}'", ready.selector);

    let poll = async {
        loop {
            if page.selector_present(&ready.selector).await? {
                return Ok::<(), Error>(());
            }
            tokio::time::sleep(ready.poll_interval).await;
        }
    };

    tokio::time::timeout(ready.timeout, poll)
        .await
        .map_err(|_| Error::ReadinessTimeout {
            selector: ready.selector.clone(),
            timeout: ready.timeout,
        })?
}
