use crate::Result;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Dashboard widget hosted on GitHub, rendered through the Windguru embed script
pub const WIDGET_URL: &str =
    "https://raw.githubusercontent.com/SERGIOSCAR/punta-indio-dashboard/main/widget.html";

/// Windguru forecast page for the Punta Indio spot
pub const WINDGURU_URL: &str = "https://www.windguru.cz/968903";

/// Containers that may hold the Windguru forecast grid, tried in order
pub const FORECAST_GRID_SELECTORS: &[&str] = &["table", "div.wgfc", "div#forecast"];

/// Emulated browser window size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Page condition a navigation waits for before it is considered complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    Load,
    DomContentLoaded,
    /// No network connections for at least 500ms
    NetworkIdle,
}

impl WaitUntil {
    /// Name of the Chrome page lifecycle event that signals this condition
    pub fn lifecycle_event(&self) -> &'static str {
        match self {
            WaitUntil::Load => "load",
            WaitUntil::DomContentLoaded => "DOMContentLoaded",
            WaitUntil::NetworkIdle => "networkIdle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationPolicy {
    pub wait_until: WaitUntil,
    pub timeout: Duration,
}

/// What gets loaded into the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSource {
    Url(Url),
    /// Markup written straight into the page; always waits for `load`
    Html(String),
}

impl fmt::Display for CaptureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureSource::Url(url) => write!(f, "{}", url),
            CaptureSource::Html(html) => write!(f, "inline HTML ({} bytes)", html.len()),
        }
    }
}

/// Element that marks the page as rendered, polled after the post-load delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadySelector {
    pub selector: String,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl ReadySelector {
    pub fn new(selector: impl Into<String>, timeout: Duration) -> Self {
        Self {
            selector: selector.into(),
            timeout,
            poll_interval: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    /// Capture the whole scrollable page instead of only the viewport
    pub full_page: bool,
    /// Crop to the first visible match among these selectors. When empty or
    /// nothing matches, `full_page` decides the shot.
    pub crop_to: Vec<String>,
}

impl OutputTarget {
    pub fn new(path: impl Into<PathBuf>, full_page: bool) -> Self {
        Self {
            path: path.into(),
            full_page,
            crop_to: Vec::new(),
        }
    }
}

/// Everything one capture run needs: where to go, how to wait, where to write
#[derive(Debug, Clone)]
pub struct CaptureJob {
    pub source: CaptureSource,
    pub headless: bool,
    pub viewport: Viewport,
    pub navigation: NavigationPolicy,
    /// Blind wait after navigation so asynchronous widget content can render
    pub settle_delay: Duration,
    pub ready_selector: Option<ReadySelector>,
    pub output: OutputTarget,
}

impl CaptureJob {
    /// Embedded widget page: waits for network idle, then 10s for the forecast table
    pub fn widget() -> Result<Self> {
        Ok(Self {
            source: CaptureSource::Url(Url::parse(WIDGET_URL)?),
            headless: true,
            viewport: Viewport::new(900, 1200),
            navigation: NavigationPolicy {
                wait_until: WaitUntil::NetworkIdle,
                timeout: Duration::from_secs(60),
            },
            settle_delay: Duration::from_secs(10),
            ready_selector: None,
            output: OutputTarget::new("windguru-widget.png", false),
        })
    }

    /// Full Windguru spot page, captured whole for the dashboard assets
    pub fn windguru() -> Result<Self> {
        Ok(Self {
            source: CaptureSource::Url(Url::parse(WINDGURU_URL)?),
            headless: true,
            viewport: Viewport::new(1400, 900),
            navigation: NavigationPolicy {
                wait_until: WaitUntil::DomContentLoaded,
                timeout: Duration::from_secs(30),
            },
            settle_delay: Duration::from_secs(9),
            ready_selector: None,
            output: OutputTarget::new(windguru_asset(), true),
        })
    }

    /// Windguru page in a wide, short window, cropped to the forecast grid.
    ///
    /// Falls back to the viewport when no grid container is visible.
    pub fn windguru_grid() -> Result<Self> {
        Ok(Self {
            source: CaptureSource::Url(Url::parse(WINDGURU_URL)?),
            headless: true,
            viewport: Viewport::new(1600, 500),
            navigation: NavigationPolicy {
                wait_until: WaitUntil::DomContentLoaded,
                timeout: Duration::from_secs(30),
            },
            settle_delay: Duration::from_secs(3),
            ready_selector: None,
            output: OutputTarget {
                path: windguru_asset(),
                full_page: false,
                crop_to: FORECAST_GRID_SELECTORS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
        })
    }

    /// Render a self-contained HTML document (a generated chart, say) to a full-page PNG
    pub fn from_html(html: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            source: CaptureSource::Html(html.into()),
            headless: true,
            viewport: Viewport::new(1400, 1000),
            navigation: NavigationPolicy {
                wait_until: WaitUntil::Load,
                timeout: Duration::from_secs(30),
            },
            settle_delay: Duration::ZERO,
            ready_selector: None,
            output: OutputTarget::new(path, true),
        }
    }
}

fn windguru_asset() -> PathBuf {
    PathBuf::from("docs").join("assets").join("WINDGURU.png")
}
