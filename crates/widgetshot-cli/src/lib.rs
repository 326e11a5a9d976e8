use clap::ValueEnum;
use widgetshot_core::CaptureJob;

pub mod commands;

/// Compiled-in capture targets
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Preset {
    /// Dashboard widget page, viewport only
    #[default]
    Widget,
    /// Windguru spot page, full page into docs/assets
    Windguru,
    /// Windguru spot page cropped to the forecast grid
    WindguruGrid,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Widget => "widget",
            Preset::Windguru => "windguru",
            Preset::WindguruGrid => "windguru-grid",
        }
    }

    pub fn job(&self) -> widgetshot_core::Result<CaptureJob> {
        match self {
            Preset::Widget => CaptureJob::widget(),
            Preset::Windguru => CaptureJob::windguru(),
            Preset::WindguruGrid => CaptureJob::windguru_grid(),
        }
    }
}
