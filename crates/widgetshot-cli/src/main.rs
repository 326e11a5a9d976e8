use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use widgetshot_cli::{Preset, commands};

#[derive(Parser)]
#[command(name = "widgetshot")]
#[command(author, version)]
#[command(
    about = "Capture the Punta Indio forecast widget as a PNG using headless Chrome",
    long_about = "widgetshot launches a throwaway headless Chrome, loads a compiled-in forecast page, \
                  waits for it to render and saves a screenshot next to the dashboard."
)]
struct Cli {
    /// Which compiled-in page to capture
    #[arg(value_enum, default_value_t = Preset::Widget)]
    preset: Preset,

    /// Path to the Chrome or Chromium binary (auto-detected when omitted)
    #[arg(long, env = "WIDGETSHOT_CHROME", value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match commands::capture::execute(cli.preset, cli.chrome_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // `{:#}` keeps the whole context chain on one line
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_filter(verbose)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "widgetshot_cli=debug,widgetshot_core=debug,widgetshot_browser=debug"
    } else {
        "widgetshot_cli=info,widgetshot_core=info,widgetshot_browser=info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_logs_every_crate_at_info() {
        for directive in log_filter(false).split(',') {
            assert!(directive.ends_with("=info"), "{}", directive);
        }
        assert!(log_filter(false).contains("widgetshot_browser=info"));
        assert!(log_filter(true).contains("widgetshot_browser=debug"));
    }
}
