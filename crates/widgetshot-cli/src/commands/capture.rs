use crate::Preset;
use anyhow::{Context, Result};
use std::path::PathBuf;
use widgetshot_browser::{ChromeFinder, ChromiumEngine};

pub fn execute(preset: Preset, chrome_path: Option<PathBuf>) -> Result<()> {
    let job = preset
        .job()
        .with_context(|| format!("Invalid '{}' preset", preset.as_str()))?;

    let chrome_binary = ChromeFinder::new(chrome_path)
        .find()
        .context("Cannot start a browser")?;
    tracing::info!("Using Chrome at {}", chrome_binary.display());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        let engine = ChromiumEngine::new(chrome_binary);
        widgetshot_core::run(&engine, &job)
            .await
            .with_context(|| format!("Failed to capture {}", job.source))
    });

    runtime.shutdown_timeout(std::time::Duration::from_millis(100));

    let report = result?;
    if let Some(selector) = &report.cropped_to {
        tracing::info!("Cropped to {}", selector);
    }
    match report.dimensions {
        Some((width, height)) => tracing::info!(
            "Saved {} ({}x{}, {} bytes)",
            report.path.display(),
            width,
            height,
            report.bytes
        ),
        None => tracing::info!("Saved {} ({} bytes)", report.path.display(), report.bytes),
    }

    Ok(())
}
