use crate::Result;
use image::ImageReader;
use std::io::{Cursor, Write};
use std::path::Path;

pub struct ScreenshotWriter;

impl ScreenshotWriter {
    /// Write image bytes to `path`, replacing any existing file.
    ///
    /// Bytes go to a temp file in the same directory which is then renamed
    /// over the target, so readers never see a half-written image and no temp
    /// file survives a failed write.
    pub fn to_file(bytes: &[u8], path: &Path) -> Result<()> {
        tracing::debug!("Writing screenshot to: {}", path.display());

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;

        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());

        Ok(())
    }
}

/// Pixel size of an encoded image, read from its header without decoding
pub fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

#[cfg(test)]
pub(crate) fn test_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbaImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}
