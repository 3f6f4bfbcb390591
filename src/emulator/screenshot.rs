// Screenshots
//
// Writes the current RGB frame buffer as a PNG with a timestamped name.

use crate::display::framebuffer::{FrameBuffer, FRAME_HEIGHT, FRAME_WIDTH};
use chrono::Local;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors from the screenshot path
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),
    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save the frame as `<rom>_<timestamp>.png` in the working directory
///
/// Returns the path of the written file.
pub fn save_screenshot(
    frame: &FrameBuffer,
    rom_path: Option<&Path>,
) -> Result<PathBuf, ScreenshotError> {
    let stem = rom_path
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "screenshot".to_string());
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = PathBuf::from(format!("{}_{}.png", stem, timestamp));

    let file = fs::File::create(&path)?;
    let writer = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, FRAME_WIDTH as u32, FRAME_HEIGHT as u32);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(frame.bytes())?;

    Ok(path)
}
