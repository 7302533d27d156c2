//! PNG encoding of rendered charts.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};

use crate::Result;

/// MIME type of [`encode_png`] output
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Encode an RGB canvas as PNG bytes.
pub fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    canvas.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
