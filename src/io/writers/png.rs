use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use crate::core::buffer::PixelBuffer;
use crate::error::Result;

/// Encode as 8-bit RGBA PNG, alpha preserved.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        buffer.as_bytes(),
        buffer.width(),
        buffer.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}
