use jpeg_encoder::{ColorType, Encoder};

use crate::core::buffer::PixelBuffer;
use crate::error::{Error, Result};

pub const JPEG_QUALITY: u8 = 100;

/// Encode as baseline JPEG. The alpha channel is discarded.
pub fn encode_jpeg(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let (width, height) = buffer.dimensions();
    let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(Error::Encode(format!(
                "JPEG supports at most 65535x65535 pixels, got {}x{}",
                width, height
            )));
        }
    };

    let mut out = Vec::new();
    let encoder = Encoder::new(&mut out, JPEG_QUALITY);
    encoder
        .encode(buffer.as_bytes(), w, h, ColorType::Rgba)
        .map_err(Error::encode)?;
    Ok(out)
}
