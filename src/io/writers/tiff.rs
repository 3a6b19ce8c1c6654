use std::io::Cursor;

use tiff::encoder::{TiffEncoder, colortype};

use crate::core::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// Encode as uncompressed 8-bit RGBA TIFF.
pub fn encode_tiff(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut cursor).map_err(Error::encode)?;
        encoder
            .write_image::<colortype::RGBA8>(buffer.width(), buffer.height(), buffer.as_bytes())
            .map_err(Error::encode)?;
    }
    Ok(cursor.into_inner())
}
