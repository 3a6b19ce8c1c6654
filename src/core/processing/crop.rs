use crate::core::buffer::{CHANNELS, PixelBuffer};
use crate::error::{Error, Result};
use crate::types::CropRegion;

/// Check `region` against a `width x height` canvas. Out-of-bounds regions are
/// an error and never clamped, so every image of a set yields the same cell size.
pub fn validate_region(region: CropRegion, width: u32, height: u32) -> Result<()> {
    if region.is_empty() {
        return Err(Error::EmptyCropRegion { region });
    }
    if !region.fits_within(width, height) {
        return Err(Error::CropOutOfBounds {
            region,
            canvas_width: width,
            canvas_height: height,
        });
    }
    Ok(())
}

/// Extract `region` from `image`: output pixel `(x, y)` is source pixel
/// `(region.left + x, region.top + y)`.
pub fn crop(image: &PixelBuffer, region: CropRegion) -> Result<PixelBuffer> {
    validate_region(region, image.width(), image.height())?;

    let row_bytes = region.width as usize * CHANNELS;
    let x_off = region.left as usize * CHANNELS;
    let mut data = Vec::with_capacity(row_bytes * region.height as usize);
    for y in region.top..region.top + region.height {
        data.extend_from_slice(&image.row(y)[x_off..x_off + row_bytes]);
    }
    PixelBuffer::from_raw(region.width, region.height, data)
}
