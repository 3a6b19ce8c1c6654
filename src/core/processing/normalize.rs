use rayon::prelude::*;

use crate::core::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::types::{CanvasSize, ExecutionMode};

/// Element-wise maximum of widths and heights; the two maxima may come from
/// different images.
pub fn canvas_size(images: &[PixelBuffer]) -> Result<CanvasSize> {
    if images.is_empty() {
        return Err(Error::EmptyInput);
    }
    for (index, img) in images.iter().enumerate() {
        if img.width() == 0 || img.height() == 0 {
            return Err(Error::InvalidDimensions {
                index,
                width: img.width(),
                height: img.height(),
            });
        }
    }
    let width = images.iter().map(|i| i.width()).max().unwrap_or(0);
    let height = images.iter().map(|i| i.height()).max().unwrap_or(0);
    Ok(CanvasSize { width, height })
}

/// Place `image` at the origin of a transparent `canvas`-sized buffer.
/// Images already at canvas size are moved through without a copy.
pub fn pad_to_canvas(image: PixelBuffer, canvas: CanvasSize) -> Result<PixelBuffer> {
    if image.dimensions() == (canvas.width, canvas.height) {
        return Ok(image);
    }
    if image.width() > canvas.width || image.height() > canvas.height {
        return Err(Error::ExceedsCanvas {
            width: image.width(),
            height: image.height(),
            canvas_width: canvas.width,
            canvas_height: canvas.height,
        });
    }
    let mut padded = PixelBuffer::transparent(canvas.width, canvas.height)?;
    padded.blit(&image, 0, 0);
    Ok(padded)
}

/// Pad every image of the set to the shared canvas, sequentially.
pub fn normalize(images: Vec<PixelBuffer>) -> Result<(CanvasSize, Vec<PixelBuffer>)> {
    normalize_with(images, ExecutionMode::Sequential)
}

/// Pad every image of the set to the shared canvas. Order is preserved in both
/// modes; all validation runs before the first allocation.
pub fn normalize_with(
    images: Vec<PixelBuffer>,
    mode: ExecutionMode,
) -> Result<(CanvasSize, Vec<PixelBuffer>)> {
    let canvas = canvas_size(&images)?;
    let normalized = match mode {
        ExecutionMode::Sequential => images
            .into_iter()
            .map(|img| pad_to_canvas(img, canvas))
            .collect::<Result<Vec<_>>>()?,
        ExecutionMode::Parallel => images
            .into_par_iter()
            .map(|img| pad_to_canvas(img, canvas))
            .collect::<Result<Vec<_>>>()?,
    };
    Ok((canvas, normalized))
}
