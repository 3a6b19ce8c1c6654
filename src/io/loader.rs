use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::core::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::types::ExecutionMode;

/// Decode an in-memory encoded image (any format the `image` crate reads) to RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_raw(width, height, rgba.into_raw())
}

/// Open and decode one image file to RGBA8.
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let rgba = image::open(path)
        .map_err(|e| Error::external(format!("Failed to open image '{}': {}", path.display(), e)))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    debug!("Loaded {:?}: {}x{}", path, width, height);
    PixelBuffer::from_raw(width, height, rgba.into_raw())
}

/// Load every path in order. Decoding may run on the rayon pool; the returned
/// set always follows the order of `paths`.
pub fn load_images(paths: &[PathBuf], mode: ExecutionMode) -> Result<Vec<PixelBuffer>> {
    info!("Loading {} image(s) ({} mode)", paths.len(), mode);
    match mode {
        ExecutionMode::Sequential => paths.iter().map(|p| load_image(p)).collect(),
        ExecutionMode::Parallel => paths.par_iter().map(|p| load_image(p)).collect(),
    }
}
