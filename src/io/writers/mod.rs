//! Encoders and sinks for composed buffers and tiles.
pub mod archive;
pub mod jpeg;
pub mod manifest;
pub mod png;
pub mod tiff;

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::core::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::types::OutputFormat;

pub use archive::{ArchiveEntry, write_archive, write_archive_to_path};
pub use manifest::ArchiveManifest;

/// Encode `buffer` in `format`.
pub fn encode(buffer: &PixelBuffer, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Png => png::encode_png(buffer),
        OutputFormat::Jpeg => jpeg::encode_jpeg(buffer),
        OutputFormat::Tiff => tiff::encode_tiff(buffer),
    }
}

/// Encode `buffer` and write it to `output`. The file only appears at `output`
/// once fully written; on failure any existing file there is left untouched.
pub fn write_encoded(buffer: &PixelBuffer, output: &Path, format: OutputFormat) -> Result<()> {
    let bytes = encode(buffer, format)?;
    let mut tmp = archive::temp_file_beside(output)?;
    tmp.write_all(&bytes)?;
    tmp.persist(output).map_err(|e| Error::Io(e.error))?;
    info!(
        "Wrote {}x{} {} ({} bytes) to {:?}",
        buffer.width(),
        buffer.height(),
        format,
        bytes.len(),
        output
    );
    Ok(())
}
