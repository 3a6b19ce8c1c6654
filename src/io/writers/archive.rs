use std::io::{Seek, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Error, Result};

/// One named file inside a tile archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Write `entries` as a deflate-compressed ZIP into `writer`, in order.
pub fn write_archive<W: Write + Seek>(writer: W, entries: &[ArchiveEntry]) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for entry in entries {
        debug!("Adding {} ({} bytes)", entry.name, entry.bytes.len());
        zip.start_file(entry.name.as_str(), options)?;
        zip.write_all(&entry.bytes)?;
    }
    Ok(zip.finish()?)
}

/// Temporary file in the directory of `output`, so `persist` is a rename.
pub(crate) fn temp_file_beside(output: &Path) -> Result<NamedTempFile> {
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    Ok(NamedTempFile::new_in(dir)?)
}

/// Write the archive next to `output` and move it into place only once it is
/// complete; a failure never leaves a truncated archive at `output`.
pub fn write_archive_to_path(output: &Path, entries: &[ArchiveEntry]) -> Result<()> {
    let mut tmp = temp_file_beside(output)?;
    write_archive(tmp.as_file_mut(), entries)?;
    tmp.persist(output).map_err(|e| Error::Io(e.error))?;
    info!("Wrote {} archive entries to {:?}", entries.len(), output);
    Ok(())
}
