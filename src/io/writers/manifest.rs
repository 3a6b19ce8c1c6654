//! `manifest.json` sidecar describing how a tile archive was produced.
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io::writers::archive::ArchiveEntry;
use crate::types::{CanvasSize, CropRegion, GridSpec, OutputFormat};

pub const MANIFEST_NAME: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSource {
    /// Source label, usually the input path
    pub source: String,
    /// Tile entry names cut from this source, row-major
    pub tiles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveManifest {
    pub generator: String,
    pub generated: String,
    pub canvas: CanvasSize,
    pub crop: CropRegion,
    pub grid: GridSpec,
    pub tile_width: u32,
    pub tile_height: u32,
    pub format: OutputFormat,
    pub sources: Vec<ManifestSource>,
}

impl ArchiveManifest {
    pub fn new(
        canvas: CanvasSize,
        crop: CropRegion,
        grid: GridSpec,
        tile_size: (u32, u32),
        format: OutputFormat,
    ) -> Self {
        Self {
            generator: format!("sazan {}", env!("CARGO_PKG_VERSION")),
            generated: chrono::Utc::now().to_rfc3339(),
            canvas,
            crop,
            grid,
            tile_width: tile_size.0,
            tile_height: tile_size.1,
            format,
            sources: Vec::new(),
        }
    }

    pub fn tile_count(&self) -> usize {
        self.sources.iter().map(|s| s.tiles.len()).sum()
    }

    pub fn to_entry(&self) -> Result<ArchiveEntry> {
        Ok(ArchiveEntry {
            name: MANIFEST_NAME.to_string(),
            bytes: serde_json::to_vec_pretty(self)?,
        })
    }
}
