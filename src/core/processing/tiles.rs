//! Split one crop into a grid of equally sized, named tiles.
//!
//! Tile size is `region.width / cols` by `region.height / rows` (integer
//! division). Remainder pixels at the right and bottom edge are truncated, so
//! callers that need lossless tiling pick crop sizes divisible by the grid.
use serde::{Deserialize, Serialize};

use crate::core::buffer::PixelBuffer;
use crate::core::processing::crop::{crop, validate_region};
use crate::error::{Error, Result};
use crate::types::{CropRegion, GridSpec, OutputFormat};

/// Naming scheme `{prefix}_{index}.{extension}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileNaming {
    pub prefix: String,
    pub extension: String,
    /// Index of the first tile; later tiles count up row-major.
    pub first_index: usize,
}

impl TileNaming {
    pub fn new(prefix: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            prefix: prefix.into(),
            extension: format.extension().to_string(),
            first_index: 1,
        }
    }

    pub fn starting_at(mut self, first_index: usize) -> Self {
        self.first_index = first_index;
        self
    }

    pub fn name(&self, offset: usize) -> String {
        format!("{}_{}.{}", self.prefix, self.first_index + offset, self.extension)
    }
}

impl Default for TileNaming {
    fn default() -> Self {
        Self::new("tile", OutputFormat::Png)
    }
}

/// A named tile ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub name: String,
    pub buffer: PixelBuffer,
}

/// Size of one tile when `region` is split by `spec`.
pub fn tile_size(region: CropRegion, spec: GridSpec) -> Result<(u32, u32)> {
    spec.validate()?;
    let tile_w = region.width / spec.cols;
    let tile_h = region.height / spec.rows;
    if tile_w == 0 || tile_h == 0 {
        return Err(Error::DegenerateTile {
            region_width: region.width,
            region_height: region.height,
            cols: spec.cols,
            rows: spec.rows,
        });
    }
    Ok((tile_w, tile_h))
}

/// Crop `region` from `image` and cut it into `spec.cols * spec.rows` tiles,
/// numbered row-major from `naming.first_index`.
pub fn split_into_tiles(
    image: &PixelBuffer,
    region: CropRegion,
    spec: GridSpec,
    naming: &TileNaming,
) -> Result<Vec<Tile>> {
    spec.validate()?;
    validate_region(region, image.width(), image.height())?;
    let (tile_w, tile_h) = tile_size(region, spec)?;

    let cropped = crop(image, region)?;
    let mut tiles = Vec::with_capacity(spec.capacity());
    for row in 0..spec.rows {
        for col in 0..spec.cols {
            let cell = CropRegion::new(col * tile_w, row * tile_h, tile_w, tile_h);
            let buffer = crop(&cropped, cell)?;
            tiles.push(Tile {
                name: naming.name(tiles.len()),
                buffer,
            });
        }
    }
    Ok(tiles)
}
