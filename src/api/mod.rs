//! High-level, ergonomic library API: compose a grid montage or a tile split
//! from files or in-memory buffers, and the flat RGBA entry used by embedded
//! callers. Prefer these entrypoints over the low-level processing modules.
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::buffer::{PixelBuffer, byte_len};
use crate::core::params::CompositionParams;
use crate::core::processing::crop::validate_region;
use crate::core::processing::normalize::{canvas_size, normalize_with};
use crate::core::processing::pipeline::crop_and_grid;
use crate::core::processing::tiles::{Tile, TileNaming, split_into_tiles, tile_size};
use crate::error::{Error, Result};
use crate::io::loader::load_images;
use crate::io::writers::manifest::{ArchiveManifest, ManifestSource};
use crate::io::writers::{ArchiveEntry, encode, write_archive, write_archive_to_path, write_encoded};
use crate::types::{CanvasSize, CropRegion, ExecutionMode, GridSpec, OutputFormat};

/// Result of composing a grid montage in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedImage {
    pub canvas: CanvasSize,
    pub image: PixelBuffer,
    /// Images placed into grid cells
    pub placed: usize,
    /// Images past the grid capacity that were left out
    pub dropped: usize,
}

/// Result of splitting an image set into tiles in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitTiles {
    pub canvas: CanvasSize,
    pub tile_width: u32,
    pub tile_height: u32,
    /// One group per input image, in input order; names run on across groups
    pub groups: Vec<Vec<Tile>>,
}

impl SplitTiles {
    pub fn tile_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn into_tiles(self) -> Vec<Tile> {
        self.groups.into_iter().flatten().collect()
    }
}

/// Archive writing report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    pub images: usize,
    pub tiles: usize,
    pub entries: usize,
}

/// Crop every image with `params.crop` and montage the results by `params.grid`.
pub fn crop_grid_to_buffer(
    images: Vec<PixelBuffer>,
    params: &CompositionParams,
) -> Result<ComposedImage> {
    let region = params.require_crop()?;
    let total = images.len();
    let capacity = params.grid.capacity();

    let (canvas, image) = crop_and_grid(images, region, params.grid, params.mode)?;
    let placed = total.min(capacity);
    let dropped = total - placed;
    if dropped > 0 {
        warn!(
            "Grid {} holds {} image(s); dropping the last {}",
            params.grid, capacity, dropped
        );
    }
    debug!(
        "Composed {} cell(s) from canvas {} into {}x{}",
        placed,
        canvas,
        image.width(),
        image.height()
    );

    Ok(ComposedImage {
        canvas,
        image,
        placed,
        dropped,
    })
}

/// Output format implied by `output`'s extension; PNG when there is none.
pub fn format_for_output(output: &Path) -> Result<OutputFormat> {
    match output.extension() {
        None => Ok(OutputFormat::Png),
        Some(_) => OutputFormat::from_path(output).ok_or_else(|| Error::InvalidArgument {
            arg: "output",
            value: output.display().to_string(),
        }),
    }
}

/// Load `inputs` in the given order, compose the grid and encode it to `output`.
pub fn crop_grid_to_path(
    inputs: &[PathBuf],
    output: &Path,
    params: &CompositionParams,
) -> Result<ComposedImage> {
    let format = format_for_output(output)?;
    let images = load_images(inputs, params.mode)?;
    let composed = crop_grid_to_buffer(images, params)?;
    write_encoded(&composed.image, output, format)?;
    Ok(composed)
}

/// Normalize the set and split every image into `params.grid` tiles.
///
/// Tile numbering starts at 1 for the first image's first tile and continues
/// across images in input order.
pub fn crop_split_to_tiles(
    images: Vec<PixelBuffer>,
    params: &CompositionParams,
) -> Result<SplitTiles> {
    let region = params.require_crop()?;
    let spec = params.grid;
    spec.validate()?;
    let canvas = canvas_size(&images)?;
    validate_region(region, canvas.width, canvas.height)?;
    let (tile_width, tile_height) = tile_size(region, spec)?;

    if region.width % spec.cols != 0 || region.height % spec.rows != 0 {
        warn!(
            "Crop {} is not divisible by grid {}; edge pixels beyond {}x{} tiles are dropped",
            region, spec, tile_width, tile_height
        );
    }

    let (_, normalized) = normalize_with(images, params.mode)?;
    let per_image = spec.capacity();
    let naming = TileNaming::new(params.prefix.clone(), params.format);
    let split = |(i, img): (usize, &PixelBuffer)| -> Result<Vec<Tile>> {
        let naming = naming.clone().starting_at(1 + i * per_image);
        split_into_tiles(img, region, spec, &naming)
    };

    let groups = match params.mode {
        ExecutionMode::Sequential => normalized
            .iter()
            .enumerate()
            .map(split)
            .collect::<Result<Vec<_>>>()?,
        ExecutionMode::Parallel => normalized
            .par_iter()
            .enumerate()
            .map(split)
            .collect::<Result<Vec<_>>>()?,
    };

    Ok(SplitTiles {
        canvas,
        tile_width,
        tile_height,
        groups,
    })
}

/// Encode every tile (and the optional manifest) into archive entries.
fn archive_entries(
    split: &SplitTiles,
    sources: &[String],
    params: &CompositionParams,
) -> Result<Vec<ArchiveEntry>> {
    let encode_tile = |tile: &Tile| -> Result<ArchiveEntry> {
        Ok(ArchiveEntry {
            name: tile.name.clone(),
            bytes: encode(&tile.buffer, params.format)?,
        })
    };
    let tiles: Vec<&Tile> = split.groups.iter().flatten().collect();
    let mut entries = match params.mode {
        ExecutionMode::Sequential => tiles
            .iter()
            .map(|t| encode_tile(*t))
            .collect::<Result<Vec<_>>>()?,
        ExecutionMode::Parallel => tiles
            .par_iter()
            .map(|t| encode_tile(*t))
            .collect::<Result<Vec<_>>>()?,
    };

    if params.manifest {
        let mut manifest = ArchiveManifest::new(
            split.canvas,
            params.require_crop()?,
            params.grid,
            (split.tile_width, split.tile_height),
            params.format,
        );
        manifest.sources = split
            .groups
            .iter()
            .enumerate()
            .map(|(i, group)| ManifestSource {
                source: sources
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("image_{}", i + 1)),
                tiles: group.iter().map(|t| t.name.clone()).collect(),
            })
            .collect();
        entries.push(manifest.to_entry()?);
    }
    Ok(entries)
}

/// Split `images` into tiles and return the finished ZIP archive bytes.
pub fn crop_split_to_archive_bytes(
    images: Vec<PixelBuffer>,
    params: &CompositionParams,
) -> Result<Vec<u8>> {
    let split = crop_split_to_tiles(images, params)?;
    let entries = archive_entries(&split, &[], params)?;
    let cursor = write_archive(std::io::Cursor::new(Vec::new()), &entries)?;
    Ok(cursor.into_inner())
}

/// Load `inputs` in the given order, split every image into tiles and write
/// them as `{prefix}_{n}.{ext}` entries of the ZIP archive at `output`.
pub fn crop_split_to_archive(
    inputs: &[PathBuf],
    output: &Path,
    params: &CompositionParams,
) -> Result<ArchiveReport> {
    let images = load_images(inputs, params.mode)?;
    let split = crop_split_to_tiles(images, params)?;
    let sources: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
    let entries = archive_entries(&split, &sources, params)?;
    write_archive_to_path(output, &entries)?;

    let report = ArchiveReport {
        images: split.groups.len(),
        tiles: split.tile_count(),
        entries: entries.len(),
    };
    info!(
        "Split {} image(s) into {} tile(s) of {}x{}",
        report.images, report.tiles, split.tile_width, split.tile_height
    );
    Ok(report)
}

/// Parameters of the flat RGBA entry point. Every image shares one size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatComposeRequest {
    pub image_width: u32,
    pub image_height: u32,
    pub num_images: u32,
    pub crop_left: u32,
    pub crop_top: u32,
    pub crop_width: u32,
    pub crop_height: u32,
    pub grid_cols: u32,
    pub grid_rows: u32,
}

impl FlatComposeRequest {
    pub fn region(&self) -> CropRegion {
        CropRegion::new(self.crop_left, self.crop_top, self.crop_width, self.crop_height)
    }

    pub fn grid(&self) -> GridSpec {
        GridSpec::new(self.grid_cols, self.grid_rows)
    }

    /// Output dimensions of the composed grid.
    pub fn output_dimensions(&self) -> (u32, u32) {
        (
            self.grid_cols.saturating_mul(self.crop_width),
            self.grid_rows.saturating_mul(self.crop_height),
        )
    }
}

/// Compose already-normalized images passed as one concatenated RGBA buffer
/// and return the grid's raw RGBA bytes.
///
/// `images_rgba` must hold exactly `num_images` images of
/// `image_width x image_height`.
pub fn compose_flat_rgba(request: &FlatComposeRequest, images_rgba: &[u8]) -> Result<Vec<u8>> {
    if request.image_width == 0 || request.image_height == 0 {
        return Err(Error::InvalidDimensions {
            index: 0,
            width: request.image_width,
            height: request.image_height,
        });
    }
    if request.num_images == 0 {
        return Err(Error::EmptyInput);
    }

    let single = byte_len(request.image_width, request.image_height).ok_or_else(|| {
        Error::DimensionOverflow(format!(
            "{}x{} RGBA image",
            request.image_width, request.image_height
        ))
    })?;
    let expected = single
        .checked_mul(request.num_images as usize)
        .ok_or_else(|| Error::DimensionOverflow(format!("{} images", request.num_images)))?;
    if images_rgba.len() != expected {
        return Err(Error::BufferSizeMismatch {
            expected,
            actual: images_rgba.len(),
        });
    }

    let images = images_rgba
        .chunks_exact(single)
        .map(|chunk| PixelBuffer::from_raw(request.image_width, request.image_height, chunk.to_vec()))
        .collect::<Result<Vec<_>>>()?;

    let (_, composed) = crop_and_grid(
        images,
        request.region(),
        request.grid(),
        ExecutionMode::Sequential,
    )?;
    Ok(composed.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn solid(w: u32, h: u32, v: u8) -> PixelBuffer {
        PixelBuffer::filled(w, h, [v, v, v, 255]).unwrap()
    }

    fn params(crop: CropRegion, grid: GridSpec) -> CompositionParams {
        CompositionParams {
            crop: Some(crop),
            grid,
            ..CompositionParams::default()
        }
    }

    #[test]
    fn grid_reports_dropped_images() {
        let images: Vec<_> = (1..=5).map(|v| solid(4, 4, v)).collect();
        let composed =
            crop_grid_to_buffer(images, &params(CropRegion::new(0, 0, 2, 2), GridSpec::new(2, 2)))
                .unwrap();
        assert_eq!(composed.placed, 4);
        assert_eq!(composed.dropped, 1);
        assert_eq!(composed.image.dimensions(), (4, 4));
    }

    #[test]
    fn missing_crop_is_an_argument_error() {
        let err = crop_grid_to_buffer(vec![solid(2, 2, 1)], &CompositionParams::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "crop", .. }));
    }

    #[test]
    fn split_numbers_tiles_across_images() {
        let images = vec![solid(6, 4, 1), solid(3, 2, 2)];
        let split =
            crop_split_to_tiles(images, &params(CropRegion::new(0, 0, 6, 4), GridSpec::new(3, 2)))
                .unwrap();
        assert_eq!(split.canvas, CanvasSize { width: 6, height: 4 });
        assert_eq!((split.tile_width, split.tile_height), (2, 2));
        assert_eq!(split.groups.len(), 2);
        assert_eq!(split.groups[1][0].name, "tile_7.png");
        let names: Vec<_> = split.into_tiles().into_iter().map(|t| t.name).collect();
        assert_eq!(names.len(), 12);
        assert_eq!(names.last().map(String::as_str), Some("tile_12.png"));
    }

    #[test]
    fn split_modes_agree() {
        let images: Vec<_> = (0..4).map(|v| solid(8 + v as u32, 8, v)).collect();
        let mut p = params(CropRegion::new(1, 1, 6, 6), GridSpec::new(3, 3));
        let seq = crop_split_to_tiles(images.clone(), &p).unwrap();
        p.mode = ExecutionMode::Parallel;
        let par = crop_split_to_tiles(images, &p).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn split_validates_grid_before_images() {
        let err = crop_split_to_tiles(vec![], &params(CropRegion::new(0, 0, 2, 2), GridSpec::new(0, 1)))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidGridSpec { .. }));
    }

    #[test]
    fn archive_bytes_contain_tiles_and_manifest() {
        let mut p = params(CropRegion::new(0, 0, 4, 2), GridSpec::new(2, 1));
        p.manifest = true;
        p.prefix = "part".to_string();
        let bytes = crop_split_to_archive_bytes(vec![solid(4, 2, 3)], &p).unwrap();
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, ["part_1.png", "part_2.png", "manifest.json"]);

        let mut manifest = String::new();
        zip.by_name("manifest.json")
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();
        let parsed: ArchiveManifest = serde_json::from_str(&manifest).unwrap();
        assert_eq!(parsed.sources[0].source, "image_1");
        assert_eq!(parsed.tile_width, 2);
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(format_for_output(Path::new("out")).unwrap(), OutputFormat::Png);
        assert_eq!(format_for_output(Path::new("out.JPG")).unwrap(), OutputFormat::Jpeg);
        assert!(format_for_output(Path::new("out.bmp")).is_err());
    }

    #[test]
    fn flat_compose_builds_grid() {
        let request = FlatComposeRequest {
            image_width: 2,
            image_height: 2,
            num_images: 3,
            crop_left: 1,
            crop_top: 0,
            crop_width: 1,
            crop_height: 2,
            grid_cols: 2,
            grid_rows: 2,
        };
        let mut flat = Vec::new();
        for v in 1..=3u8 {
            flat.extend(solid(2, 2, v).into_raw());
        }
        let out = compose_flat_rgba(&request, &flat).unwrap();
        assert_eq!(request.output_dimensions(), (2, 4));
        let image = PixelBuffer::from_raw(2, 4, out).unwrap();
        assert_eq!(image.pixel(0, 0), [1, 1, 1, 255]);
        assert_eq!(image.pixel(1, 1), [2, 2, 2, 255]);
        assert_eq!(image.pixel(0, 3), [3, 3, 3, 255]);
        assert_eq!(image.pixel(1, 3), [0, 0, 0, 0]);
    }

    #[test]
    fn flat_compose_rejects_short_buffer() {
        let request = FlatComposeRequest {
            image_width: 2,
            image_height: 2,
            num_images: 2,
            crop_left: 0,
            crop_top: 0,
            crop_width: 2,
            crop_height: 2,
            grid_cols: 1,
            grid_rows: 2,
        };
        let err = compose_flat_rgba(&request, &[0u8; 20]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSizeMismatch {
                expected: 32,
                actual: 20
            }
        ));
    }

    #[test]
    fn flat_compose_rejects_zero_sized_images_up_front() {
        let request = FlatComposeRequest {
            image_width: 0,
            image_height: 10,
            num_images: u32::MAX,
            crop_left: 0,
            crop_top: 0,
            crop_width: 1,
            crop_height: 1,
            grid_cols: 1,
            grid_rows: 1,
        };
        assert!(matches!(
            compose_flat_rgba(&request, &[]),
            Err(Error::InvalidDimensions {
                width: 0,
                height: 10,
                ..
            })
        ));
    }

    #[test]
    fn flat_compose_reports_zero_images() {
        let request = FlatComposeRequest {
            image_width: 2,
            image_height: 2,
            num_images: 0,
            crop_left: 0,
            crop_top: 0,
            crop_width: 1,
            crop_height: 1,
            grid_cols: 1,
            grid_rows: 1,
        };
        assert!(matches!(compose_flat_rgba(&request, &[]), Err(Error::EmptyInput)));
    }
}
