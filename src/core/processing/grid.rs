//! Row-major montage of equally sized crops into one image.
//!
//! Crops beyond `cols * rows` are dropped and cells without a crop stay
//! transparent. Both behaviors keep the output geometry a function of the grid
//! and cell size only, never of the number of inputs.
use rayon::prelude::*;

use crate::core::buffer::{CHANNELS, PixelBuffer, byte_len};
use crate::error::{Error, Result};
use crate::types::{ExecutionMode, GridSpec};

/// Cell position of crop `index`, or `None` when it falls past the grid capacity.
pub fn cell_position(index: usize, spec: GridSpec) -> Option<(u32, u32)> {
    let cols = spec.cols as usize;
    let col = index % cols;
    let row = index / cols;
    if row >= spec.rows as usize {
        return None;
    }
    Some((col as u32, row as u32))
}

/// Output dimensions for `spec` cells of `cell_width x cell_height`.
pub fn grid_dimensions(spec: GridSpec, cell_width: u32, cell_height: u32) -> Result<(u32, u32)> {
    let width = spec.cols.checked_mul(cell_width);
    let height = spec.rows.checked_mul(cell_height);
    match (width, height) {
        (Some(w), Some(h)) if byte_len(w, h).is_some() => Ok((w, h)),
        _ => Err(Error::DimensionOverflow(format!(
            "{} grid of {}x{} cells",
            spec, cell_width, cell_height
        ))),
    }
}

/// The crops that will actually be placed, with their common cell size.
fn placed_cells(crops: &[PixelBuffer], spec: GridSpec) -> Result<(&[PixelBuffer], u32, u32)> {
    spec.validate()?;
    let first = crops.first().ok_or(Error::EmptyInput)?;
    let (cell_w, cell_h) = first.dimensions();
    if cell_w == 0 || cell_h == 0 {
        return Err(Error::InvalidDimensions {
            index: 0,
            width: cell_w,
            height: cell_h,
        });
    }

    let placed = &crops[..crops.len().min(spec.capacity())];
    for (index, cell) in placed.iter().enumerate() {
        if cell.dimensions() != (cell_w, cell_h) {
            return Err(Error::CellSizeMismatch {
                index,
                width: cell.width(),
                height: cell.height(),
                expected_width: cell_w,
                expected_height: cell_h,
            });
        }
    }
    Ok((placed, cell_w, cell_h))
}

/// Compose `crops` into a `cols * cellWidth` by `rows * cellHeight` image, sequentially.
pub fn compose_grid(crops: &[PixelBuffer], spec: GridSpec) -> Result<PixelBuffer> {
    compose_grid_with(crops, spec, ExecutionMode::Sequential)
}

/// Compose `crops` into one image laid out row-major by `spec`.
///
/// In parallel mode the output is split into pixel rows; each worker owns one
/// row's byte range and copies the matching row of every cell in that band.
pub fn compose_grid_with(
    crops: &[PixelBuffer],
    spec: GridSpec,
    mode: ExecutionMode,
) -> Result<PixelBuffer> {
    let (placed, cell_w, cell_h) = placed_cells(crops, spec)?;
    let (out_w, out_h) = grid_dimensions(spec, cell_w, cell_h)?;
    let mut canvas = PixelBuffer::transparent(out_w, out_h)?;

    match mode {
        ExecutionMode::Sequential => {
            for (index, cell) in placed.iter().enumerate() {
                if let Some((col, row)) = cell_position(index, spec) {
                    canvas.blit(cell, col * cell_w, row * cell_h);
                }
            }
        }
        ExecutionMode::Parallel => {
            let stride = canvas.stride();
            let cell_bytes = cell_w as usize * CHANNELS;
            let cols = spec.cols as usize;
            canvas
                .as_mut_bytes()
                .par_chunks_mut(stride)
                .enumerate()
                .for_each(|(y, out_row)| {
                    let grid_row = y / cell_h as usize;
                    let cell_y = (y % cell_h as usize) as u32;
                    let first = grid_row * cols;
                    let band = placed.iter().skip(first).take(cols);
                    for (col, cell) in band.enumerate() {
                        let start = col * cell_bytes;
                        out_row[start..start + cell_bytes].copy_from_slice(cell.row(cell_y));
                    }
                });
        }
    }

    Ok(canvas)
}
