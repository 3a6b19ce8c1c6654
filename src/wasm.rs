//! WASM API module for browser/JS interop
//!
//! Exposes the flat RGBA grid composer to JavaScript. Images arrive already
//! decoded and normalized to one size, concatenated into a single buffer.

use wasm_bindgen::prelude::*;

use crate::api::{FlatComposeRequest, compose_flat_rgba};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Crop `num_images` RGBA images of `image_width x image_height` and compose
/// the crops into a `grid_cols x grid_rows` grid.
///
/// Returns `(grid_cols * crop_width) x (grid_rows * crop_height)` RGBA bytes.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn crop_and_grid_images(
    images_rgba: &[u8],
    image_width: u32,
    image_height: u32,
    num_images: u32,
    crop_left: u32,
    crop_top: u32,
    crop_width: u32,
    crop_height: u32,
    grid_cols: u32,
    grid_rows: u32,
) -> Result<Vec<u8>, JsError> {
    let request = FlatComposeRequest {
        image_width,
        image_height,
        num_images,
        crop_left,
        crop_top,
        crop_width,
        crop_height,
        grid_cols,
        grid_rows,
    };
    compose_flat_rgba(&request, images_rgba).map_err(|e| JsError::new(&e.to_string()))
}
