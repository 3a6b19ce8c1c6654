//! Core building blocks: the `PixelBuffer` raster, composition parameters,
//! and the normalize / crop / grid / tile processing stages. These are the
//! primitives consumed by the high-level `api` module.
pub mod buffer;
pub mod params;
pub mod processing;
