//! Pixel pipeline stages. Every function here is pure: no I/O, no logging,
//! and validation always happens before the first output byte is written.
pub mod crop;
pub mod grid;
pub mod normalize;
pub mod pipeline;
pub mod tiles;

pub use crop::crop;
pub use grid::{compose_grid, compose_grid_with};
pub use normalize::{canvas_size, normalize, normalize_with};
pub use pipeline::{crop_and_grid, prepare_cells};
pub use tiles::{Tile, TileNaming, split_into_tiles};
