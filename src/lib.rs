#![doc = r#"
sazan: crop a set of images and compose the crops into a grid, or split them into tiles.

Every input image is first padded with transparent pixels to a shared canvas (the maximum
width and height across the set, content anchored at the top-left). One crop region is then
cut from each normalized image, and the crops are either laid out row-major in a
`cols x rows` grid or split into `cols x rows` tiles that are encoded into a ZIP archive.
The crate powers the `sazan` CLI and, with the `wasm` feature, a browser entry point.

Add dependency
--------------
```toml
[dependencies]
sazan = "0.2"
```

Quick start: compose a grid from files
--------------------------------------
```rust,no_run
use std::path::{Path, PathBuf};
use sazan::{crop_grid_to_path, CompositionParams, CropRegion, GridSpec};

fn main() -> sazan::Result<()> {
    let params = CompositionParams {
        crop: Some(CropRegion::new(0, 0, 50, 50)),
        grid: GridSpec::new(2, 2),
        ..CompositionParams::default()
    };
    let inputs: Vec<PathBuf> = ["a.png", "b.png", "c.png", "d.png"]
        .iter()
        .map(PathBuf::from)
        .collect();

    let composed = crop_grid_to_path(&inputs, Path::new("result.png"), &params)?;
    println!("canvas {} -> {}x{}", composed.canvas, composed.image.width(), composed.image.height());
    Ok(())
}
```

Work in memory
--------------
```rust
use sazan::{crop_grid_to_buffer, CompositionParams, CropRegion, GridSpec, PixelBuffer};

fn main() -> sazan::Result<()> {
    let images = vec![
        PixelBuffer::filled(100, 100, [255, 0, 0, 255])?,
        PixelBuffer::filled(200, 150, [0, 255, 0, 255])?,
    ];
    let params = CompositionParams {
        crop: Some("50x50+0+0".parse()?),
        grid: "2x1".parse()?,
        ..CompositionParams::default()
    };
    let composed = crop_grid_to_buffer(images, &params)?;
    assert_eq!(composed.image.dimensions(), (100, 50));
    Ok(())
}
```

Split into a tile archive
-------------------------
```rust,no_run
use std::path::{Path, PathBuf};
use sazan::{crop_split_to_archive, CompositionParams, CropRegion, ExecutionMode, GridSpec, OutputFormat};

fn main() -> sazan::Result<()> {
    let params = CompositionParams {
        crop: Some(CropRegion::new(0, 0, 300, 200)),
        grid: GridSpec::new(3, 2),
        format: OutputFormat::Png,
        prefix: "tile".to_string(),
        mode: ExecutionMode::Parallel,
        manifest: true,
    };
    let report = crop_split_to_archive(&[PathBuf::from("scan.png")], Path::new("result.zip"), &params)?;
    println!("tiles={} entries={}", report.tiles, report.entries);
    Ok(())
}
```

Error handling
--------------
All public functions return `sazan::Result<T>`. Validation failures are reported before any
output is written; match on `sazan::Error` to handle specific cases.

```rust
use sazan::{crop_grid_to_buffer, CompositionParams, CropRegion, Error, GridSpec, PixelBuffer};

let params = CompositionParams {
    crop: Some(CropRegion::new(90, 0, 20, 20)),
    grid: GridSpec::new(1, 1),
    ..CompositionParams::default()
};
let images = vec![PixelBuffer::transparent(100, 100).unwrap()];
match crop_grid_to_buffer(images, &params) {
    Err(Error::CropOutOfBounds { canvas_width, .. }) => assert_eq!(canvas_width, 100),
    other => panic!("unexpected: {other:?}"),
}
```

Feature flags
-------------
- `wasm`: builds the `wasm` module with `wasm-bindgen` bindings.

Useful modules
--------------
- [`api`]: high-level, ergonomic entry points.
- [`core`]: pixel buffer and the pure normalize/crop/grid/tile stages.
- [`types`]: crop region, grid spec, canvas size and format enums.
- [`io`]: image decoding, encoders and the ZIP archive writer.
- [`error`]: crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// WASM bindings (only available with wasm feature)
#[cfg(feature = "wasm")]
pub mod wasm;

// Curated public API surface
// Types
pub use core::buffer::PixelBuffer;
pub use core::params::CompositionParams;
pub use core::processing::{Tile, TileNaming};
pub use error::{Error, Result};
pub use types::{CanvasSize, CropRegion, ExecutionMode, GridSpec, OutputFormat};

// Pipeline stages
pub use core::processing::{
    canvas_size, compose_grid, compose_grid_with, crop, crop_and_grid, normalize,
    normalize_with, split_into_tiles,
};

// High-level API re-exports
pub use api::{
    ArchiveReport, ComposedImage, FlatComposeRequest, SplitTiles, compose_flat_rgba,
    crop_grid_to_buffer, crop_grid_to_path, crop_split_to_archive, crop_split_to_archive_bytes,
    crop_split_to_tiles,
};
