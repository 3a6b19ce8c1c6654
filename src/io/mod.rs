//! I/O layer: decoding image files into `PixelBuffer`s, and `writers` for
//! PNG/JPEG/TIFF encodings, tile archives and the JSON manifest sidecar.
pub mod loader;
pub use loader::{decode_image, load_image, load_images};

pub mod writers;
pub use writers::{encode, write_encoded};
