//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Validation failures of the pixel pipeline come first; the remaining variants
//! wrap decoder, encoder, archive and I/O failures from the orchestration layers.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No images to process")]
    EmptyInput,

    #[error("Image {index} has invalid dimensions {width}x{height}; both must be greater than 0")]
    InvalidDimensions { index: usize, width: u32, height: u32 },

    #[error("Crop region {region} has zero area; width and height must be greater than 0")]
    EmptyCropRegion { region: crate::types::CropRegion },

    #[error(
        "Image of {width}x{height} does not fit inside a {canvas_width}x{canvas_height} canvas"
    )]
    ExceedsCanvas {
        width: u32,
        height: u32,
        canvas_width: u32,
        canvas_height: u32,
    },

    #[error(
        "Crop region {region} does not fit inside a {canvas_width}x{canvas_height} canvas"
    )]
    CropOutOfBounds {
        region: crate::types::CropRegion,
        canvas_width: u32,
        canvas_height: u32,
    },

    #[error("Invalid grid {cols}x{rows}; columns and rows must be at least 1")]
    InvalidGridSpec { cols: u32, rows: u32 },

    #[error(
        "Crop {region_width}x{region_height} split into {cols}x{rows} yields an empty tile"
    )]
    DegenerateTile {
        region_width: u32,
        region_height: u32,
        cols: u32,
        rows: u32,
    },

    #[error(
        "Cell {index} is {width}x{height} but the grid expects {expected_width}x{expected_height}"
    )]
    CellSizeMismatch {
        index: usize,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Output dimensions overflow: {0}")]
    DimensionOverflow(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }

    pub fn encode<E: std::fmt::Display>(e: E) -> Self {
        Error::Encode(e.to_string())
    }
}
