//! Shared value types used across sazan.
//! Includes `CropRegion`, `GridSpec`, `CanvasSize`, the tile `OutputFormat`
//! and the `ExecutionMode` switch between sequential and rayon-backed work.
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

static CROP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)x(\d+)\+(\d+)\+(\d+)$").expect("valid crop regex"));
static GRID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)x(\d+)$").expect("valid grid regex"));

fn parse_u32(arg: &'static str, s: &str, digits: &str) -> Result<u32, Error> {
    digits.parse().map_err(|_| Error::InvalidArgument {
        arg,
        value: s.to_string(),
    })
}

/// Rectangle applied identically to every image of a set.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct CropRegion {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Exclusive right edge, `None` on `u32` overflow.
    pub fn right(&self) -> Option<u32> {
        self.left.checked_add(self.width)
    }

    /// Exclusive bottom edge, `None` on `u32` overflow.
    pub fn bottom(&self) -> Option<u32> {
        self.top.checked_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        matches!(self.right(), Some(r) if r <= width)
            && matches!(self.bottom(), Some(b) if b <= height)
    }
}

/// Textual form `WIDTHxHEIGHT+X+Y`, e.g. `1265x1265+1422+366`.
impl FromStr for CropRegion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cap = CROP_RE.captures(s.trim()).ok_or_else(|| Error::InvalidArgument {
            arg: "crop",
            value: s.to_string(),
        })?;
        Ok(CropRegion {
            width: parse_u32("crop", s, &cap[1])?,
            height: parse_u32("crop", s, &cap[2])?,
            left: parse_u32("crop", s, &cap[3])?,
            top: parse_u32("crop", s, &cap[4])?,
        })
    }
}

impl fmt::Display for CropRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.left, self.top)
    }
}

/// Column/row count of a montage or a tile split.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct GridSpec {
    pub cols: u32,
    pub rows: u32,
}

impl GridSpec {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.cols == 0 || self.rows == 0 {
            return Err(Error::InvalidGridSpec {
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(())
    }

    /// Number of cells; saturates instead of overflowing.
    pub fn capacity(&self) -> usize {
        (self.cols as usize).saturating_mul(self.rows as usize)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { cols: 1, rows: 1 }
    }
}

/// Textual form `COLSxROWS`, e.g. `3x2`.
impl FromStr for GridSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cap = GRID_RE.captures(s.trim()).ok_or_else(|| Error::InvalidArgument {
            arg: "grid",
            value: s.to_string(),
        })?;
        Ok(GridSpec {
            cols: parse_u32("grid", s, &cap[1])?,
            rows: parse_u32("grid", s, &cap[2])?,
        })
    }
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// Shared canvas of a normalized image set.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    #[value(alias = "jpg")]
    Jpeg, // Lossy, alpha is dropped
    #[value(alias = "tif")]
    Tiff,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Tiff => "tiff",
        }
    }

    /// Infer the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "tif" | "tiff" => Some(OutputFormat::Tiff),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "PNG"),
            OutputFormat::Jpeg => write!(f, "JPEG"),
            OutputFormat::Tiff => write!(f, "TIFF"),
        }
    }
}

/// How per-image and per-row work is scheduled.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sequential => write!(f, "Sequential"),
            ExecutionMode::Parallel => write!(f, "Parallel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_crop_geometry() {
        let region: CropRegion = "1265x1265+1422+366".parse().unwrap();
        assert_eq!(region, CropRegion::new(1422, 366, 1265, 1265));
        assert_eq!(region.to_string(), "1265x1265+1422+366");
    }

    #[test]
    fn rejects_malformed_crop() {
        for bad in ["", "10x10", "10x10+1", "axb+1+2", "10x10-1+2", "10x10+1+2+3"] {
            let err = bad.parse::<CropRegion>().unwrap_err();
            assert!(matches!(err, Error::InvalidArgument { arg: "crop", .. }), "{bad}");
        }
    }

    #[test]
    fn crop_component_overflow_is_an_argument_error() {
        let err = "99999999999x1+0+0".parse::<CropRegion>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn parses_grid() {
        let grid: GridSpec = "3x2".parse().unwrap();
        assert_eq!(grid, GridSpec::new(3, 2));
        assert_eq!(grid.capacity(), 6);
        assert!("3".parse::<GridSpec>().is_err());
        assert!("3x".parse::<GridSpec>().is_err());
    }

    #[test]
    fn zero_grid_fails_validation() {
        assert!(GridSpec::new(0, 2).validate().is_err());
        assert!(GridSpec::new(2, 0).validate().is_err());
        assert!(GridSpec::new(1, 1).validate().is_ok());
    }

    #[test]
    fn region_containment_handles_overflow() {
        let region = CropRegion::new(u32::MAX, 0, 2, 1);
        assert_eq!(region.right(), None);
        assert!(!region.fits_within(u32::MAX, 1));
        assert!(CropRegion::new(80, 0, 20, 20).fits_within(100, 100));
        assert!(!CropRegion::new(90, 0, 20, 20).fits_within(100, 100));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.PNG")), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_path(Path::new("x.jpeg")), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_path(Path::new("x.tif")), Some(OutputFormat::Tiff));
        assert_eq!(OutputFormat::from_path(Path::new("x.gif")), None);
        assert_eq!(OutputFormat::from_path(Path::new("noext")), None);
    }
}
