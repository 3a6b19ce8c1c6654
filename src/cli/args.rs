use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use sazan::types::{CropRegion, GridSpec, OutputFormat};

#[derive(Parser)]
#[command(
    name = "sazan",
    version,
    about = "Crop a set of images and lay the crops out as a grid, or split them into tiles"
)]
pub struct CliArgs {
    /// Enable logging (level from RUST_LOG, default debug)
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    /// Decode, normalize and crop images on all cores
    #[arg(long, global = true, default_value_t = false)]
    pub parallel: bool,

    /// JSON preset supplying crop, grid, format and prefix defaults
    #[arg(long, global = true)]
    pub preset: Option<PathBuf>,

    /// Write the effective parameters to this preset file before running
    #[arg(long, global = true)]
    pub save_preset: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Crop every image and compose the crops into a single grid image
    CropGrid {
        #[command(flatten)]
        common: CommonArgs,

        /// Output image; format follows the extension (png, jpg, tiff)
        #[arg(short, long, default_value = "result.png")]
        output: PathBuf,
    },

    /// Crop every image and split each crop into grid tiles stored in a ZIP archive
    CropSplit {
        #[command(flatten)]
        common: CommonArgs,

        /// Output ZIP archive
        #[arg(short, long, default_value = "result.zip")]
        output: PathBuf,

        /// Tile file name prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Tile encoding
        #[arg(short = 'f', long, value_enum)]
        format: Option<OutputFormat>,

        /// Add a manifest.json entry describing the tiles
        #[arg(long, default_value_t = false)]
        manifest: bool,
    },
}

#[derive(Args)]
pub struct CommonArgs {
    /// Input images (sorted by path before loading)
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// Crop region as WIDTHxHEIGHT+X+Y
    #[arg(short, long)]
    pub crop: Option<CropRegion>,

    /// Grid layout as COLSxROWS
    #[arg(short, long)]
    pub grid: Option<GridSpec>,
}
