use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sazan::api::{crop_grid_to_path, crop_split_to_archive};
use sazan::types::ExecutionMode;
use sazan::CompositionParams;

use super::args::{CliArgs, Command, CommonArgs};
use super::errors::AppError;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Preset values first, then explicit flags on top.
fn resolve_params(
    preset: Option<&Path>,
    parallel: bool,
    common: &CommonArgs,
) -> Result<CompositionParams, AppError> {
    let mut params = match preset {
        Some(path) => {
            info!("Loading preset {:?}", path);
            CompositionParams::from_json_file(path)?
        }
        None => CompositionParams::default(),
    };

    if let Some(crop) = common.crop {
        params.crop = Some(crop);
    }
    if params.crop.is_none() {
        return Err(AppError::MissingArgument {
            arg: "--crop".to_string(),
        });
    }

    match common.grid {
        Some(grid) => params.grid = grid,
        None if preset.is_none() => {
            return Err(AppError::MissingArgument {
                arg: "--grid".to_string(),
            });
        }
        None => {}
    }

    if parallel {
        params.mode = ExecutionMode::Parallel;
    }
    Ok(params)
}

fn sorted_inputs(images: &[PathBuf]) -> Vec<PathBuf> {
    let mut inputs = images.to_vec();
    inputs.sort();
    inputs
}

fn ensure_parent_dir(output: &Path) -> Result<(), AppError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating output directory {:?}", parent);
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn save_preset_if_requested(path: Option<&Path>, params: &CompositionParams) -> Result<(), AppError> {
    if let Some(path) = path {
        params.to_json_file(path)?;
        info!("Saved preset to {:?}", path);
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        init_logging();
    }

    let preset = args.preset.as_deref();
    let save_preset = args.save_preset.as_deref();

    match args.command {
        Command::CropGrid { common, output } => {
            let params = resolve_params(preset, args.parallel, &common)?;
            save_preset_if_requested(save_preset, &params)?;
            let inputs = sorted_inputs(&common.images);
            ensure_parent_dir(&output)?;

            info!(
                "Cropping {} image(s) with {} into a {} grid",
                inputs.len(),
                params.require_crop()?,
                params.grid
            );
            let composed = crop_grid_to_path(&inputs, &output, &params)?;
            info!(
                "Canvas {}, output {}x{}",
                composed.canvas,
                composed.image.width(),
                composed.image.height()
            );
            println!("Saved output image to {}", output.display());
        }
        Command::CropSplit {
            common,
            output,
            prefix,
            format,
            manifest,
        } => {
            let mut params = resolve_params(preset, args.parallel, &common)?;
            if let Some(prefix) = prefix {
                params.prefix = prefix;
            }
            if let Some(format) = format {
                params.format = format;
            }
            if manifest {
                params.manifest = true;
            }
            save_preset_if_requested(save_preset, &params)?;
            let inputs = sorted_inputs(&common.images);
            ensure_parent_dir(&output)?;

            let report = crop_split_to_archive(&inputs, &output, &params)?;
            println!(
                "Saved {} tile(s) from {} image(s) to {}",
                report.tiles,
                report.images,
                output.display()
            );
        }
    }

    Ok(())
}
