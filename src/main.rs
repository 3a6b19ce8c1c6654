//! sazan CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse args, dispatch to `crop-grid` or
//! `crop-split`, and exit non-zero on error.
//! For programmatic use, prefer the library API (`sazan::api`).

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
