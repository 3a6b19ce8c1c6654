//! Command Line Interface (CLI) layer for sazan.
//!
//! Argument parsing lives in `args`, CLI-only errors in `errors`, and the
//! `crop-grid` / `crop-split` orchestration in `runner`. Embedders should call
//! `sazan::api` directly instead of going through this module.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
