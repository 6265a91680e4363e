use crate::lib::environment::Environment;
use crate::lib::error::TryonResult;
use clap::Parser;
use fn_error_context::context;
use slog::info;
use tryon_core::staging;

/// Empties the input/ and output/ working directories.
#[derive(Parser)]
pub struct CleanOpts {}

#[context("Failed to clean the working directories.")]
pub fn exec(env: &dyn Environment, _opts: CleanOpts) -> TryonResult {
    staging::clear_dir(&env.get_input_dir())?;
    staging::clear_dir(&env.get_output_dir())?;
    info!(env.get_logger(), "Working directories cleared.");
    Ok(())
}
