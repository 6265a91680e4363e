use crate::lib::comfy::install;
use crate::lib::environment::Environment;
use crate::lib::error::TryonResult;
use clap::Parser;

/// Installs ComfyUI and the IF_LLM custom node, and creates the working directories.
#[derive(Parser)]
pub struct SetupOpts {}

pub fn exec(env: &dyn Environment, _opts: SetupOpts) -> TryonResult {
    install::provision(env)
}
