use crate::lib::environment::Environment;
use crate::lib::error::TryonResult;
use fn_error_context::context;
use slog::info;
use std::path::Path;
use std::process::Command;
use tryon_core::process::run_to_completion;

pub const COMFY_REPO: &str = "https://github.com/comfyanonymous/ComfyUI.git";
pub const IF_LLM_REPO: &str = "https://github.com/if-ai/ComfyUI-IF_LLM.git";

/// Ensures ComfyUI and the IF_LLM custom node are present and installed,
/// and that the working directories exist. Safe to run repeatedly; clones
/// only happen when the checkout is absent. Failures abort immediately,
/// nothing is retried.
#[context("Failed to provision ComfyUI.")]
pub fn provision(env: &dyn Environment) -> TryonResult {
    let logger = env.get_logger();

    let comfy_dir = env.get_comfy_dir();
    if !comfy_dir.exists() {
        info!(logger, "Cloning ComfyUI into {}", comfy_dir.display());
        clone_repo(COMFY_REPO, &comfy_dir)?;
    }
    install_requirements(&comfy_dir.join("requirements.txt"))?;

    let custom_nodes_dir = comfy_dir.join("custom_nodes");
    tryon_core::fs::create_dir_all(&custom_nodes_dir)?;

    let plugin_dir = custom_nodes_dir.join("ComfyUI-IF_LLM");
    if !plugin_dir.exists() {
        info!(logger, "Cloning ComfyUI-IF_LLM into {}", plugin_dir.display());
        clone_repo(IF_LLM_REPO, &plugin_dir)?;
        install_requirements(&plugin_dir.join("requirements.txt"))?;
    }

    tryon_core::fs::create_dir_all(&env.get_input_dir())?;
    tryon_core::fs::create_dir_all(&env.get_output_dir())?;

    info!(logger, "ComfyUI is provisioned.");
    Ok(())
}

#[context("Failed to clone {} into {}.", url, dest.display())]
fn clone_repo(url: &str, dest: &Path) -> TryonResult {
    run_to_completion(Command::new("git").arg("clone").arg(url).arg(dest))?;
    Ok(())
}

#[context("Failed to install requirements from {}.", requirements.display())]
fn install_requirements(requirements: &Path) -> TryonResult {
    run_to_completion(Command::new("pip").args(["install", "-r"]).arg(requirements))?;
    Ok(())
}
