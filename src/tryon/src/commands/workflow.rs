use crate::lib::error::TryonResult;
use clap::Parser;
use fn_error_context::context;
use std::path::PathBuf;
use tryon_core::config::resolve_api_key;
use tryon_core::workflow::try_on_workflow;

/// Prints the workflow JSON that `generate` would submit, without staging
/// files or launching anything.
#[derive(Parser)]
pub struct WorkflowOpts {
    /// The jewelry image the graph will load. Only its file name ends up in the graph.
    #[arg(long)]
    image: PathBuf,

    /// The prompt handed to the LLM node.
    #[arg(long, default_value = "woman wear this jewelry")]
    prompt: String,

    /// Gemini API key. Falls back to the GOOGLE_GEMINI_API_KEY environment variable.
    #[arg(long)]
    api_key: Option<String>,

    /// Seed for the LLM node.
    #[arg(long, default_value_t = 1222)]
    seed: u64,
}

#[context("Failed to render the workflow.")]
pub fn exec(opts: WorkflowOpts) -> TryonResult {
    let api_key = resolve_api_key(opts.api_key)?;
    let image_name = tryon_core::fs::file_name(&opts.image)?;
    let workflow = try_on_workflow(&image_name, &opts.prompt, &api_key, opts.seed);
    println!("{}", serde_json::to_string_pretty(&workflow)?);
    Ok(())
}
