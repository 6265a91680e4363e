use crate::lib::environment::Environment;
use crate::lib::error::TryonResult;
use anyhow::bail;
use clap::Subcommand;

mod clean;
mod generate;
mod setup;
mod workflow;

#[derive(Subcommand)]
pub enum TryonCommand {
    Clean(clean::CleanOpts),
    Generate(generate::GenerateOpts),
    Setup(setup::SetupOpts),
    Workflow(workflow::WorkflowOpts),
}

pub fn exec(env: &dyn Environment, cmd: TryonCommand) -> TryonResult {
    match cmd {
        TryonCommand::Clean(v) => clean::exec(env, v),
        TryonCommand::Generate(v) => generate::exec(env, v),
        TryonCommand::Setup(v) => setup::exec(env, v),
        TryonCommand::Workflow(v) => workflow::exec(v),
    }
}

pub fn exec_without_env(cmd: TryonCommand) -> TryonResult {
    match cmd {
        TryonCommand::Workflow(v) => workflow::exec(v),
        _ => bail!("command requires an environment"),
    }
}
