#![allow(special_module_name)]
use crate::lib::environment::{Environment, EnvironmentImpl};
use crate::lib::error::{TryonError, TryonResult};
use crate::lib::logger::{create_root_logger, LoggingMode};
use clap::{ArgAction, Parser};
use std::io::Write;
use std::path::PathBuf;

mod commands;
mod lib;

/// Provisions ComfyUI and runs the jewelry try-on workflow against it.
#[derive(Parser)]
#[command(name = "tryon", version, arg_required_else_help = true)]
pub struct CliOpts {
    /// Displays detailed information about operations. -vv will generate a very large number of messages and can affect performance.
    #[arg(long, short, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppresses informational messages. -qq limits to errors only; -qqqq disables them all.
    #[arg(long, short, action = ArgAction::Count, global = true)]
    quiet: u8,

    /// The logging mode to use. You can log to stderr, a file, or both.
    #[arg(long = "log", default_value = "stderr", value_parser = ["stderr", "tee", "file"], global = true)]
    logmode: String,

    /// The file to log to, if logging to a file (see --logmode).
    #[arg(long, global = true)]
    logfile: Option<String>,

    #[command(subcommand)]
    command: commands::TryonCommand,
}

/// Setup a logger with the proper configuration, based on arguments.
/// Returns the verbose level and the logger.
fn setup_logging(opts: &CliOpts) -> (i64, slog::Logger) {
    let verbose_level = opts.verbose as i64 - opts.quiet as i64;

    let mode = match opts.logmode.as_str() {
        "tee" => LoggingMode::Tee(PathBuf::from(opts.logfile.as_deref().unwrap_or("log.txt"))),
        "file" => LoggingMode::File(PathBuf::from(opts.logfile.as_deref().unwrap_or("log.txt"))),
        _ => LoggingMode::Stderr,
    };

    (verbose_level, create_root_logger(verbose_level, mode))
}

fn print_error_chain(err: TryonError) {
    let mut stderr = term::stderr();

    for (level, cause) in err.chain().enumerate() {
        let (color, prefix) = if level == 0 {
            (term::color::RED, "Error")
        } else {
            (term::color::YELLOW, "Caused by")
        };
        match stderr.as_mut() {
            Some(stderr) => {
                let _ = stderr.fg(color);
                let _ = write!(stderr, "{prefix}: ");
                let _ = stderr.reset();
                let _ = writeln!(stderr, "{cause}");
            }
            None => eprintln!("{prefix}: {cause}"),
        }
    }
}

fn inner_main() -> TryonResult {
    let cli_opts = CliOpts::parse();

    if matches!(cli_opts.command, commands::TryonCommand::Workflow(_)) {
        return commands::exec_without_env(cli_opts.command);
    }

    let (verbose_level, log) = setup_logging(&cli_opts);

    let env = EnvironmentImpl::new()?
        .with_logger(log)
        .with_verbose_level(verbose_level);

    slog::trace!(
        env.get_logger(),
        "Trace mode enabled. Lots of logs coming up."
    );
    commands::exec(&env, cli_opts.command)
}

fn main() {
    if let Err(err) = inner_main() {
        print_error_chain(err);
        std::process::exit(255);
    }
}
