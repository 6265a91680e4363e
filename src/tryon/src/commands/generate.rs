use crate::lib::comfy::server::ComfyServer;
use crate::lib::environment::Environment;
use crate::lib::error::TryonResult;
use clap::Parser;
use fn_error_context::context;
use humantime::parse_duration;
use slog::{debug, info, Logger};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tryon_core::config::resolve_api_key;
use tryon_core::json::save_json_file;
use tryon_core::queue::QueueClient;
use tryon_core::staging;
use tryon_core::workflow::{try_on_workflow, Workflow, SAVE_FILENAME_PREFIX};

const READY_POLL_INTERVAL: Duration = Duration::from_millis(500);
const READY_TIMEOUT: Duration = Duration::from_secs(30);

/// Renders the jewelry image onto a model via the try-on workflow and
/// prints the paths of the collected output images.
#[derive(Parser)]
pub struct GenerateOpts {
    /// The jewelry image to render.
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

    /// Port to run the ComfyUI server on.
    #[arg(long, default_value_t = 8188)]
    port: u16,

    /// Delay between history polls.
    #[arg(long, default_value = "1s", value_parser = parse_duration)]
    poll_interval: Duration,

    /// Gives up if the job has not reached a terminal status within this
    /// duration. Polls forever when omitted.
    #[arg(long, value_parser = parse_duration)]
    timeout: Option<Duration>,
}

#[context("Failed to generate try-on images.")]
pub fn exec(env: &dyn Environment, opts: GenerateOpts) -> TryonResult {
    let logger = env.get_logger();

    // Resolved before anything is cleared or spawned.
    let api_key = resolve_api_key(opts.api_key)?;

    let input_dir = env.get_input_dir();
    let output_dir = env.get_output_dir();
    staging::clear_dir(&input_dir)?;
    staging::clear_dir(&output_dir)?;

    let staged = staging::stage_image(&opts.image, &input_dir)?;
    let image_name = tryon_core::fs::file_name(&staged)?;
    debug!(logger, "Staged input image as {}", image_name);

    let workflow = try_on_workflow(&image_name, &opts.prompt, &api_key, opts.seed);
    save_json_file(&env.get_workflow_path(), &workflow)?;

    let server = ComfyServer::start(env, opts.port, &api_key)?;
    debug!(logger, "ComfyUI running as pid {}", server.pid());

    let client = QueueClient::new(&server.base_url())?;
    client.wait_until_ready(logger, READY_POLL_INTERVAL, READY_TIMEOUT)?;

    let rendered_dir = env.get_comfy_dir().join("output");
    let outputs = run_job(
        logger,
        &client,
        &workflow,
        opts.poll_interval,
        opts.timeout,
        &rendered_dir,
        &output_dir,
    )?;
    info!(logger, "Collected {} output image(s).", outputs.len());
    for path in &outputs {
        println!("{}", path.display());
    }

    // `server` drops here, which terminates ComfyUI; error paths above do
    // the same the moment they unwind past it.
    Ok(())
}

/// Submits the workflow, polls it to a terminal status, and collects the
/// prefixed output images. Everything past server startup lives here so it
/// can run against a stub queue endpoint.
fn run_job(
    logger: &Logger,
    client: &QueueClient,
    workflow: &Workflow,
    poll_interval: Duration,
    timeout: Option<Duration>,
    rendered_dir: &Path,
    output_dir: &Path,
) -> TryonResult<Vec<PathBuf>> {
    let prompt_id = client.submit(workflow)?;
    info!(logger, "Queued workflow as {}", prompt_id);

    client.wait_for_completion(logger, &prompt_id, poll_interval, timeout)?;

    let prefix = format!("{SAVE_FILENAME_PREFIX}_");
    Ok(staging::collect_outputs(rendered_dir, output_dir, &prefix)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slog::o;

    struct TestEnv {
        root: PathBuf,
        logger: Logger,
    }

    impl Environment for TestEnv {
        fn get_logger(&self) -> &Logger {
            &self.logger
        }

        fn get_verbose_level(&self) -> i64 {
            0
        }

        fn get_project_root(&self) -> &Path {
            &self.root
        }
    }

    #[test]
    fn missing_api_key_fails_before_any_side_effect() {
        std::env::remove_var(tryon_core::config::API_KEY_VAR);
        let tmp = tempfile::tempdir().unwrap();
        let env = TestEnv {
            root: tmp.path().to_path_buf(),
            logger: Logger::root(slog::Discard, o!()),
        };

        let opts = GenerateOpts {
            image: tmp.path().join("ring.png"),
            prompt: "p".to_string(),
            api_key: None,
            seed: 1,
            port: 8188,
            poll_interval: Duration::from_millis(1),
            timeout: None,
        };
        let err = exec(&env, opts).unwrap_err();

        assert!(err
            .chain()
            .any(|cause| cause.to_string().contains("API key")));
        // Nothing was cleared, staged, or written before the key check.
        assert!(!env.get_input_dir().exists());
        assert!(!env.get_output_dir().exists());
        assert!(!env.get_workflow_path().exists());
    }

    #[test]
    fn run_job_collects_outputs_on_success_and_surfaces_server_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let rendered_dir = tmp.path().join("rendered");
        let output_dir = tmp.path().join("output");
        std::fs::create_dir(&rendered_dir).unwrap();
        std::fs::create_dir(&output_dir).unwrap();
        std::fs::write(rendered_dir.join("ComfyUI_00001_.png"), b"img").unwrap();
        std::fs::write(rendered_dir.join("checkpoint.bin"), b"no").unwrap();

        let logger = Logger::root(slog::Discard, o!());
        let client = QueueClient::new(&mockito::server_url()).unwrap();
        let workflow = try_on_workflow("img.png", "p", "k", 7);

        let _submit = mockito::mock("POST", "/prompt")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"prompt_id": "job-1"}"#)
            .create();
        let _history = mockito::mock("GET", "/history/job-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"job-1": {"status": {"status": "success"}}}"#)
            .create();
        let outputs = run_job(
            &logger,
            &client,
            &workflow,
            Duration::ZERO,
            None,
            &rendered_dir,
            &output_dir,
        )
        .unwrap();
        assert_eq!(outputs, vec![output_dir.join("ComfyUI_00001_.png")]);

        // A fresher /prompt mock takes precedence; this run fails serverside.
        let _submit = mockito::mock("POST", "/prompt")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"prompt_id": "job-2"}"#)
            .create();
        let _history = mockito::mock("GET", "/history/job-2")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"job-2": {"status": {"status": "error", "error": "missing node"}}}"#)
            .create();
        let err = run_job(
            &logger,
            &client,
            &workflow,
            Duration::ZERO,
            None,
            &rendered_dir,
            &output_dir,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing node"));
    }
}
