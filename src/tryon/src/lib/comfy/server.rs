use crate::lib::environment::Environment;
use crate::lib::error::TryonResult;
use anyhow::bail;
use fn_error_context::context;
use std::process::{Command, Stdio};
use tryon_core::process::ProcessGuard;

/// A running ComfyUI server in API mode. Owns the child process; dropping
/// the value terminates the server, so it comes down on every exit path.
pub struct ComfyServer {
    port: u16,
    guard: ProcessGuard,
}

impl ComfyServer {
    #[context("Failed to start the ComfyUI server.")]
    pub fn start(env: &dyn Environment, port: u16, api_key: &str) -> TryonResult<Self> {
        let comfy_dir = env.get_comfy_dir();
        if !comfy_dir.exists() {
            bail!(
                "{} does not exist; run `tryon setup` first",
                comfy_dir.display()
            );
        }

        let mut cmd = Command::new("python");
        cmd.args(["main.py", "--port", &port.to_string(), "--listen", "0.0.0.0"])
            .current_dir(&comfy_dir)
            .env("GOOGLE_API_KEY", api_key);
        // The server is chatty; only surface its output when asked for.
        if env.get_verbose_level() > 0 {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let guard = ProcessGuard::spawn(&mut cmd)?;
        Ok(ComfyServer { port, guard })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn pid(&self) -> u32 {
        self.guard.id()
    }
}
