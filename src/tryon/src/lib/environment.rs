use crate::lib::error::TryonResult;
use anyhow::Context;
use slog::Logger;
use std::path::{Path, PathBuf};

pub trait Environment {
    fn get_logger(&self) -> &Logger;
    fn get_verbose_level(&self) -> i64;

    /// The directory under which ComfyUI, the working directories, and
    /// `workflow.json` live.
    fn get_project_root(&self) -> &Path;

    fn get_comfy_dir(&self) -> PathBuf {
        self.get_project_root().join("ComfyUI")
    }

    fn get_input_dir(&self) -> PathBuf {
        self.get_project_root().join("input")
    }

    fn get_output_dir(&self) -> PathBuf {
        self.get_project_root().join("output")
    }

    fn get_workflow_path(&self) -> PathBuf {
        self.get_project_root().join("workflow.json")
    }
}

pub struct EnvironmentImpl {
    root: PathBuf,
    logger: Option<Logger>,
    verbose_level: i64,
}

impl EnvironmentImpl {
    pub fn new() -> TryonResult<Self> {
        let root = std::env::current_dir().context("Failed to determine the current directory.")?;
        Ok(EnvironmentImpl {
            root,
            logger: None,
            verbose_level: 0,
        })
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_verbose_level(mut self, verbose_level: i64) -> Self {
        self.verbose_level = verbose_level;
        self
    }
}

impl Environment for EnvironmentImpl {
    fn get_logger(&self) -> &Logger {
        self.logger
            .as_ref()
            .expect("Log was not setup, but is being used.")
    }

    fn get_verbose_level(&self) -> i64 {
        self.verbose_level
    }

    fn get_project_root(&self) -> &Path {
        &self.root
    }
}
