use crate::error::fs::FsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StructuredFileError {
    #[error("failed to serialize JSON for {}", .0.display())]
    SerializeJsonFileFailed(Box<PathBuf>, #[source] serde_json::Error),

    #[error("failed to write JSON file")]
    WriteJsonFileFailed(#[from] FsError),
}
