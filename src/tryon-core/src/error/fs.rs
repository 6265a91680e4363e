use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FsError {
    #[error("failed to copy {} to {}", .0.display(), .1.display())]
    CopyFileFailed(Box<PathBuf>, Box<PathBuf>, #[source] std::io::Error),

    #[error("failed to create directory {} and parents", .0.display())]
    CreateDirAllFailed(Box<PathBuf>, #[source] std::io::Error),

    #[error("path {} has no file name", .0.display())]
    NoFileName(Box<PathBuf>),

    #[error("failed to read directory {}", .0.display())]
    ReadDirFailed(Box<PathBuf>, #[source] std::io::Error),

    #[error("failed to read an entry of directory {}", .0.display())]
    ReadDirEntryFailed(Box<PathBuf>, #[source] std::io::Error),

    #[error("failed to remove file {}", .0.display())]
    RemoveFileFailed(Box<PathBuf>, #[source] std::io::Error),

    #[error("failed to write to {}", .0.display())]
    WriteFileFailed(Box<PathBuf>, #[source] std::io::Error),
}
