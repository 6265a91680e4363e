use crate::error::fs::FsError;
use crate::error::fs::FsError::{
    CopyFileFailed, CreateDirAllFailed, NoFileName, ReadDirEntryFailed, ReadDirFailed,
    RemoveFileFailed, WriteFileFailed,
};
use std::path::{Path, PathBuf};

pub fn copy(from: &Path, to: &Path) -> Result<u64, FsError> {
    std::fs::copy(from, to)
        .map_err(|err| CopyFileFailed(Box::new(from.to_path_buf()), Box::new(to.to_path_buf()), err))
}

pub fn create_dir_all(path: &Path) -> Result<(), FsError> {
    std::fs::create_dir_all(path).map_err(|err| CreateDirAllFailed(Box::new(path.to_path_buf()), err))
}

pub fn file_name(path: &Path) -> Result<String, FsError> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| NoFileName(Box::new(path.to_path_buf())))
}

/// Returns the paths of the plain files directly under `path`, in no
/// particular order. Subdirectories are not descended into.
pub fn files_in_dir(path: &Path) -> Result<Vec<PathBuf>, FsError> {
    let entries =
        std::fs::read_dir(path).map_err(|err| ReadDirFailed(Box::new(path.to_path_buf()), err))?;
    let mut files = vec![];
    for entry in entries {
        let entry =
            entry.map_err(|err| ReadDirEntryFailed(Box::new(path.to_path_buf()), err))?;
        if entry.path().is_file() {
            files.push(entry.path());
        }
    }
    Ok(files)
}

pub fn remove_file(path: &Path) -> Result<(), FsError> {
    std::fs::remove_file(path).map_err(|err| RemoveFileFailed(Box::new(path.to_path_buf()), err))
}

pub fn write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<(), FsError> {
    std::fs::write(path.as_ref(), contents)
        .map_err(|err| WriteFileFailed(Box::new(path.as_ref().to_path_buf()), err))
}
