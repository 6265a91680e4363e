use crate::error::structured_file::StructuredFileError;
use crate::error::structured_file::StructuredFileError::SerializeJsonFileFailed;
use serde::Serialize;
use std::path::Path;

pub fn save_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), StructuredFileError> {
    let content = serde_json::to_string_pretty(&value)
        .map_err(|err| SerializeJsonFileFailed(Box::new(path.to_path_buf()), err))?;
    crate::fs::write(path, content)?;
    Ok(())
}
