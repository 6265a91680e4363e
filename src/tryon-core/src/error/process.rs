use std::ffi::OsString;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("execution of '{0:?}' failed: {1}")]
    ExecutionFailed(OsString, #[source] std::io::Error),

    #[error("'{0:?}' exited with {1}")]
    Unsuccessful(OsString, ExitStatus),

    #[error("failed to spawn '{0:?}': {1}")]
    SpawnFailed(OsString, #[source] std::io::Error),
}
