use crate::error::process::ProcessError;
use crate::error::process::ProcessError::{ExecutionFailed, SpawnFailed, Unsuccessful};
use std::ffi::OsString;
use std::process::{Child, Command};

/// Runs a command to completion, treating a non-zero exit status as an
/// error. Stdout/stderr go wherever the caller pointed them.
pub fn run_to_completion(cmd: &mut Command) -> Result<(), ProcessError> {
    let program = cmd.get_program().to_owned();
    let status = cmd
        .status()
        .map_err(|err| ExecutionFailed(program.clone(), err))?;
    if !status.success() {
        return Err(Unsuccessful(program, status));
    }
    Ok(())
}

/// Owns a spawned child process and kills it when dropped.
///
/// Dropping the guard is the only shutdown path, so the child is terminated
/// on success and on every error return alike.
#[derive(Debug)]
pub struct ProcessGuard {
    program: OsString,
    child: Child,
}

impl ProcessGuard {
    pub fn spawn(cmd: &mut Command) -> Result<Self, ProcessError> {
        let program = cmd.get_program().to_owned();
        let child = cmd
            .spawn()
            .map_err(|err| SpawnFailed(program.clone(), err))?;
        Ok(ProcessGuard { program, child })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        // The child may already have exited; both calls are best-effort.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
