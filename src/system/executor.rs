// src/system/executor.rs

use std::path::Path;
use std::process::{Command as StdCommand, ExitStatus, Stdio};
use thiserror::Error;

/// Failures around launching the build tool.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The file has no execute permission bit.
    #[error("'{0}' is not executable. Please check its permissions.")]
    NotExecutable(String),
    /// The file's metadata could not be read.
    #[error("Could not inspect '{0}': {1}")]
    Inspect(String, std::io::Error),
    /// Spawning or waiting for the child failed.
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
}

/// Fails unless `path` carries at least one execute permission bit.
/// Windows has no such bit, so the check is skipped there.
pub fn ensure_executable(path: &Path, windows: bool) -> Result<(), ExecutionError> {
    if windows {
        return Ok(());
    }
    check_mode(path)
}

#[cfg(unix)]
fn check_mode(path: &Path) -> Result<(), ExecutionError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path)
        .map_err(|e| ExecutionError::Inspect(path.display().to_string(), e))?;
    if metadata.permissions().mode() & 0o111 == 0 {
        return Err(ExecutionError::NotExecutable(path.display().to_string()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_mode(_path: &Path) -> Result<(), ExecutionError> {
    Ok(())
}

/// Runs `program` with `args`, inheriting all standard streams, and blocks
/// until it exits. Returns the child's exit code.
pub fn execute(program: &Path, args: &[String], cwd: Option<&Path>) -> Result<i32, ExecutionError> {
    let mut command = StdCommand::new(dunce::simplified(program));
    command
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    if let Some(dir) = cwd {
        command.current_dir(dunce::simplified(dir));
    }

    log::debug!("Spawning {} with {:?} (cwd: {:?})", program.display(), args, cwd);

    let status = command
        .status()
        .map_err(|e| ExecutionError::CommandFailed(program.display().to_string(), e))?;

    let code = exit_code(status);
    log::debug!("{} exited with {}", program.display(), code);
    Ok(code)
}

/// Maps an exit status to a shell-style code: the child's own code, or
/// `128 + signal` when it was killed.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            log::warn!("Build tool was terminated by signal {}", signal);
            return 128 + signal;
        }
    }

    1
}
