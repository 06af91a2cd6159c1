//! Subprocess execution for external tooling.
//!
//! Every external collaborator (print-status query, queue-admin command,
//! dialog helper, management agent) is invoked through this module: argv
//! passed as a list with no shell interpretation, stdout/stderr captured,
//! and the exit status reported in a typed output struct. A non-zero exit
//! is not an error here; callers decide what it means.

use crate::error::{PrintMapperError, Result};
use log::{debug, info};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Output from an external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output from the command.
    pub stdout: String,
    /// Standard error from the command.
    pub stderr: String,
    /// Exit code (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Whether the command exited successfully (exit code 0).
    pub success: bool,
}

impl CommandOutput {
    /// Check that the command succeeded and return an error if not.
    pub fn ensure_success(&self, context: &str) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            let code = self.exit_code.unwrap_or(-1);
            Err(PrintMapperError::process(format!(
                "{} failed (exit code {}): {}",
                context,
                code,
                self.stderr.trim()
            )))
        }
    }
}

/// Run an external command to completion, capturing its output.
///
/// Returns `Err` only when the process could not be spawned or waited on;
/// an abnormal exit is reported through [`CommandOutput`].
pub fn run_command<I, S>(program: &Path, args: I) -> Result<CommandOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<_> = args.into_iter().collect();
    debug!(
        "Running command: {} {:?}",
        program.display(),
        args.iter().map(|a| a.as_ref().to_owned()).collect::<Vec<_>>()
    );

    let output = Command::new(program)
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            PrintMapperError::process(format!("failed to run {}: {e}", program.display()))
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code();
    let success = output.status.success();

    if !success {
        info!(
            "Command {} exited with code {:?}",
            program.display(),
            exit_code
        );
    }

    Ok(CommandOutput {
        stdout,
        stderr,
        exit_code,
        success,
    })
}

/// Spawn a long-lived child (the indeterminate progress dialog) without
/// waiting for it. The caller is responsible for terminating it.
pub fn spawn_command<I, S>(program: &Path, args: I) -> Result<Child>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            PrintMapperError::process(format!("failed to spawn {}: {e}", program.display()))
        })
}
