//! Device-management policy triggers.
//!
//! Drivers and helper software are installed by handing a named trigger to
//! the management agent. The agent reports outcomes only through its stdout,
//! so success and failure are detected by output markers.

use crate::command;
use crate::config::InstallerConfig;
use crate::dialog::{self, ProgressDialog};
use crate::error::Result;
use log::info;

const POLICY_SUCCESS_MARKER: &str = "Submitting log to";
const POLICY_FAILURE_MARKER: &str = "No policies were found for the";

/// Run a management policy for the given trigger.
///
/// Unless `quiet`, an indeterminate progress bar is shown while the agent
/// runs. Returns `Ok(false)` when the agent ran but no policy matched the
/// trigger; `Err` only when the agent itself could not be executed.
pub fn run_policy(config: &InstallerConfig, trigger: &str, quiet: bool) -> Result<bool> {
    let progress = (!quiet).then(|| ProgressDialog::show(config));

    let result = command::run_command(
        &config.management_path,
        ["policy", "-event", trigger],
    );

    if let Some(progress) = progress {
        progress.dismiss();
    }

    let output = result?;
    if output.stdout.contains(POLICY_FAILURE_MARKER) {
        info!("Unable to run management policy via trigger {trigger}");
        Ok(false)
    } else if output.stdout.contains(POLICY_SUCCESS_MARKER) {
        info!("Successfully ran management policy via trigger {trigger}");
        Ok(true)
    } else {
        info!("Management policy via trigger {trigger} produced no recognized outcome");
        Ok(false)
    }
}

/// Ensure the dialog helper is installed, installing it via its policy
/// trigger if absent. The self-install runs quiet: the progress bar cannot
/// be shown by a helper that is not there yet.
pub fn ensure_dialog_helper(config: &InstallerConfig) -> Result<bool> {
    if dialog::is_available(config) {
        return Ok(true);
    }
    info!("Dialog helper not found, installing via policy trigger");
    run_policy(config, &config.dialog_install_trigger, true)
}
