//! User-facing dialogs via the external dialog helper.
//!
//! The helper is an opaque GUI binary (message boxes, an indeterminate
//! progress bar, and a dropdown selector) driven entirely through argv and
//! stdout. It lives at a fixed path and is installed on demand through a
//! policy trigger when missing.

use crate::command;
use crate::config::InstallerConfig;
use crate::error::{PrintMapperError, Result};
use log::{info, warn};
use std::process::Child;

/// Whether the dialog helper is present at its configured path.
pub fn is_available(config: &InstallerConfig) -> bool {
    config.dialog_path.exists()
}

/// Display a message box and wait for the user to dismiss it.
///
/// Best-effort: a missing or failing helper is logged, never fatal, since
/// messages are also mirrored to the log.
pub fn show_message(config: &InstallerConfig, text: &str, heading: &str) {
    info!("Message to user ({heading}): {text}");
    let icon = config.brand_icon_path.to_string_lossy();
    let result = command::run_command(
        &config.dialog_path,
        [
            "ok-msgbox",
            "--title",
            config.window_title.as_str(),
            "--text",
            heading,
            "--informative-text",
            text,
            "--icon-file",
            icon.as_ref(),
            "--float",
            "--no-cancel",
        ],
    );
    if let Err(e) = result {
        warn!("Unable to display dialog: {e}");
    }
}

/// Prompt the user to select a queue from the sorted list.
///
/// Returns `Ok(None)` when the user cancels, which is a normal termination
/// path for the caller.
pub fn prompt_queue(config: &InstallerConfig, queues: &[String]) -> Result<Option<String>> {
    info!("Prompting user to select desired queue");

    let mut args: Vec<&str> = vec![
        "dropdown",
        "--string-output",
        "--float",
        "--icon",
        "gear",
        "--title",
        config.messages.prompt_title.as_str(),
        "--text",
        config.messages.prompt_text.as_str(),
        "--button1",
        "Add",
        "--button2",
        "Cancel",
        "--items",
    ];
    args.extend(queues.iter().map(String::as_str));

    let output = command::run_command(&config.dialog_path, args)?;

    // First line is the pressed button, second the selected item.
    let mut lines = output.stdout.lines();
    match lines.next() {
        Some("Cancel") => {
            info!("User canceled queue selection");
            Ok(None)
        }
        Some(_) => {
            let selected = lines.next().ok_or_else(|| {
                PrintMapperError::process(format!(
                    "unexpected dialog output: {:?}",
                    output.stdout
                ))
            })?;
            info!("User selected queue {selected}");
            Ok(Some(selected.to_string()))
        }
        None => Err(PrintMapperError::process(
            "dialog produced no output".to_string(),
        )),
    }
}

/// An indeterminate progress bar shown while a policy runs.
///
/// Dismissed explicitly after the policy completes; dropped as a backstop
/// if the caller errors out first.
pub struct ProgressDialog {
    child: Option<Child>,
}

impl ProgressDialog {
    /// Show the progress bar. Failure to show it is non-fatal.
    pub fn show(config: &InstallerConfig) -> Self {
        let child = command::spawn_command(
            &config.dialog_path,
            [
                "progressbar",
                "--title",
                config.messages.progress_title.as_str(),
                "--text",
                config.messages.progress_text.as_str(),
                "--float",
                "--indeterminate",
            ],
        );
        let child = match child {
            Ok(child) => Some(child),
            Err(e) => {
                warn!("Unable to display progress bar: {e}");
                None
            }
        };
        Self { child }
    }

    /// Close the progress bar.
    pub fn dismiss(mut self) {
        self.terminate();
    }

    fn terminate(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for ProgressDialog {
    fn drop(&mut self) {
        self.terminate();
    }
}
