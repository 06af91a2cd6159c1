//! Top-level installer workflow.
//!
//! A linear state machine: gather mapped queues, filter the catalog, select
//! a queue (preselected or interactive), map it, terminate. Helpers return
//! results; the binary's dispatcher decides the process exit code, so no
//! function below ever terminates the process itself.

use crate::catalog::QueueCatalog;
use crate::config::InstallerConfig;
use crate::dialog;
use crate::error::{PrintMapperError, Result};
use crate::mapping;
use crate::policy;
use crate::queues::{self, QueueFilter};
use log::info;

/// Terminal outcomes of a successful installer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A queue was mapped.
    Mapped(String),
    /// The user dismissed the picker; nothing was changed.
    Cancelled,
}

/// What the deploying agent asked for on this run.
#[derive(Debug, Clone, Default)]
pub struct InstallRequest {
    /// Queue to map without prompting; must be in the filtered list.
    pub preselected: Option<String>,
    pub filter: Option<QueueFilter>,
}

/// Run the installer workflow against the loaded catalog.
pub fn run(
    config: &InstallerConfig,
    catalog: &QueueCatalog,
    request: &InstallRequest,
) -> Result<RunOutcome> {
    let mapped = queues::currently_mapped_queues(config);
    let available = queues::build_printer_queue_list(catalog, &mapped, request.filter.as_ref());

    if available.is_empty() {
        return Err(PrintMapperError::NoAvailableQueues);
    }

    let selected = match &request.preselected {
        Some(queue) => {
            if !available.contains(queue) {
                return Err(PrintMapperError::QueueNotAvailable(queue.clone()));
            }
            info!("Using preselected queue {queue}");
            queue.clone()
        }
        None => {
            if !policy::ensure_dialog_helper(config)? {
                return Err(PrintMapperError::environment(
                    "dialog helper is missing and could not be installed",
                ));
            }
            match dialog::prompt_queue(config, &available)? {
                Some(queue) => queue,
                None => return Ok(RunOutcome::Cancelled),
            }
        }
    };

    mapping::add_queue(config, catalog, &selected)?;
    dialog::show_message(config, &config.messages.success_for(&selected), "Success!");
    Ok(RunOutcome::Mapped(selected))
}

/// Report a workflow failure to the user.
///
/// Every failure surfaces as exactly one dialog plus the log line already
/// emitted where it occurred; the exit code is the only machine-readable
/// signal.
pub fn report_failure(config: &InstallerConfig, error: &PrintMapperError) {
    let messages = &config.messages;
    let (text, heading) = match error {
        PrintMapperError::NoAvailableQueues => (messages.all_mapped.as_str(), config.window_title.as_str()),
        PrintMapperError::DriverUnavailable(_) => (messages.driver_install_failed.as_str(), "Error"),
        PrintMapperError::Mapping(_) => (messages.mapping_failed.as_str(), "Error"),
        _ => (messages.undefined_error.as_str(), "Error"),
    };
    dialog::show_message(config, text, heading);
}
