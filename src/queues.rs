//! Mapped-queue discovery and availability filtering.

use crate::catalog::QueueCatalog;
use crate::command;
use crate::config::InstallerConfig;
use log::info;

/// Optional runtime filter supplied by the management agent.
///
/// When present, a queue is offered only if the named catalog field is
/// non-empty and contains `value` as a case-sensitive substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueFilter {
    pub key: String,
    pub value: String,
}

/// Return the queues currently mapped on this machine.
///
/// An absent print-status utility or a non-zero exit (no queues configured
/// yet) is the expected state on a freshly imaged machine, not an error.
pub fn currently_mapped_queues(config: &InstallerConfig) -> Vec<String> {
    info!("Gathering list of currently mapped queues");
    match command::run_command(&config.print_status_path, ["-p"]) {
        Ok(output) if output.success => parse_mapped_queues(&output.stdout),
        _ => {
            info!("No current print queues found");
            Vec::new()
        }
    }
}

/// Parse print-status output: the second whitespace-delimited token of each
/// line is a mapped-queue identifier. Lines without one are skipped.
pub fn parse_mapped_queues(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(str::to_string)
        .collect()
}

/// Build the sorted list of queues available to offer the user.
///
/// A queue is a candidate when neither its DisplayName nor its CUPSName
/// appears in `mapped`. An empty result is returned as-is; the workflow
/// decides how to terminate.
pub fn build_printer_queue_list(
    catalog: &QueueCatalog,
    mapped: &[String],
    filter: Option<&QueueFilter>,
) -> Vec<String> {
    let is_mapped = |name: &str| mapped.iter().any(|m| m == name);

    let mut display_list: Vec<String> = catalog
        .records()
        .iter()
        .filter(|record| {
            if is_mapped(&record.display_name) {
                return false;
            }
            if let Some(cups_name) = record.cups_name.as_deref() {
                if !cups_name.is_empty() && is_mapped(cups_name) {
                    return false;
                }
            }
            match filter {
                Some(f) => record
                    .field(&f.key)
                    .filter(|v| !v.is_empty())
                    .is_some_and(|v| v.contains(&f.value)),
                None => true,
            }
        })
        .map(|record| record.display_name.clone())
        .collect();

    display_list.sort();
    display_list
}
