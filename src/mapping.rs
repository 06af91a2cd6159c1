//! Driver resolution and queue mapping.

use crate::catalog::{QueueCatalog, QueueRecord};
use crate::command;
use crate::config::InstallerConfig;
use crate::error::{PrintMapperError, Result};
use crate::policy;
use log::info;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Resolve the driver path for a queue, installing the vendor driver via
/// its policy trigger when it is not already on disk.
///
/// Queues without a vendor driver use the configured generic driver and
/// bypass resolution entirely.
pub fn resolve_driver(config: &InstallerConfig, record: &QueueRecord) -> Result<PathBuf> {
    if !record.has_vendor_driver() {
        info!("{} uses a generic driver", record.display_name);
        return Ok(config.generic_driver_path.clone());
    }

    info!("Queue {} requires a vendor driver", record.display_name);
    let driver = Path::new(&record.driver);
    if !driver.exists() {
        info!("The driver was not found at {}", record.driver);
        info!(
            "Attempting to install drivers via policy trigger {}",
            record.driver_trigger
        );
        if !policy::run_policy(config, &record.driver_trigger, false)? {
            return Err(PrintMapperError::driver_unavailable(format!(
                "policy trigger {} did not install {}",
                record.driver_trigger, record.driver
            )));
        }
    }
    Ok(driver.to_path_buf())
}

/// Build the queue-admin argv for a record: name, location, enable flag,
/// device URI, driver path, plus `-o key=value` pairs.
pub fn queue_admin_args(record: &QueueRecord, driver: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-p".into(),
        record.display_name.clone().into(),
        "-L".into(),
        record.location.clone().into(),
        "-E".into(),
        "-v".into(),
        record.uri.clone().into(),
        "-P".into(),
        driver.as_os_str().to_owned(),
    ];
    for (key, value) in &record.options {
        args.push("-o".into());
        args.push(format!("{key}={value}").into());
    }
    args
}

/// Map a queue by name.
///
/// Callers only pass names drawn from the filtered catalog, so a failed
/// lookup is an internal invariant violation surfaced as an error rather
/// than a panic. The queue-admin command is executed with argv passed as a
/// list; both a failure to start and an abnormal exit are mapping failures.
pub fn add_queue(config: &InstallerConfig, catalog: &QueueCatalog, name: &str) -> Result<()> {
    let record = catalog
        .get(name)
        .ok_or_else(|| PrintMapperError::QueueNotAvailable(name.to_string()))?;

    let driver = resolve_driver(config, record)?;
    let args = queue_admin_args(record, &driver);

    info!(
        "Executing command: {} {}",
        config.queue_admin_path.display(),
        args.iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let output = command::run_command(&config.queue_admin_path, &args)
        .map_err(|e| PrintMapperError::mapping(e.to_string()))?;
    if !output.success {
        return Err(PrintMapperError::mapping(format!(
            "queue-admin command exited with code {}: {}",
            output.exit_code.unwrap_or(-1),
            output.stderr.trim()
        )));
    }

    info!("Queue {} successfully mapped", record.display_name);
    Ok(())
}
