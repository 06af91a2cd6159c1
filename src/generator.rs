//! CSV-to-catalog conversion and installer script generation.
//!
//! The generator runs once at administrator time: it validates the CSV of
//! queue definitions, drops excluded queues, writes the catalog JSON, and
//! stamps the catalog into the installer script template.

use crate::catalog::{QueueCatalog, QueueRecord, REQUIRED_FIELDS};
use crate::config::{GeneratorConfig, OptionsDelimiter};
use crate::error::{PrintMapperError, Result};
use crate::template;
use log::info;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Read the optional newline-delimited exclusion list.
///
/// Each line is one DisplayName; queues listed here are dropped before the
/// catalog is emitted.
pub fn read_exclusions(path: &Path) -> Result<HashSet<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        PrintMapperError::config(format!(
            "failed to read exclusions file {}: {e}",
            path.display()
        ))
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Parse a non-empty `Options` cell into a key/value mapping.
///
/// Entries are split on the configured delimiter, then on `=`. An entry
/// without `=` is a fatal input error.
pub fn parse_options(raw: &str, delimiter: OptionsDelimiter) -> Result<BTreeMap<String, String>> {
    let mut options = BTreeMap::new();
    for entry in delimiter.entries(raw) {
        let (key, value) = entry.split_once('=').ok_or_else(|| {
            PrintMapperError::config(format!(
                "malformed Options entry '{entry}': expected key=value"
            ))
        })?;
        options.insert(key.to_string(), value.to_string());
    }
    Ok(options)
}

/// Convert a CSV stream into a queue catalog.
///
/// The header must contain every column in [`REQUIRED_FIELDS`]; a missing
/// column is rejected before any row is processed. Rows whose DisplayName is
/// in `exclusions` are skipped.
pub fn catalog_from_csv<R: Read>(
    reader: R,
    exclusions: &HashSet<String>,
    delimiter: OptionsDelimiter,
) -> Result<QueueCatalog> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    for required in REQUIRED_FIELDS {
        if !headers.iter().any(|h| h == *required) {
            return Err(PrintMapperError::config(format!(
                "missing required CSV field: {required}"
            )));
        }
    }

    let column = |name: &str| headers.iter().position(|h| h == name);
    let has_cups_name = column("CUPSName").is_some();

    let mut catalog = QueueCatalog::new();
    for row in csv_reader.records() {
        let row = row?;
        let cell = |name: &str| column(name).and_then(|i| row.get(i)).unwrap_or("");

        let display_name = cell("DisplayName").to_string();
        if exclusions.contains(&display_name) {
            info!("Excluding queue {display_name}");
            continue;
        }

        let raw_options = cell("Options");
        let options = if raw_options.is_empty() {
            BTreeMap::new()
        } else {
            parse_options(raw_options, delimiter)?
        };

        catalog.insert(QueueRecord {
            display_name,
            uri: cell("URI").to_string(),
            driver: cell("Driver").to_string(),
            driver_trigger: cell("DriverTrigger").to_string(),
            location: cell("Location").to_string(),
            cups_name: has_cups_name.then(|| cell("CUPSName").to_string()),
            options,
        });
    }

    Ok(catalog)
}

/// Run the full generation workflow: CSV in, catalog JSON and installer
/// script out.
pub fn run(config_path: &Path, infile: &Path, exclude: Option<&Path>) -> Result<()> {
    let config = GeneratorConfig::load_from_file(config_path)?;

    let exclusions = match exclude {
        Some(path) => read_exclusions(path)?,
        None => HashSet::new(),
    };

    let csv_file = fs::File::open(infile).map_err(|e| {
        PrintMapperError::config(format!("failed to open {}: {e}", infile.display()))
    })?;
    let catalog = catalog_from_csv(csv_file, &exclusions, config.options_delimiter)?;
    info!("Converted {} queue definitions", catalog.len());

    let json = catalog.to_pretty_json()?;
    fs::write(&config.catalog_path, &json)?;
    info!("Wrote catalog to {}", config.catalog_path.display());

    let template_text = fs::read_to_string(&config.template_path).map_err(|e| {
        PrintMapperError::config(format!(
            "failed to read template {}: {e}",
            config.template_path.display()
        ))
    })?;
    let script = template::inject(
        &template_text,
        &config.catalog_placeholder,
        &json,
        &config.substitutions,
    )?;
    template::write_executable(&config.script_path, &script)?;
    info!(
        "Wrote installer script to {}",
        config.script_path.display()
    );

    Ok(())
}
