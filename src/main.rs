//! printmapper - Main entry point
//!
//! Thin dispatcher over the library: parses the CLI, runs the requested
//! workflow, and turns the result into a process exit code. This is the
//! only place the process terminates.

use log::{error, info};
use std::process::ExitCode;

use printmapper::cli::{Cli, Commands};
use printmapper::config::InstallerConfig;
use printmapper::queues::QueueFilter;
use printmapper::workflow::{self, InstallRequest, RunOutcome};
use printmapper::{generator, QueueCatalog};

/// Initialize the logger with appropriate settings
fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;

    Builder::from_default_env()
        .format(|buf, record| {
            writeln!(buf, "PRINTMAPPER [{}] {}", record.level(), record.args())
        })
        .filter_level(log::LevelFilter::Info)
        .parse_default_env() // Allows RUST_LOG env var to override
        .init();
}

/// The management agent passes empty strings for unused positional slots.
fn non_empty(arg: Option<String>) -> Option<String> {
    arg.filter(|s| !s.is_empty())
}

fn main() -> ExitCode {
    init_logger();

    let cli = Cli::parse_args();
    match cli.command {
        Commands::Generate {
            config,
            infile,
            exclude,
        } => run_generate(&config, &infile, exclude.as_deref()),
        Commands::Install {
            queue,
            filter_key,
            filter_value,
            catalog,
            config,
            ..
        } => run_install(
            non_empty(queue),
            non_empty(filter_key),
            non_empty(filter_value),
            &catalog,
            config.as_deref(),
        ),
    }
}

fn run_generate(
    config: &std::path::Path,
    infile: &std::path::Path,
    exclude: Option<&std::path::Path>,
) -> ExitCode {
    info!("Generating installer script from {}", infile.display());
    match generator::run(config, infile, exclude) {
        Ok(()) => {
            println!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run_install(
    preselected: Option<String>,
    filter_key: Option<String>,
    filter_value: Option<String>,
    catalog_path: &std::path::Path,
    config_path: Option<&std::path::Path>,
) -> ExitCode {
    let config = match config_path {
        Some(path) => match InstallerConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                eprintln!("{e}");
                return ExitCode::from(e.exit_code() as u8);
            }
        },
        None => InstallerConfig::default(),
    };

    let catalog = match load_catalog(catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("{e}");
            workflow::report_failure(&config, &e);
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    // Filtering requires both halves of the key/value pair.
    let filter = match (filter_key, filter_value) {
        (Some(key), Some(value)) => Some(QueueFilter { key, value }),
        _ => None,
    };
    let request = InstallRequest {
        preselected,
        filter,
    };

    match workflow::run(&config, &catalog, &request) {
        Ok(RunOutcome::Mapped(queue)) => {
            info!("Queue {queue} mapped; exiting");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Cancelled) => {
            info!("Selection cancelled; exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            workflow::report_failure(&config, &e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn load_catalog(path: &std::path::Path) -> printmapper::Result<QueueCatalog> {
    let json = std::fs::read_to_string(path)?;
    QueueCatalog::from_json(&json)
}
