use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// printmapper - printer queue installer tooling for managed endpoints
#[derive(Parser)]
#[command(name = "printmapper")]
#[command(about = "Converts CSV printer queue definitions into an installer script and maps queues on demand")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a CSV of printer queues to a JSON catalog and inject it into
    /// the installer script template
    Generate {
        /// Path to generator configuration (JSON)
        config: PathBuf,

        /// Path to input CSV file of printer queues
        infile: PathBuf,

        /// Path to optional newline-delimited exclusions file
        exclude: Option<PathBuf>,
    },
    /// Offer the available (not-yet-mapped) queues and map the selection
    ///
    /// The leading positional arguments match what the management agent
    /// passes to every script it runs; the first three are accepted for
    /// positional compatibility and ignored.
    Install {
        /// Mount point supplied by the management agent (unused)
        mount_point: Option<String>,

        /// Hostname supplied by the management agent (unused)
        hostname: Option<String>,

        /// Running user supplied by the management agent (unused)
        user: Option<String>,

        /// Preselected queue name (skips the interactive picker)
        queue: Option<String>,

        /// Catalog field to filter available queues on
        filter_key: Option<String>,

        /// Substring the filter field must contain
        filter_value: Option<String>,

        /// Extra trailing arguments are tolerated and ignored
        #[arg(hide = true, num_args = 0.., value_name = "EXTRA")]
        extra: Vec<String>,

        /// Path to the queue catalog JSON
        #[arg(long, default_value = "/Library/Application Support/printmapper/printer-queues.json")]
        catalog: PathBuf,

        /// Installer configuration overriding the built-in defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
