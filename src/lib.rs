//! printmapper library
//!
//! Two components used at different times: the generator turns an
//! administrator CSV of printer queue definitions into a JSON catalog and
//! stamps it into an installer script template; the installer runtime reads
//! the catalog, offers the queues not yet mapped on the machine, and maps
//! the selection through the local print-queue administration utility,
//! pulling drivers via device-management policy triggers when needed.

pub mod catalog;
pub mod cli;
pub mod command;
pub mod config;
pub mod dialog;
pub mod error;
pub mod generator;
pub mod mapping;
pub mod policy;
pub mod queues;
pub mod template;
pub mod workflow;

// Re-export main types for convenience
pub use catalog::{QueueCatalog, QueueRecord, REQUIRED_FIELDS};
pub use command::CommandOutput;
pub use config::{GeneratorConfig, InstallerConfig, Messages, OptionsDelimiter};
pub use error::{PrintMapperError, Result};
pub use queues::QueueFilter;
pub use workflow::{InstallRequest, RunOutcome};
