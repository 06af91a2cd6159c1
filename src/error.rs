//! Error handling for printmapper.
//!
//! Provides centralized error handling with proper error types using thiserror.
//! All errors in the crate should use these types so the top-level dispatcher
//! can decide the process exit code in one place.

use thiserror::Error;

/// Main error type for printmapper
#[derive(Error, Debug)]
pub enum PrintMapperError {
    /// IO errors (file operations, template output, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing, missing CSV columns,
    /// malformed option entries)
    #[error("Configuration error: {0}")]
    Config(String),

    /// CSV parsing errors from the input queue definitions
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template errors (missing placeholder in the installer template)
    #[error("Template error: {0}")]
    Template(String),

    /// Subprocess errors (external tool failed to start or exited abnormally)
    #[error("Process error: {0}")]
    Process(String),

    /// Environment errors (dialog helper or management agent unavailable
    /// and install-on-demand remediation failed)
    #[error("Environment error: {0}")]
    Environment(String),

    /// A required driver could not be found or installed
    #[error("Driver unavailable: {0}")]
    DriverUnavailable(String),

    /// Queue mapping failed (queue-admin command exited abnormally)
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// A queue name was requested that is not in the available list
    #[error("Queue not available: {0}")]
    QueueNotAvailable(String),

    /// Every unmapped queue is filtered out; nothing to offer the user
    #[error("No currently-unmapped queues are available")]
    NoAvailableQueues,
}

/// Result type alias for printmapper operations
pub type Result<T> = std::result::Result<T, PrintMapperError>;

// Convenient error constructors
impl PrintMapperError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a template error
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Create a process error
    pub fn process(msg: impl Into<String>) -> Self {
        Self::Process(msg.into())
    }

    /// Create an environment error
    pub fn environment(msg: impl Into<String>) -> Self {
        Self::Environment(msg.into())
    }

    /// Create a driver-unavailable error
    pub fn driver_unavailable(msg: impl Into<String>) -> Self {
        Self::DriverUnavailable(msg.into())
    }

    /// Create a mapping error
    pub fn mapping(msg: impl Into<String>) -> Self {
        Self::Mapping(msg.into())
    }

    /// Exit code reported to the invoking management agent.
    ///
    /// Callers treat exit status coarsely, but "nothing to do" gets a
    /// distinct code so automation can tell it apart from a real failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoAvailableQueues => 2,
            _ => 1,
        }
    }
}
