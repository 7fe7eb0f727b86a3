//! Error types for the skipping stone model.
//!
//! Fallible operations return `SkipResult<T>`. Impact-resolution failures are
//! never errors: they are folded into `ImpactOutcome::SkipFailure`.

use thiserror::Error;

/// Unified error type for `ss-core`.
#[derive(Debug, Error)]
pub enum SkipError {
    /// A construction parameter is non-finite or outside its physical range.
    #[error("Invalid construction input: {field} = {value}")]
    InvalidConstructionInput { field: &'static str, value: f64 },

    /// Reading a preset file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A preset file is not valid YAML for the requested type.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// No preset with the given name exists.
    #[error("Preset not found: {0}")]
    NotFound(String),
}

/// Convenience alias for `Result<T, SkipError>`.
pub type SkipResult<T> = Result<T, SkipError>;
