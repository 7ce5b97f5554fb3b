//! Error types for mach

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mach operations
pub type Result<T> = std::result::Result<T, MachError>;

/// Main error type for mach
#[derive(Error, Debug)]
pub enum MachError {
    /// Operation set could not be turned into argument schemas
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Batch dispatch errors
    #[error("{0}")]
    Dispatch(#[from] DispatchError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while building argument schemas from declared operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Operation '{0}' is declared more than once")]
    DuplicateOperation(String),

    #[error("Parameter '{parameter}' is declared more than once in '{operation}'")]
    DuplicateParameter { operation: String, parameter: String },

    #[error("'{0}' is not a valid name")]
    InvalidName(String),

    #[error("'{0}' starts with '_' and cannot be exposed")]
    PrivateName(String),

    #[error("'{0}' is reserved")]
    ReservedName(String),

    #[error("Required parameter '{parameter}' follows an optional one in '{operation}'")]
    RequiredAfterOptional { operation: String, parameter: String },

    #[error("Boolean parameter '{parameter}' in '{operation}' must have a default")]
    RequiredFlag { operation: String, parameter: String },

    #[error("Default for '{parameter}' in '{operation}' does not match its declared type {expected}")]
    DefaultType {
        operation: String,
        parameter: String,
        expected: &'static str,
    },

    #[error("Operation '{0}' has no handler")]
    MissingHandler(String),

    #[error("Default operation '{0}' is not defined")]
    UnknownDefault(String),
}

/// Errors raised by the batch (argv) dispatcher
#[derive(Error, Debug)]
pub enum DispatchError {
    /// argv did not match the grammar; also carries help and version display
    #[error("{0}")]
    Usage(#[from] clap::Error),

    #[error("Could not parse JSON in {carrier}: {source}")]
    Json {
        carrier: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Operation '{0}' is not defined")]
    UnknownOperation(String),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors an operation handler may return
#[derive(Error, Debug)]
pub enum OperationError {
    /// A value could not be used the way the operation needs it
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// The call did not match the operation's parameter list
    #[error("Malformed call: {0}")]
    MalformedCall(String),

    #[error(transparent)]
    Failed(#[from] anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl OperationError {
    /// Build an `InvalidValue` error
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        OperationError::InvalidValue {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Shell-style tokenization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("No closing quotation")]
    NoClosingQuotation,

    #[error("No escaped character")]
    NoEscapedCharacter,
}

/// Configuration parsing errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {error}")]
    Read { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),
}

/// Specialized result type for schema construction
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

/// Specialized result type for batch dispatch
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;

/// Specialized result type for operation handlers
pub type OperationResult<T> = std::result::Result<T, OperationError>;

/// Specialized result type for configuration parsing
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Helper to determine if an error should be reported as unrecognized shell input
/// rather than as a failure of the operation itself
pub fn is_fallback(err: &OperationError) -> bool {
    matches!(
        err,
        OperationError::InvalidValue { .. } | OperationError::MalformedCall(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_fallback() {
        assert!(is_fallback(&OperationError::invalid("a", "not an integer")));
        assert!(is_fallback(&OperationError::MalformedCall("too many".into())));
        assert!(!is_fallback(&OperationError::Failed(anyhow::anyhow!("boom"))));
    }

    #[test]
    fn test_tokenize_error_messages() {
        assert_eq!(
            TokenizeError::NoClosingQuotation.to_string(),
            "No closing quotation"
        );
        assert_eq!(
            TokenizeError::NoEscapedCharacter.to_string(),
            "No escaped character"
        );
    }
}
