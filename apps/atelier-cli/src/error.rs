//! # CLI Error Type
//!
//! Unified error type for every command.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in atelier-cli                            │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<T, CliError>                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Store Error? ──── StoreError::QueryFailed("...") ─────┐               │
//! │         │                                              │               │
//! │         ▼                                              ▼               │
//! │  Export Error? ─── ExportError::Font { .. } ────── CliError ───► main  │
//! │         │                                              ▲               │
//! │         ▼                                              │               │
//! │  Bad input? ────── CoreError::InvalidDate { .. } ──────┘               │
//! │                                                                         │
//! │  main prints "error[INVALID_INPUT]: ..." and exits with                 │
//! │  ErrorCode::exit_status()                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::path::Path;

use atelier_core::{CoreError, ValidationError};
use atelier_export::ExportError;
use atelier_store::StoreError;

use crate::config::ConfigError;

/// Result alias for command functions.
pub type CliResult<T> = Result<T, CliError>;

/// Error returned from a command.
///
/// ## Serialization
/// With `--json`, failures print as:
/// ```json
/// {
///   "code": "INVALID_INPUT",
///   "message": "Invalid date '2025-13-01': expected YYYY-MM-DD"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes, each mapped to a process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad flags, unreadable dates, nothing selected
    InvalidInput,

    /// Partner list or company profile rejected
    ValidationError,

    /// Config file unreadable or invalid
    ConfigError,

    /// A file could not be read or written
    IoError,

    /// Record store failure
    StoreError,

    /// Rendering or packaging failure
    ExportError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit status for the code (sysexits-style).
    pub fn exit_status(&self) -> i32 {
        match self {
            ErrorCode::InvalidInput | ErrorCode::ValidationError => 65,
            ErrorCode::ConfigError => 78,
            ErrorCode::IoError => 74,
            ErrorCode::StoreError => 73,
            ErrorCode::ExportError => 70,
            ErrorCode::Internal => 1,
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::InvalidInput, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    /// An I/O failure on `path`.
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        CliError::new(
            ErrorCode::IoError,
            format!("{}: {}", path.display(), err),
        )
    }

    /// A JSON file that could not be parsed.
    pub fn parse(path: &Path, err: serde_json::Error) -> Self {
        CliError::new(
            ErrorCode::InvalidInput,
            format!("{} is not valid JSON: {}", path.display(), err),
        )
    }

    pub fn exit_status(&self) -> i32 {
        self.code.exit_status()
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => CliError::from(e),
            StoreError::ConnectionFailed(e) => {
                tracing::error!("Record store connection failed: {}", e);
                CliError::new(ErrorCode::StoreError, "Record store connection failed")
            }
            StoreError::MigrationFailed(e) => {
                tracing::error!("Record store migration failed: {}", e);
                CliError::new(ErrorCode::StoreError, "Record store migration failed")
            }
            StoreError::PoolExhausted => {
                CliError::new(ErrorCode::StoreError, "Record store is busy")
            }
            other => {
                tracing::error!("Record store operation failed: {}", other);
                CliError::new(ErrorCode::StoreError, other.to_string())
            }
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => CliError::from(e),
            other => CliError::invalid_input(other.to_string()),
        }
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Io(e) => CliError::new(ErrorCode::IoError, e.to_string()),
            ExportError::Empty(reason) => CliError::invalid_input(format!("Nothing to export: {reason}")),
            other => CliError::new(ErrorCode::ExportError, other.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_through_store() {
        let err = CliError::from(StoreError::Validation(ValidationError::Duplicate {
            field: "name".to_string(),
            value: "A".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name 'A' already exists");
        assert_eq!(err.exit_status(), 65);
    }

    #[test]
    fn test_core_date_error_is_input() {
        let err = CliError::from(CoreError::InvalidDate {
            value: "2025-13-01".to_string(),
        });
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message.contains("2025-13-01"));
    }

    #[test]
    fn test_export_empty_is_input() {
        let err = CliError::from(ExportError::Empty("no documents selected".to_string()));
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_serializes_code() {
        let json = serde_json::to_value(CliError::internal("boom")).unwrap();
        assert_eq!(json["code"], "INTERNAL");
        assert_eq!(json["message"], "boom");
    }
}
