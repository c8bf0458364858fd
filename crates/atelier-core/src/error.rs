//! # Error Types
//!
//! Domain-specific error types for atelier-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  atelier-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Partner record rule failures                   │
//! │                                                                         │
//! │  atelier-store errors (separate crate)                                 │
//! │  └── StoreError       - Record store failures                          │
//! │                                                                         │
//! │  atelier-export errors (separate crate)                                │
//! │  └── ExportError      - Rendering / archive / sink failures            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → CliError → user      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The document builder itself never fails: malformed input (unknown
//! partner, negative quantity, unknown status) resolves to fallbacks.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A status label could not be parsed where a strict parse was requested.
    #[error("Unknown work status: {0}")]
    UnknownStatus(String),

    /// A date string is not `YYYY-MM-DD`.
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for partner and company records.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., slug with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two partners with the same name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
