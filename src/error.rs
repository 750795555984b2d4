//! Error types for email detection

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors raised inside the detector.
///
/// None of these reach callers of [`is_valid`](crate::is_valid),
/// [`contains`](crate::contains) or [`extract`](crate::extract): the public
/// operations turn every error into a negative result and bump the error
/// counter. [`EmailValidator::check`](crate::EmailValidator::check) and
/// [`EmailScanner::try_find`](crate::EmailScanner::try_find) expose them directly.
#[derive(Error, Debug)]
pub enum DetectError {
    /// Input is shorter than the smallest possible address
    #[error("Input too short: {len} < {min}")]
    InputTooShort { len: usize, min: usize },

    /// Input exceeds the configured size limit
    #[error("Input too large: {len} > {max}")]
    InputTooLarge { len: usize, max: usize },

    /// Boundary expansion re-scanned more characters than allowed
    #[error("Scan budget exhausted after {0} characters")]
    ScanBudgetExhausted(usize),

    /// The scanner visited more `@` candidates than allowed
    #[error("Iteration budget exhausted after {0} candidates")]
    IterationBudgetExhausted(usize),

    /// Could not reserve memory for results
    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// Configuration could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration is internally inconsistent
    #[error("Invalid configuration for {field}: {details}")]
    InvalidConfig {
        field: &'static str,
        details: String,
    },
}

/// Result type for detection operations
pub type Result<T> = std::result::Result<T, DetectError>;
