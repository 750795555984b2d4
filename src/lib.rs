// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Email Address Detector
//!
//! Conservative, RFC 5322 aware recognition of email addresses, built for
//! sensitive-data (PII) detection.
//!
//! # Modes
//!
//! - Exact validation of a standalone string, including quoted local-parts
//!   and `[IPv4]` / `[IPv6:...]` address literals
//! - Heuristic scanning of free text, with boundary recovery around noise
//!   characters and chained addresses
//!
//! Neither mode ever fails outward: malformed input, oversized input and
//! internal failures all read as "invalid" or "no match".
//!
//! # Example
//!
//! ```rust
//! use email_detector::{contains, extract, is_valid};
//!
//! assert!(is_valid("\"user name\"@example.com"));
//! assert!(!is_valid("user..double@domain.com"));
//!
//! let text = "first@domain.com then admin@test.org";
//! assert!(contains(text));
//! assert_eq!(extract(text), vec!["first@domain.com", "admin@test.org"]);
//! ```

pub mod classify;
mod config;
pub mod domain_part;
mod error;
pub mod local_part;
mod scanner;
mod stats;
mod types;
mod validator;

pub use config::{Config, Limits, Policy, ScanCharset};
pub use error::{DetectError, Result};
pub use scanner::{AddressScanner, EmailScanner};
pub use stats::{StatsSnapshot, ValidationStats};
pub use types::*;
pub use validator::{AddressValidator, EmailValidator};

use std::sync::LazyLock;

static SHARED_VALIDATOR: LazyLock<EmailValidator> = LazyLock::new(EmailValidator::new);
static SHARED_SCANNER: LazyLock<EmailScanner> = LazyLock::new(EmailScanner::new);

/// Process-wide validator with the default configuration
#[must_use]
pub fn shared_validator() -> &'static EmailValidator {
    &SHARED_VALIDATOR
}

/// Process-wide scanner with the default configuration
#[must_use]
pub fn shared_scanner() -> &'static EmailScanner {
    &SHARED_SCANNER
}

/// Validate a standalone address with the shared validator
#[must_use]
pub fn is_valid(email: &str) -> bool {
    shared_validator().is_valid(email)
}

/// Check whether `text` contains at least one address
#[must_use]
pub fn contains(text: &str) -> bool {
    shared_scanner().contains(text)
}

/// Distinct addresses found in `text`, in order of first occurrence
#[must_use]
pub fn extract(text: &str) -> Vec<String> {
    shared_scanner().extract(text)
}
