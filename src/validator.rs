//! Exact validation of a standalone address

use crate::config::Config;
use crate::error::{DetectError, Result};
use crate::stats::ValidationStats;
use crate::types::ValidationMode;
use crate::{domain_part, local_part};
use tracing::debug;

/// Validates a whole string as one address
pub trait AddressValidator: Send + Sync {
    /// True when `email` is a syntactically complete address. Never panics.
    fn is_valid(&self, email: &str) -> bool;

    fn stats(&self) -> &ValidationStats;
}

/// RFC 5322 addr-spec validator with quoted local-parts and address literals
#[derive(Debug, Default)]
pub struct EmailValidator {
    config: Config,
    stats: ValidationStats,
}

impl EmailValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            stats: ValidationStats::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Validate `email`, reporting length-limit violations as errors.
    ///
    /// `Ok(false)` means the input has an acceptable length but does not
    /// match the grammar.
    pub fn check(&self, email: &str) -> Result<bool> {
        let limits = &self.config.limits;
        let len = email.len();

        if len < limits.min_email_length {
            return Err(DetectError::InputTooShort {
                len,
                min: limits.min_email_length,
            });
        }
        if len > limits.max_email_length {
            return Err(DetectError::InputTooLarge {
                len,
                max: limits.max_email_length,
            });
        }

        let bytes = email.as_bytes();
        let Some(at) = find_unquoted_at(bytes) else {
            return Ok(false);
        };
        if at == 0 || at >= len - 1 {
            return Ok(false);
        }

        Ok(local_part::validate(
            bytes,
            0,
            at,
            ValidationMode::Exact,
            self.config.policy.scan_charset,
        ) && domain_part::validate(bytes, at + 1, len, &self.config.policy))
    }
}

impl AddressValidator for EmailValidator {
    fn is_valid(&self, email: &str) -> bool {
        self.stats.record_validation();

        match self.check(email) {
            Ok(true) => true,
            Ok(false) => {
                self.stats.record_error();
                false
            }
            Err(e) => {
                debug!("Rejected address candidate: {e}");
                self.stats.record_error();
                false
            }
        }
    }

    fn stats(&self) -> &ValidationStats {
        &self.stats
    }
}

/// Position of the single `@` outside quoted strings, if exactly one exists
fn find_unquoted_at(bytes: &[u8]) -> Option<usize> {
    let mut at = None;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, &c) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            b'\\' if in_quotes => escaped = true,
            b'"' => in_quotes = !in_quotes,
            b'@' if !in_quotes => {
                if at.is_some() {
                    return None;
                }
                at = Some(i);
            }
            _ => {}
        }
    }
    at
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquoted_at() {
        assert_eq!(find_unquoted_at(b"user@example.com"), Some(4));
        assert_eq!(find_unquoted_at(b"\"a@b\"@example.com"), Some(5));
        assert_eq!(find_unquoted_at(b"\"a\\\"@b\"@c"), Some(7));
        assert_eq!(find_unquoted_at(b"a@b@c"), None);
        assert_eq!(find_unquoted_at(b"no-at"), None);
    }

    #[test]
    fn length_errors() {
        let validator = EmailValidator::new();
        assert!(matches!(
            validator.check("a@b"),
            Err(DetectError::InputTooShort { len: 3, min: 5 })
        ));
        let long = format!("{}@example.com", "a".repeat(320));
        assert!(matches!(
            validator.check(&long),
            Err(DetectError::InputTooLarge { .. })
        ));
        assert!(matches!(validator.check("user@@example.com"), Ok(false)));
    }
}
