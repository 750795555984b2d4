//! Tunable limits and grammar policy

use crate::classify;
use crate::error::{DetectError, Result};
use serde::{Deserialize, Serialize};

/// Which characters the scanner accepts in a local-part carved out of free text
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScanCharset {
    /// Full RFC 5322 atext set
    #[default]
    Atext,

    /// Alphanumerics plus `. - _ +` only
    Conservative,
}

impl ScanCharset {
    /// Bytes a scanned local-part may contain. Anything else ends left
    /// expansion and triggers recovery.
    #[must_use]
    pub const fn predicate(self) -> fn(u8) -> bool {
        match self {
            Self::Atext => classify::is_atext,
            Self::Conservative => classify::is_conservative_local,
        }
    }
}

/// Grammar policy flags
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Policy {
    /// Accept `user@domain` (RFC 5321 section 2.3.5). When disabled, a domain
    /// needs at least two labels and an alphabetic TLD.
    pub single_label_domains: bool,

    /// Accept IPv6 literals without the `IPv6:` tag, e.g. `[::1]`
    pub bare_ipv6_literals: bool,

    /// Local-part charset used while scanning text
    pub scan_charset: ScanCharset,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            single_label_domains: true,
            bare_ipv6_literals: true,
            scan_charset: ScanCharset::Atext,
        }
    }
}

/// Size and work limits
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Limits {
    /// Largest text the scanner accepts, in bytes
    pub max_input_size: usize,

    /// How far left of an `@` the scanner walks
    pub max_left_scan: usize,

    /// Maximum number of distinct addresses returned by one extraction
    pub max_extract: usize,

    /// Maximum number of `@` candidates examined by one extraction
    pub max_scan_iterations: usize,

    /// Maximum characters covered by boundary expansion over a whole scan
    pub max_total_scanned: usize,

    /// Shortest text worth scanning
    pub min_scan_length: usize,

    /// Shortest standalone address
    pub min_email_length: usize,

    /// Longest standalone address (RFC 5321)
    pub max_email_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_size: 10 * 1024 * 1024,
            max_left_scan: 4096,
            max_extract: 10_000,
            max_scan_iterations: 100_000,
            max_total_scanned: 1_000_000,
            min_scan_length: 5,
            min_email_length: 5,
            max_email_length: 320,
        }
    }
}

/// Detector configuration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub limits: Limits,
    pub policy: Policy,
}

impl Config {
    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make every operation fail
    pub fn validate(&self) -> Result<()> {
        let limits = &self.limits;

        let nonzero = [
            ("max_input_size", limits.max_input_size),
            ("max_left_scan", limits.max_left_scan),
            ("max_extract", limits.max_extract),
            ("max_scan_iterations", limits.max_scan_iterations),
            ("max_total_scanned", limits.max_total_scanned),
            ("max_email_length", limits.max_email_length),
        ];
        for (field, value) in nonzero {
            if value == 0 {
                return Err(DetectError::InvalidConfig {
                    field,
                    details: "must be greater than zero".into(),
                });
            }
        }

        if limits.min_email_length > limits.max_email_length {
            return Err(DetectError::InvalidConfig {
                field: "min_email_length",
                details: format!(
                    "{} exceeds max_email_length {}",
                    limits.min_email_length, limits.max_email_length
                ),
            });
        }

        if limits.min_scan_length > limits.max_input_size {
            return Err(DetectError::InvalidConfig {
                field: "min_scan_length",
                details: format!(
                    "{} exceeds max_input_size {}",
                    limits.min_scan_length, limits.max_input_size
                ),
            });
        }

        Ok(())
    }
}
