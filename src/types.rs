//! Core value types shared by the validators and the scanner

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Local-part grammar strictness
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ValidationMode {
    /// Full RFC 5322 grammar, including quoted strings
    #[default]
    Exact,

    /// Narrower grammar for local-parts carved out of free text
    Scan,
}

/// Half-open byte interval `[start, end)` over an input text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True when the span is non-empty and lies within a text of `len` bytes
    #[must_use]
    pub const fn fits(&self, len: usize) -> bool {
        self.start < self.end && self.end <= len
    }

    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Outcome of boundary expansion around one `@`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundaries {
    /// Candidate address span
    pub span: Span,

    /// Whether the characters around the span allow it to be an address
    pub valid: bool,

    /// Where to resume scanning if the candidate is rejected
    pub skip_to: Option<usize>,
}

impl Boundaries {
    pub(crate) const fn rejected(at: usize, skip_to: usize) -> Self {
        Self {
            span: Span::new(at, at),
            valid: false,
            skip_to: Some(skip_to),
        }
    }
}

/// An address found in free text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailMatch {
    /// The address, verbatim from the input
    pub address: String,

    /// Byte offsets of its first occurrence
    pub span: Span,
}

impl EmailMatch {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// Local part (before the last `@`)
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.address
            .rsplit_once('@')
            .map_or(self.address.as_str(), |(local, _)| local)
    }

    /// Domain part (after the last `@`)
    #[must_use]
    pub fn domain(&self) -> &str {
        self.address
            .rsplit_once('@')
            .map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for EmailMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}
