//! Local-part grammar (the portion before `@`)

use crate::classify;
use crate::config::ScanCharset;
use crate::types::ValidationMode;

/// RFC 5321 section 4.5.3.1.1
pub const MAX_LOCAL_PART: usize = 64;

/// Validate `text[start..end]` as a local-part.
///
/// In [`ValidationMode::Exact`] a leading `"` selects the quoted-string form,
/// anything else the dot-atom form. [`ValidationMode::Scan`] never accepts
/// quoted strings and restricts characters to `charset`.
#[must_use]
pub fn validate(
    text: &[u8],
    start: usize,
    end: usize,
    mode: ValidationMode,
    charset: ScanCharset,
) -> bool {
    if start >= end || end > text.len() || end - start > MAX_LOCAL_PART {
        return false;
    }
    let part = &text[start..end];

    match mode {
        ValidationMode::Scan => validate_scan(part, charset),
        ValidationMode::Exact if part[0] == b'"' => validate_quoted_string(part),
        ValidationMode::Exact => validate_dot_atom(part, classify::is_atext),
    }
}

/// atext runs separated by single dots
fn validate_dot_atom(part: &[u8], allowed: fn(u8) -> bool) -> bool {
    if part.first() == Some(&b'.') || part.last() == Some(&b'.') {
        return false;
    }

    let mut prev_dot = false;
    for &c in part {
        if c == b'.' {
            if prev_dot {
                return false;
            }
            prev_dot = true;
        } else {
            if !allowed(c) {
                return false;
            }
            prev_dot = false;
        }
    }
    true
}

/// `"` qtext / quoted-pair / WSP `"`
fn validate_quoted_string(part: &[u8]) -> bool {
    if part.len() < 3 || part[0] != b'"' || part[part.len() - 1] != b'"' {
        return false;
    }

    let mut escaped = false;
    for &c in &part[1..part.len() - 1] {
        if escaped {
            if !c.is_ascii() {
                return false;
            }
            escaped = false;
        } else if c == b'\\' {
            escaped = true;
        } else if c == b'"' {
            return false;
        } else if !classify::is_qtext(c) && c != b' ' && c != b'\t' {
            return false;
        }
    }

    // A trailing backslash would have escaped the closing quote
    !escaped
}

fn validate_scan(part: &[u8], charset: ScanCharset) -> bool {
    if part[0] == b'"' {
        return false;
    }
    validate_dot_atom(part, charset.predicate())
}
