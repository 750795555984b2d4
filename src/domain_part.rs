//! Domain-part grammar (the portion after `@`)
//!
//! A domain is either a dotted sequence of labels or a bracketed address
//! literal holding an IPv4 address, a tagged `IPv6:` address, or (when
//! [`Policy::bare_ipv6_literals`] is set) an untagged IPv6 address.

use crate::classify;
use crate::config::Policy;

/// RFC 1035 limits
pub const MAX_DOMAIN_PART: usize = 253;
pub const MAX_LABEL_LENGTH: usize = 63;

const MAX_IPV6_GROUPS: usize = 8;
const MAX_HEXTET_DIGITS: usize = 4;

/// Validate `text[start..end]` as a domain-part
#[must_use]
pub fn validate(text: &[u8], start: usize, end: usize, policy: &Policy) -> bool {
    if start >= end || end > text.len() {
        return false;
    }
    let part = &text[start..end];

    if part[0] == b'[' {
        validate_ip_literal(part, policy)
    } else {
        validate_labels(part, policy.single_label_domains)
    }
}

fn validate_labels(part: &[u8], single_label: bool) -> bool {
    if part.is_empty() || part.len() > MAX_DOMAIN_PART {
        return false;
    }

    let first = part[0];
    let last = part[part.len() - 1];
    if matches!(first, b'.' | b'-') || matches!(last, b'.' | b'-') {
        return false;
    }

    let mut count = 0;
    let mut tld: &[u8] = &[];
    for label in part.split(|&c| c == b'.') {
        if !validate_label(label) {
            return false;
        }
        count += 1;
        tld = label;
    }

    if count >= 2 && !tld.iter().all(|&c| classify::is_alphanumeric(c)) {
        return false;
    }

    if !single_label && (count < 2 || !tld.iter().all(|&c| classify::is_alpha(c))) {
        return false;
    }

    count >= 1
}

fn validate_label(label: &[u8]) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
        return false;
    }
    if label[0] == b'-' || label[label.len() - 1] == b'-' {
        return false;
    }
    label
        .iter()
        .all(|&c| classify::is_alphanumeric(c) || c == b'-')
}

/// Four dot-separated decimal octets, consuming the whole input
pub(crate) fn validate_ipv4(part: &[u8]) -> bool {
    let mut octets = 0;
    for octet in part.split(|&c| c == b'.') {
        octets += 1;
        if octets > 4 || !validate_octet(octet) {
            return false;
        }
    }
    octets == 4
}

fn validate_octet(octet: &[u8]) -> bool {
    // Three digits at most, so the value below cannot overflow
    if octet.is_empty() || octet.len() > 3 {
        return false;
    }
    if !octet.iter().all(|&c| classify::is_digit(c)) {
        return false;
    }
    if octet[0] == b'0' && octet.len() > 1 {
        return false;
    }
    let value = octet
        .iter()
        .fold(0u16, |acc, &c| acc * 10 + u16::from(c - b'0'));
    value <= 255
}

/// Colon-separated hextets with at most one `::` and an optional IPv4 tail
pub(crate) fn validate_ipv6(part: &[u8]) -> bool {
    let len = part.len();
    if len == 0 {
        return false;
    }

    let mut groups = 0;
    let mut compressed = false;
    let mut pos = 0;

    if part.starts_with(b"::") {
        compressed = true;
        pos = 2;
        if pos == len {
            return true;
        }
    } else if part[0] == b':' {
        return false;
    }

    // Every pass consumes at least one byte or returns, so this terminates
    loop {
        let seg_start = pos;
        while pos < len && classify::is_hex_digit(part[pos]) {
            pos += 1;
            if pos - seg_start > MAX_HEXTET_DIGITS {
                return false;
            }
        }
        let digits = pos - seg_start;

        if digits > 0 {
            groups += 1;
            if groups > MAX_IPV6_GROUPS {
                return false;
            }

            if pos < len && part[pos] == b'.' {
                // An embedded IPv4 address fills the last two groups
                if !validate_ipv4(&part[seg_start..]) {
                    return false;
                }
                groups += 1;
                break;
            }
        }

        if pos >= len {
            break;
        }
        if part[pos] != b':' {
            return false;
        }
        pos += 1;

        if pos < len && part[pos] == b':' {
            if compressed {
                return false;
            }
            compressed = true;
            pos += 1;
            if pos >= len {
                break;
            }
        } else if digits == 0 || pos >= len {
            return false;
        }
    }

    if compressed {
        groups < MAX_IPV6_GROUPS
    } else {
        groups == MAX_IPV6_GROUPS
    }
}

fn validate_ip_literal(part: &[u8], policy: &Policy) -> bool {
    let len = part.len();
    if len < 3 || part[0] != b'[' || part[len - 1] != b']' {
        return false;
    }
    let content = &part[1..len - 1];

    if content.len() >= 5 && content[..5].eq_ignore_ascii_case(b"ipv6:") {
        let rest = &content[5..];
        // "IPv6::1" shares the tag's colon with the compression run
        let addr = if rest.starts_with(b":") && !rest.starts_with(b"::") {
            &content[4..]
        } else {
            rest
        };
        return validate_ipv6(addr);
    }

    if validate_ipv4(content) {
        return true;
    }

    policy.bare_ipv6_literals && content.contains(&b':') && validate_ipv6(content)
}
