//! Constant-time byte classification

const ALPHA: u8 = 0x01;
const DIGIT: u8 = 0x02;
const ATEXT_SPECIAL: u8 = 0x04;
const HEX: u8 = 0x08;
const DOMAIN: u8 = 0x10;
const QUOTE: u8 = 0x20;
const INVALID_LOCAL: u8 = 0x40;
const BOUNDARY: u8 = 0x80;

/// RFC 5322 atext symbols, plus `.` which the scanner treats as local-part content
const ATEXT_SYMBOLS: &[u8] = b"!#$%&'*+-/=?^_`{|}~.";

/// Structural punctuation that terminates a scanned token
const STRUCTURAL: &[u8] = b"(),:;<>[]";

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];

    // Controls, DEL and everything non-ASCII
    let mut i = 0;
    while i < 256 {
        if i < 0x20 || i >= 0x7f {
            table[i] = INVALID_LOCAL;
        }
        i += 1;
    }

    let mut c = b'0';
    while c <= b'9' {
        table[c as usize] = DIGIT | HEX | DOMAIN;
        c += 1;
    }

    let mut c = b'A';
    while c <= b'Z' {
        let hex = if c <= b'F' { HEX } else { 0 };
        table[c as usize] = ALPHA | DOMAIN | hex;
        table[(c + 32) as usize] = ALPHA | DOMAIN | hex;
        c += 1;
    }

    let mut k = 0;
    while k < ATEXT_SYMBOLS.len() {
        table[ATEXT_SYMBOLS[k] as usize] = ATEXT_SPECIAL;
        k += 1;
    }

    let mut k = 0;
    while k < STRUCTURAL.len() {
        table[STRUCTURAL[k] as usize] = INVALID_LOCAL | BOUNDARY;
        k += 1;
    }

    table[b' ' as usize] = INVALID_LOCAL | BOUNDARY;
    table[b'\t' as usize] = INVALID_LOCAL | BOUNDARY;
    table[b'\n' as usize] = INVALID_LOCAL | BOUNDARY;
    table[b'\r' as usize] = INVALID_LOCAL | BOUNDARY;

    table[b'-' as usize] |= DOMAIN;
    table[b'.' as usize] |= DOMAIN;

    table[b'\'' as usize] |= QUOTE;
    table[b'`' as usize] |= QUOTE;
    table[b'"' as usize] = QUOTE | INVALID_LOCAL;

    table[b'@' as usize] = INVALID_LOCAL;
    table[b'\\' as usize] = INVALID_LOCAL;

    table
}

static TABLE: [u8; 256] = build_table();

#[inline]
const fn has(c: u8, flags: u8) -> bool {
    TABLE[c as usize] & flags != 0
}

#[inline]
#[must_use]
pub const fn is_alpha(c: u8) -> bool {
    has(c, ALPHA)
}

#[inline]
#[must_use]
pub const fn is_digit(c: u8) -> bool {
    has(c, DIGIT)
}

#[inline]
#[must_use]
pub const fn is_alphanumeric(c: u8) -> bool {
    has(c, ALPHA | DIGIT)
}

#[inline]
#[must_use]
pub const fn is_hex_digit(c: u8) -> bool {
    has(c, HEX)
}

/// Letters, digits and the atext symbols (including `.`)
#[inline]
#[must_use]
pub const fn is_atext(c: u8) -> bool {
    has(c, ALPHA | DIGIT | ATEXT_SPECIAL)
}

/// Alphanumerics, `-` and `.`
#[inline]
#[must_use]
pub const fn is_domain_char(c: u8) -> bool {
    has(c, DOMAIN)
}

/// `"`, `'` and `` ` ``
#[inline]
#[must_use]
pub const fn is_quote(c: u8) -> bool {
    has(c, QUOTE)
}

/// Controls, whitespace, `"`, `@`, `\`, structural punctuation and non-ASCII
#[inline]
#[must_use]
pub const fn is_invalid_local(c: u8) -> bool {
    has(c, INVALID_LOCAL)
}

/// Whitespace and `( ) , : ; < > [ ]`
#[inline]
#[must_use]
pub const fn is_scan_boundary(c: u8) -> bool {
    has(c, BOUNDARY)
}

/// A scan boundary, or sentence punctuation that may trail an address
#[inline]
#[must_use]
pub const fn is_scan_right_boundary(c: u8) -> bool {
    has(c, BOUNDARY) || matches!(c, b'.' | b'!' | b'?')
}

/// Printable ASCII other than `\` and `"`
#[inline]
#[must_use]
pub const fn is_qtext(c: u8) -> bool {
    c >= 33 && c <= 126 && c != b'\\' && c != b'"'
}

/// Alphanumerics plus `. - _ +`
#[inline]
#[must_use]
pub const fn is_conservative_local(c: u8) -> bool {
    is_alphanumeric(c) || matches!(c, b'.' | b'-' | b'_' | b'+')
}
