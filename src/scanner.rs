//! Heuristic detection of addresses in free text
//!
//! Every `@` in the text is a candidate. Around each one the scanner grows a
//! span rightwards over domain characters and leftwards over local-part
//! characters, then checks that the characters just outside the span can
//! plausibly delimit an address. Spans that pass are checked against the
//! local-part grammar in [`ValidationMode::Scan`] and against the domain
//! grammar.
//!
//! Address literals (`user@[10.0.0.1]`) are never reported here; use
//! [`EmailValidator`](crate::EmailValidator) for those.

use crate::classify;
use crate::config::Config;
use crate::error::{DetectError, Result};
use crate::stats::ValidationStats;
use crate::types::{Boundaries, EmailMatch, Span, ValidationMode};
use crate::{domain_part, local_part};
use std::collections::HashSet;
use std::ops::ControlFlow;
use tracing::{debug, trace};

/// Finds addresses embedded in arbitrary text
pub trait AddressScanner: Send + Sync {
    /// True as soon as one address is found. Never panics.
    fn contains(&self, text: &str) -> bool;

    /// Distinct addresses in order of first occurrence. Never panics.
    fn extract(&self, text: &str) -> Vec<String>;

    fn stats(&self) -> &ValidationStats;
}

/// Conservative address scanner for sensitive-data detection
#[derive(Debug, Default)]
pub struct EmailScanner {
    config: Config,
    stats: ValidationStats,
}

impl EmailScanner {
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

    /// Distinct addresses with the span of their first occurrence.
    ///
    /// Stops early, keeping what was found, when the extraction cap or a
    /// work budget is reached.
    #[must_use]
    pub fn find(&self, text: &str) -> Vec<EmailMatch> {
        self.stats.record_extract();

        let mut matches = Vec::new();
        match self.collect(text, &mut matches) {
            Ok(()) => matches,
            Err(e @ (DetectError::ScanBudgetExhausted(_) | DetectError::IterationBudgetExhausted(_))) => {
                debug!("Stopped scanning early with {} matches: {e}", matches.len());
                self.stats.record_error();
                matches
            }
            Err(e) => {
                debug!("Extraction failed: {e}");
                self.stats.record_error();
                Vec::new()
            }
        }
    }

    /// Like [`find`](Self::find), but reports every limit violation
    /// instead of returning partial results
    pub fn try_find(&self, text: &str) -> Result<Vec<EmailMatch>> {
        let mut matches = Vec::new();
        self.collect(text, &mut matches)?;
        Ok(matches)
    }

    fn collect(&self, text: &str, matches: &mut Vec<EmailMatch>) -> Result<()> {
        let max_extract = self.config.limits.max_extract;
        let expected = (text.len() / 30).min(max_extract);
        matches.try_reserve(expected.min(10))?;

        let mut seen: HashSet<&str> = HashSet::new();
        seen.try_reserve(expected * 13 / 10 + 1)?;

        self.scan(text.as_bytes(), |span| {
            let Some(address) = text.get(span.range()) else {
                return Ok(ControlFlow::Continue(()));
            };
            if seen.insert(address) {
                matches.try_reserve(1)?;
                let mut owned = String::new();
                owned.try_reserve_exact(address.len())?;
                owned.push_str(address);
                matches.push(EmailMatch {
                    address: owned,
                    span,
                });
                if matches.len() >= max_extract {
                    debug!("Extraction cap of {max_extract} reached");
                    return Ok(ControlFlow::Break(()));
                }
            }
            Ok(ControlFlow::Continue(()))
        })
    }

    /// Walk every `@` candidate, calling `on_match` for each accepted span
    fn scan<F>(&self, text: &[u8], mut on_match: F) -> Result<()>
    where
        F: FnMut(Span) -> Result<ControlFlow<()>>,
    {
        let limits = &self.config.limits;
        let policy = &self.config.policy;
        let len = text.len();

        if len > limits.max_input_size {
            return Err(DetectError::InputTooLarge {
                len,
                max: limits.max_input_size,
            });
        }
        if len < limits.min_scan_length {
            return Err(DetectError::InputTooShort {
                len,
                min: limits.min_scan_length,
            });
        }

        let mut pos = 0;
        // Later candidates never expand left of an accepted span's start
        let mut floor = 0;
        let mut consumed_end = 0;
        let mut scanned = 0;
        let mut iterations = 0;

        while pos < len {
            let Some(offset) = text[pos..].iter().position(|&c| c == b'@') else {
                break;
            };
            let at = pos + offset;

            iterations += 1;
            if iterations > limits.max_scan_iterations {
                return Err(DetectError::IterationBudgetExhausted(limits.max_scan_iterations));
            }

            if at == 0 || at + 3 >= len || at < consumed_end {
                pos = at + 1;
                continue;
            }

            let bounds = self.find_boundaries(text, at, floor);
            scanned += (at - bounds.span.start) + (bounds.span.end - at);
            if scanned > limits.max_total_scanned {
                return Err(DetectError::ScanBudgetExhausted(scanned));
            }

            if !bounds.valid {
                trace!(at, span = %bounds.span, "Rejected candidate boundaries");
                pos = bounds.skip_to.unwrap_or(at + 1);
                continue;
            }

            let span = bounds.span;
            // Every reported span must also pass exact validation on its own
            let accepted = span.len() >= limits.min_email_length
                && local_part::validate(
                    text,
                    span.start,
                    at,
                    ValidationMode::Scan,
                    policy.scan_charset,
                )
                && domain_part::validate(text, at + 1, span.end, policy);

            if !accepted {
                trace!(at, %span, "Candidate failed grammar");
                pos = at + 1;
                continue;
            }

            trace!(at, %span, "Accepted candidate");
            floor = floor.max(span.start);
            consumed_end = consumed_end.max(span.end);
            if on_match(span)?.is_break() {
                return Ok(());
            }

            // Resume at the end rather than past it: "a@b.com@c.org" chains
            // a second address whose local-part is "b.com"
            pos = span.end;
        }

        Ok(())
    }

    /// Expand around the `@` at `at`, never looking left of `floor`
    fn find_boundaries(&self, text: &[u8], at: usize, floor: usize) -> Boundaries {
        let len = text.len();
        if at >= len {
            return Boundaries::rejected(at, at + 1);
        }

        // Address literals are left to the exact validator
        if text.get(at + 1) == Some(&b'[') {
            return Boundaries::rejected(at, at + 1);
        }
        let end = expand_right(text, at);

        let floor = floor.max(at.saturating_sub(self.config.limits.max_left_scan));
        let allowed = self.config.policy.scan_charset.predicate();
        let (mut start, invalid_at) = expand_left(text, at, end, floor, allowed);

        let mut recovered = false;
        if let Some(invalid) = invalid_at {
            let from = invalid.max(floor);
            let Some(found) = find_first(text, from, at, classify::is_alphanumeric)
                .or_else(|| find_first(text, from, at, allowed))
            else {
                // Nothing usable between the invalid character and the `@`
                return Boundaries::rejected(at, (invalid + 1).clamp(at + 1, len));
            };
            start = found;
            recovered = true;
        }

        while start < at && text[start] == b'.' {
            start += 1;
        }

        if start < at && start > floor && classify::is_invalid_local(text[start - 1]) {
            if let Some(found) = find_first(text, start, at, classify::is_alphanumeric) {
                start = found;
            }
        }

        if start >= at {
            return Boundaries::rejected(at, (at + 1).min(len));
        }

        let mut valid = true;
        if start > floor {
            valid = left_context_ok(text, start, floor, recovered);
        }
        if valid && end < len {
            valid = right_context_ok(text[end]);
        }

        Boundaries {
            span: Span::new(start, end),
            valid,
            skip_to: None,
        }
    }
}

impl AddressScanner for EmailScanner {
    fn contains(&self, text: &str) -> bool {
        self.stats.record_scan();

        let mut found = false;
        let outcome = self.scan(text.as_bytes(), |_| {
            found = true;
            Ok(ControlFlow::Break(()))
        });

        if let Err(e) = outcome {
            debug!("Scan rejected input: {e}");
            self.stats.record_error();
            return false;
        }
        found
    }

    fn extract(&self, text: &str) -> Vec<String> {
        self.find(text).into_iter().map(|m| m.address).collect()
    }

    fn stats(&self) -> &ValidationStats {
        &self.stats
    }
}

/// End of the domain candidate following the `@` at `at`
fn expand_right(text: &[u8], at: usize) -> usize {
    let len = text.len();
    let mut end = at + 1;

    while end < len && classify::is_domain_char(text[end]) {
        end += 1;
    }
    while end > at + 1 && text[end - 1] == b'.' {
        end -= 1;
    }
    // "user@domain-@other": the hyphen belongs to neither address
    if end < len && text[end] == b'@' {
        while end > at + 1 && text[end - 1] == b'-' {
            end -= 1;
        }
    }
    end
}

/// Walk left from `at` over bytes accepted by `allowed`.
///
/// Returns the start reached and, if expansion stopped on something that
/// cannot be part of a local-part, the position to recover from.
fn expand_left(
    text: &[u8],
    at: usize,
    end: usize,
    floor: usize,
    allowed: fn(u8) -> bool,
) -> (usize, Option<usize>) {
    let len = text.len();
    let mut start = at;

    while start > floor {
        let prev = text[start - 1];

        // The local-part of a chained address begins right after the previous `@`
        if prev == b'@' {
            break;
        }

        if prev == b'.' && start >= floor + 2 && text[start - 2] == b'.' {
            return (start, Some(start - 1));
        }

        if classify::is_invalid_local(prev) || !allowed(prev) {
            return (start, Some(start));
        }

        if classify::is_quote(prev) {
            // Doubled quote: both belong to the token
            if start >= floor + 2 && text[start - 2] == prev {
                start -= 1;
                continue;
            }
            // The same quote right after the domain closes a quoted address
            if end < len && text[end] == prev {
                if end + 1 < len && text[end + 1] == prev {
                    start -= 1;
                    continue;
                }
                break;
            }
            // Unmatched: plain atext
            start -= 1;
            continue;
        }

        start -= 1;
    }

    (start, None)
}

/// First index in `[from, limit)` whose byte satisfies `pred`
fn find_first(text: &[u8], from: usize, limit: usize, pred: fn(u8) -> bool) -> Option<usize> {
    let limit = limit.min(text.len());
    if from >= limit {
        return None;
    }
    text[from..limit]
        .iter()
        .position(|&c| pred(c))
        .map(|offset| from + offset)
}

/// Whether the byte before `start` can delimit an address
fn left_context_ok(text: &[u8], start: usize, floor: usize, recovered: bool) -> bool {
    let prev = text[start - 1];

    let mut valid = if recovered {
        // Never split a word in two
        !classify::is_alphanumeric(prev)
    } else {
        classify::is_invalid_local(prev)
            || classify::is_scan_boundary(prev)
            || matches!(prev, b'@' | b'.' | b'=' | b'\'' | b'`' | b'"' | b'/')
    };

    if start >= floor + 2 {
        let before = text[start - 2];
        if classify::is_quote(prev)
            && (classify::is_scan_boundary(before)
                || matches!(before, b'=' | b':')
                || classify::is_quote(before))
        {
            valid = true;
        }
        // URL authority, "http://user@host"
        if prev == b'/' && before == b'/' {
            valid = true;
        }
    }

    valid
}

/// Whether the byte at the span's end can delimit an address
const fn right_context_ok(next: u8) -> bool {
    classify::is_scan_right_boundary(next)
        || matches!(next, b'\'' | b'`' | b'"' | b'@' | b'\\')
        || classify::is_atext(next)
}
