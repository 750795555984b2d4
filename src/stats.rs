//! Advisory operation counters

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Counters for validations, scans, extractions and errors.
///
/// Increments are relaxed and not ordered with the results they describe.
#[derive(Debug)]
pub struct ValidationStats {
    validations: AtomicU64,
    scans: AtomicU64,
    extracts: AtomicU64,
    errors: AtomicU64,
    since_millis: AtomicI64,
}

impl Default for ValidationStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            validations: AtomicU64::new(0),
            scans: AtomicU64::new(0),
            extracts: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            since_millis: AtomicI64::new(Utc::now().timestamp_millis()),
        }
    }

    pub fn record_validation(&self) {
        self.validations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_scan(&self) {
        self.scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_extract(&self) {
        self.extracts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn validations(&self) -> u64 {
        self.validations.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn scans(&self) -> u64 {
        self.scans.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn extracts(&self) -> u64 {
        self.extracts.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Acquire)
    }

    /// Zero every counter and restart the collection window
    pub fn reset(&self) {
        self.validations.store(0, Ordering::Relaxed);
        self.scans.store(0, Ordering::Relaxed);
        self.extracts.store(0, Ordering::Relaxed);
        self.errors.store(0, Ordering::Relaxed);
        self.since_millis
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let since = DateTime::from_timestamp_millis(self.since_millis.load(Ordering::Acquire))
            .unwrap_or_default();
        StatsSnapshot {
            validations: self.validations(),
            scans: self.scans(),
            extracts: self.extracts(),
            errors: self.errors(),
            since,
        }
    }
}

/// Point-in-time copy of [`ValidationStats`]
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub validations: u64,
    pub scans: u64,
    pub extracts: u64,
    pub errors: u64,

    /// Start of the collection window (creation or last reset)
    pub since: DateTime<Utc>,
}

impl StatsSnapshot {
    /// Errors per validation, 0.0 when nothing was validated
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn error_rate(&self) -> f64 {
        if self.validations == 0 {
            0.0
        } else {
            self.errors as f64 / self.validations as f64
        }
    }

    #[must_use]
    pub const fn success_count(&self) -> u64 {
        self.validations.saturating_sub(self.errors)
    }

    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }
}
