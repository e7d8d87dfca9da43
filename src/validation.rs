//! Lock-free validation core with latency and outcome counters.
//!
//! [`ValidationCore`] runs an arbitrary check against a `u32` value, times
//! it with a monotonic clock, and folds the result into a block of relaxed
//! atomics. It knows nothing about frequencies; the frequency validator and
//! the rate category manager each own one and feed it their own checks.
//!
//! ```text
//! caller thread ──► validate(value, check) ──► check(value) ──► outcome
//!                          │                                       │
//!                          └──── Instant::elapsed ──► metrics ◄────┘
//!                                                 (relaxed atomics)
//! ```
//!
//! No call allocates, blocks, or panics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Maximum number of values evaluated by a single [`ValidationCore::batch_validate`] call.
pub const MAX_BATCH_SIZE: usize = 16;

/// A validation check. Context the check needs is captured by the closure.
pub type CheckFn<'a> = &'a dyn Fn(u32) -> ValidationOutcome;

/// Outcome of a validation-style operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ValidationOutcome {
    /// The value passed.
    Valid = 0,
    /// The input itself is unusable (zero frequency, out-of-band value).
    InvalidInput = 1,
    /// The value is recognised but deviates beyond the allowed tolerance.
    OutOfTolerance = 2,
    /// A real-time budget was exceeded.
    PerformanceViolation = 3,
    /// No check was supplied, or the batch was empty.
    InternalError = 4,
}

impl ValidationOutcome {
    /// Whether this outcome counts as a success in the metrics.
    #[inline]
    pub fn is_valid(self) -> bool {
        self == ValidationOutcome::Valid
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            ValidationOutcome::Valid => "validation passed",
            ValidationOutcome::InvalidInput => "input value is invalid",
            ValidationOutcome::OutOfTolerance => "value is outside the acceptable tolerance",
            ValidationOutcome::PerformanceViolation => "real-time performance budget exceeded",
            ValidationOutcome::InternalError => "internal validation error",
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Metrics
// ═══════════════════════════════════════════════════════════════════════════════

/// Counter block owned by one [`ValidationCore`].
///
/// Every field is an independent relaxed atomic, so concurrent writers never
/// lose updates but a reader may see fields from slightly different moments.
/// Not `Clone`; use [`ValidationMetrics::snapshot`] to copy values out.
#[derive(Debug, Default)]
pub struct ValidationMetrics {
    total_validations: AtomicU64,
    successful_validations: AtomicU64,
    failed_validations: AtomicU64,
    total_latency_ns: AtomicU64,
    max_latency_ns: AtomicU64,
}

impl ValidationMetrics {
    /// Create a zeroed counter block.
    pub const fn new() -> Self {
        Self {
            total_validations: AtomicU64::new(0),
            successful_validations: AtomicU64::new(0),
            failed_validations: AtomicU64::new(0),
            total_latency_ns: AtomicU64::new(0),
            max_latency_ns: AtomicU64::new(0),
        }
    }

    // ── Writers ──

    /// Fold one sample into the counters.
    #[inline]
    fn record(&self, outcome: ValidationOutcome, latency_ns: u64) {
        self.total_validations.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ns.fetch_add(latency_ns, Ordering::Relaxed);

        if outcome.is_valid() {
            self.successful_validations.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_validations.fetch_add(1, Ordering::Relaxed);
        }

        // Lock-free running max. Only attempt the exchange when this sample can win.
        let mut current = self.max_latency_ns.load(Ordering::Relaxed);
        while latency_ns > current {
            match self.max_latency_ns.compare_exchange_weak(
                current,
                latency_ns,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }
    }

    /// Zero every counter. Each field is reset independently.
    fn reset(&self) {
        self.total_validations.store(0, Ordering::Relaxed);
        self.successful_validations.store(0, Ordering::Relaxed);
        self.failed_validations.store(0, Ordering::Relaxed);
        self.total_latency_ns.store(0, Ordering::Relaxed);
        self.max_latency_ns.store(0, Ordering::Relaxed);
    }

    // ── Readers ──

    /// Total validation calls recorded.
    pub fn total_validations(&self) -> u64 {
        self.total_validations.load(Ordering::Relaxed)
    }

    /// Calls whose outcome was [`ValidationOutcome::Valid`].
    pub fn successful_validations(&self) -> u64 {
        self.successful_validations.load(Ordering::Relaxed)
    }

    /// Calls with any other outcome.
    pub fn failed_validations(&self) -> u64 {
        self.failed_validations.load(Ordering::Relaxed)
    }

    /// Cumulative measured latency in nanoseconds.
    pub fn total_latency_ns(&self) -> u64 {
        self.total_latency_ns.load(Ordering::Relaxed)
    }

    /// Largest single measured latency in nanoseconds.
    pub fn max_latency_ns(&self) -> u64 {
        self.max_latency_ns.load(Ordering::Relaxed)
    }

    /// Mean latency per call, or 0 before the first call.
    pub fn average_latency_ns(&self) -> u64 {
        let total = self.total_validations();
        if total == 0 {
            return 0;
        }
        self.total_latency_ns() / total
    }

    /// Success rate in percent (0.0–100.0), or 0.0 before the first call.
    pub fn success_rate(&self) -> f64 {
        let total = self.total_validations();
        if total == 0 {
            return 0.0;
        }
        self.successful_validations() as f64 / total as f64 * 100.0
    }

    /// Copy the current counter values out.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_validations: self.total_validations(),
            successful_validations: self.successful_validations(),
            failed_validations: self.failed_validations(),
            total_latency_ns: self.total_latency_ns(),
            max_latency_ns: self.max_latency_ns(),
        }
    }
}

/// Plain copy of [`ValidationMetrics`] taken at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_validations: u64,
    pub successful_validations: u64,
    pub failed_validations: u64,
    pub total_latency_ns: u64,
    pub max_latency_ns: u64,
}

impl MetricsSnapshot {
    /// Mean latency per call, or 0 when empty.
    pub fn average_latency_ns(&self) -> u64 {
        if self.total_validations == 0 {
            0
        } else {
            self.total_latency_ns / self.total_validations
        }
    }

    /// Format as a short multi-line summary for logs and reports.
    pub fn format_summary(&self) -> String {
        let rate = if self.total_validations > 0 {
            self.successful_validations as f64 / self.total_validations as f64 * 100.0
        } else {
            0.0
        };
        format!(
            "Validations: {} (ok {} | failed {} | {:.1}% ok)\n\
             Latency: avg {} ns | max {} ns",
            self.total_validations,
            self.successful_validations,
            self.failed_validations,
            rate,
            self.average_latency_ns(),
            self.max_latency_ns,
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Validation core
// ═══════════════════════════════════════════════════════════════════════════════

/// Times validation checks and aggregates their outcomes.
///
/// Safe to share across real-time threads (`&self` everywhere). Cloning
/// yields a core with zeroed metrics; counters are never duplicated.
#[derive(Debug, Default)]
pub struct ValidationCore {
    metrics: ValidationMetrics,
}

impl Clone for ValidationCore {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl ValidationCore {
    /// Default ceiling for [`meets_realtime_constraints`](Self::meets_realtime_constraints): 100 µs.
    pub const DEFAULT_MAX_LATENCY_NS: u64 = 100_000;

    /// Create a core with zeroed metrics.
    pub const fn new() -> Self {
        Self {
            metrics: ValidationMetrics::new(),
        }
    }

    /// Run `check` against `value`, timing the call and recording one sample.
    ///
    /// A missing check yields [`ValidationOutcome::InternalError`] and a
    /// zero-latency sample. Otherwise the check's outcome is returned as is.
    #[inline]
    pub fn validate(&self, value: u32, check: Option<CheckFn<'_>>) -> ValidationOutcome {
        let Some(check) = check else {
            self.metrics.record(ValidationOutcome::InternalError, 0);
            return ValidationOutcome::InternalError;
        };

        let start = Instant::now();
        let outcome = check(value);
        let latency_ns = elapsed_ns(start);

        self.metrics.record(outcome, latency_ns);
        outcome
    }

    /// Run `check` over up to [`MAX_BATCH_SIZE`] values, stopping at the first failure.
    ///
    /// The whole batch is timed once and recorded as a single sample.
    /// Values past the first non-valid outcome are never evaluated, and
    /// values past `MAX_BATCH_SIZE` are ignored.
    pub fn batch_validate(&self, values: &[u32], check: Option<CheckFn<'_>>) -> ValidationOutcome {
        let Some(check) = check.filter(|_| !values.is_empty()) else {
            self.metrics.record(ValidationOutcome::InternalError, 0);
            return ValidationOutcome::InternalError;
        };

        if values.len() > MAX_BATCH_SIZE {
            tracing::trace!(
                requested = values.len(),
                limit = MAX_BATCH_SIZE,
                "batch clamped"
            );
        }
        let batch = &values[..values.len().min(MAX_BATCH_SIZE)];

        let start = Instant::now();
        let outcome = batch
            .iter()
            .map(|&value| check(value))
            .find(|outcome| !outcome.is_valid())
            .unwrap_or(ValidationOutcome::Valid);
        let latency_ns = elapsed_ns(start);

        self.metrics.record(outcome, latency_ns);
        outcome
    }

    /// Read-only view of the live counters.
    #[inline]
    pub fn metrics(&self) -> &ValidationMetrics {
        &self.metrics
    }

    /// Zero all counters.
    ///
    /// Fields are reset one at a time, so a concurrent reader may briefly see
    /// a mix of old and new values.
    pub fn reset_metrics(&self) {
        self.metrics.reset();
        tracing::debug!("validation metrics reset");
    }

    /// Whether the worst latency recorded so far is within `max_latency_ns`.
    ///
    /// A point-in-time check against history, not a guarantee about future calls.
    #[inline]
    pub fn meets_realtime_constraints(&self, max_latency_ns: u64) -> bool {
        self.metrics.max_latency_ns() <= max_latency_ns
    }

    /// [`meets_realtime_constraints`](Self::meets_realtime_constraints) with the 100 µs default.
    pub fn meets_default_realtime_constraints(&self) -> bool {
        self.meets_realtime_constraints(Self::DEFAULT_MAX_LATENCY_NS)
    }

    /// Size of one core in bytes.
    pub const fn memory_footprint() -> usize {
        std::mem::size_of::<Self>()
    }
}

#[inline]
fn elapsed_ns(start: Instant) -> u64 {
    // Saturate rather than truncate; u64 nanoseconds covers ~584 years.
    u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX)
}
