//! Rate category classification (AES5-2018 Section 5.3).
//!
//! Six disjoint closed bands, each a named multiple of the 48 kHz base rate:
//!
//! | Category  | Min (Hz) | Max (Hz) | Nominal |
//! |-----------|----------|----------|---------|
//! | Quarter   | 7 750    | 13 500   | ×0.25   |
//! | Half      | 15 500   | 27 000   | ×0.5    |
//! | Basic     | 31 000   | 54 000   | ×1      |
//! | Double    | 62 000   | 108 000  | ×2      |
//! | Quadruple | 124 000  | 216 000  | ×4      |
//! | Octuple   | 248 000  | 432 000  | ×8      |
//!
//! Anything else is [`RateCategory::Unknown`].
//!
//! Whole-kHz inputs up to 432 kHz classify through a compile-time table;
//! everything else goes through the interval check the table was built from.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::clause::Aes5Clause;
use crate::config::RateCategoryConfig;
use crate::error::BuildError;
use crate::validation::{ValidationCore, ValidationMetrics, ValidationOutcome};

/// Base rate all multipliers are relative to.
pub const BASE_FREQUENCY_HZ: u32 = 48_000;

pub const QUARTER_RATE_MIN_HZ: u32 = 7_750;
pub const QUARTER_RATE_MAX_HZ: u32 = 13_500;
pub const HALF_RATE_MIN_HZ: u32 = 15_500;
pub const HALF_RATE_MAX_HZ: u32 = 27_000;
pub const BASIC_RATE_MIN_HZ: u32 = 31_000;
pub const BASIC_RATE_MAX_HZ: u32 = 54_000;
pub const DOUBLE_RATE_MIN_HZ: u32 = 62_000;
pub const DOUBLE_RATE_MAX_HZ: u32 = 108_000;
pub const QUADRUPLE_RATE_MIN_HZ: u32 = 124_000;
pub const QUADRUPLE_RATE_MAX_HZ: u32 = 216_000;
pub const OCTUPLE_RATE_MIN_HZ: u32 = 248_000;
pub const OCTUPLE_RATE_MAX_HZ: u32 = 432_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum RateCategory {
    #[default]
    Unknown = 0,
    Quarter = 1,
    Half = 2,
    Basic = 3,
    Double = 4,
    Quadruple = 5,
    Octuple = 6,
}

/// Every defined category, lowest band first.
pub const DEFINED_CATEGORIES: [RateCategory; 6] = [
    RateCategory::Quarter,
    RateCategory::Half,
    RateCategory::Basic,
    RateCategory::Double,
    RateCategory::Quadruple,
    RateCategory::Octuple,
];

impl RateCategory {
    /// "Basic Rate", "Double Rate", ...
    pub fn name(self) -> &'static str {
        match self {
            RateCategory::Quarter => "Quarter Rate",
            RateCategory::Half => "Half Rate",
            RateCategory::Basic => "Basic Rate",
            RateCategory::Double => "Double Rate",
            RateCategory::Quadruple => "Quadruple Rate",
            RateCategory::Octuple => "Octuple Rate",
            RateCategory::Unknown => "Unknown",
        }
    }

    /// "Basic", "Double", ...
    pub fn short_name(self) -> &'static str {
        match self {
            RateCategory::Quarter => "Quarter",
            RateCategory::Half => "Half",
            RateCategory::Basic => "Basic",
            RateCategory::Double => "Double",
            RateCategory::Quadruple => "Quadruple",
            RateCategory::Octuple => "Octuple",
            RateCategory::Unknown => "Unknown",
        }
    }

    /// Section 5.3 for every defined category.
    pub fn clause(self) -> Aes5Clause {
        match self {
            RateCategory::Unknown => Aes5Clause::Unknown,
            _ => Aes5Clause::Section5_3,
        }
    }

    /// Closed `(min, max)` band in Hz, or `None` for `Unknown`.
    pub const fn frequency_range(self) -> Option<(u32, u32)> {
        match self {
            RateCategory::Quarter => Some((QUARTER_RATE_MIN_HZ, QUARTER_RATE_MAX_HZ)),
            RateCategory::Half => Some((HALF_RATE_MIN_HZ, HALF_RATE_MAX_HZ)),
            RateCategory::Basic => Some((BASIC_RATE_MIN_HZ, BASIC_RATE_MAX_HZ)),
            RateCategory::Double => Some((DOUBLE_RATE_MIN_HZ, DOUBLE_RATE_MAX_HZ)),
            RateCategory::Quadruple => Some((QUADRUPLE_RATE_MIN_HZ, QUADRUPLE_RATE_MAX_HZ)),
            RateCategory::Octuple => Some((OCTUPLE_RATE_MIN_HZ, OCTUPLE_RATE_MAX_HZ)),
            RateCategory::Unknown => None,
        }
    }

    /// Nominal multiple of the base rate (0.25 … 8.0; 0.0 for `Unknown`).
    pub fn nominal_multiplier(self) -> f64 {
        match self {
            RateCategory::Quarter => 0.25,
            RateCategory::Half => 0.5,
            RateCategory::Basic => 1.0,
            RateCategory::Double => 2.0,
            RateCategory::Quadruple => 4.0,
            RateCategory::Octuple => 8.0,
            RateCategory::Unknown => 0.0,
        }
    }

    const fn from_repr(value: u8) -> Self {
        match value {
            1 => RateCategory::Quarter,
            2 => RateCategory::Half,
            3 => RateCategory::Basic,
            4 => RateCategory::Double,
            5 => RateCategory::Quadruple,
            6 => RateCategory::Octuple,
            _ => RateCategory::Unknown,
        }
    }
}

impl fmt::Display for RateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Lookup
// ═══════════════════════════════════════════════════════════════════════════════

/// Interval check against the six closed bands.
pub const fn classify_by_range(frequency_hz: u32) -> RateCategory {
    let mut i = 0;
    while i < DEFINED_CATEGORIES.len() {
        let category = DEFINED_CATEGORIES[i];
        if let Some((min, max)) = category.frequency_range() {
            if frequency_hz >= min && frequency_hz <= max {
                return category;
            }
        }
        i += 1;
    }
    RateCategory::Unknown
}

const KHZ_TABLE_LEN: usize = (OCTUPLE_RATE_MAX_HZ / 1000) as usize + 1;

const fn build_khz_table() -> [RateCategory; KHZ_TABLE_LEN] {
    let mut table = [RateCategory::Unknown; KHZ_TABLE_LEN];
    let mut khz = 0;
    while khz < KHZ_TABLE_LEN {
        table[khz] = classify_by_range(khz as u32 * 1000);
        khz += 1;
    }
    table
}

/// Category of every whole-kHz frequency from 0 to 432 kHz, indexed by kHz.
static KHZ_TABLE: [RateCategory; KHZ_TABLE_LEN] = build_khz_table();

const fn bands_are_disjoint() -> bool {
    let mut i = 1;
    while i < DEFINED_CATEGORIES.len() {
        match (
            DEFINED_CATEGORIES[i - 1].frequency_range(),
            DEFINED_CATEGORIES[i].frequency_range(),
        ) {
            (Some((lo_a, hi_a)), Some((lo_b, hi_b))) => {
                if lo_a > hi_a || hi_a >= lo_b || lo_b > hi_b {
                    return false;
                }
            }
            _ => return false,
        }
        i += 1;
    }
    true
}

const _: () = assert!(bands_are_disjoint());

/// Table lookup for whole-kHz inputs, interval check for the rest.
#[inline]
pub fn classify_frequency(frequency_hz: u32) -> RateCategory {
    if frequency_hz % 1000 == 0 {
        if let Some(&category) = KHZ_TABLE.get((frequency_hz / 1000) as usize) {
            return category;
        }
    }
    classify_by_range(frequency_hz)
}

/// `frequency_hz / 48000.0` for a defined category, 0.0 for `Unknown`.
#[inline]
fn multiplier_for(frequency_hz: u32, category: RateCategory) -> f64 {
    match category {
        RateCategory::Unknown => 0.0,
        _ => f64::from(frequency_hz) / f64::from(BASE_FREQUENCY_HZ),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Result
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateCategoryResult {
    pub frequency_hz: u32,
    pub category: RateCategory,
    /// `frequency_hz / 48000.0`, or 0.0 for `Unknown`.
    pub multiplier: f64,
    pub valid: bool,
}

impl RateCategoryResult {
    fn new(frequency_hz: u32, category: RateCategory) -> Self {
        Self {
            frequency_hz,
            category,
            multiplier: multiplier_for(frequency_hz, category),
            valid: category != RateCategory::Unknown,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn category_name(&self) -> &'static str {
        self.category.name()
    }

    pub fn clause(&self) -> Aes5Clause {
        self.category.clause()
    }
}

impl fmt::Display for RateCategoryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz: {} (x{:.3})",
            self.frequency_hz, self.category, self.multiplier
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Cache
// ═══════════════════════════════════════════════════════════════════════════════

/// Most recent classification, packed as `frequency << 8 | category`.
///
/// A single atomic word, so readers see either the old or the new entry and
/// never a mix. Starts out as `(0 Hz, Unknown)`.
#[derive(Debug, Default)]
struct LastClassification(AtomicU64);

impl LastClassification {
    const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    fn get(&self, frequency_hz: u32) -> Option<RateCategory> {
        let packed = self.0.load(Ordering::Relaxed);
        if (packed >> 8) as u32 == frequency_hz {
            Some(RateCategory::from_repr(packed as u8))
        } else {
            None
        }
    }

    #[inline]
    fn set(&self, frequency_hz: u32, category: RateCategory) {
        let packed = (u64::from(frequency_hz) << 8) | u64::from(category as u8);
        self.0.store(packed, Ordering::Relaxed);
    }

    fn clear(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Manager
// ═══════════════════════════════════════════════════════════════════════════════

/// Classifies frequencies into rate categories and tracks classification metrics.
///
/// Repeating the previous frequency is answered from a one-entry cache and
/// does not record a metrics sample. Every other call records exactly one.
///
/// ```rust
/// use aes5_rates::rate_category::{RateCategory, RateCategoryManager};
///
/// let manager = RateCategoryManager::with_defaults();
/// let result = manager.classify_rate_category(96_000);
/// assert_eq!(result.category, RateCategory::Double);
/// assert_eq!(result.multiplier, 2.0);
/// ```
#[derive(Debug)]
pub struct RateCategoryManager {
    core: ValidationCore,
    config: RateCategoryConfig,
    last: LastClassification,
}

impl RateCategoryManager {
    /// Build around an injected validation core. Fails if it is absent.
    pub fn create(core: Option<ValidationCore>) -> Result<Self, BuildError> {
        Self::create_with_config(core, RateCategoryConfig::default())
    }

    pub fn create_with_config(
        core: Option<ValidationCore>,
        config: RateCategoryConfig,
    ) -> Result<Self, BuildError> {
        let core = core.ok_or(BuildError::MissingValidationCore)?;
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "rejecting rate category configuration");
            return Err(e.into());
        }
        Ok(Self::assemble(core, config))
    }

    pub fn with_defaults() -> Self {
        Self::assemble(ValidationCore::new(), RateCategoryConfig::default())
    }

    fn assemble(core: ValidationCore, config: RateCategoryConfig) -> Self {
        tracing::debug!(
            max_classification_latency_ns = config.max_classification_latency_ns,
            "rate category manager ready"
        );
        Self {
            core,
            config,
            last: LastClassification::new(),
        }
    }

    /// Classify `frequency_hz` and compute its multiplier.
    pub fn classify_rate_category(&self, frequency_hz: u32) -> RateCategoryResult {
        if let Some(category) = self.last.get(frequency_hz) {
            return RateCategoryResult::new(frequency_hz, category);
        }

        let category = Cell::new(RateCategory::Unknown);
        let check = |f: u32| {
            let c = classify_frequency(f);
            category.set(c);
            if c == RateCategory::Unknown {
                ValidationOutcome::InvalidInput
            } else {
                ValidationOutcome::Valid
            }
        };
        self.core.validate(frequency_hz, Some(&check));

        let category = category.get();
        self.last.set(frequency_hz, category);
        RateCategoryResult::new(frequency_hz, category)
    }

    pub fn get_rate_category(&self, frequency_hz: u32) -> RateCategory {
        self.classify_rate_category(frequency_hz).category
    }

    pub fn calculate_rate_multiplier(&self, frequency_hz: u32) -> f64 {
        self.classify_rate_category(frequency_hz).multiplier
    }

    pub fn is_valid_rate_category(&self, frequency_hz: u32) -> bool {
        self.classify_rate_category(frequency_hz).valid
    }

    pub fn metrics(&self) -> &ValidationMetrics {
        self.core.metrics()
    }

    /// Zero the counters and forget the cached classification.
    pub fn reset_metrics(&self) {
        self.core.reset_metrics();
        self.last.clear();
    }

    pub fn meets_realtime_constraints(&self, max_latency_ns: u64) -> bool {
        self.core.meets_realtime_constraints(max_latency_ns)
    }

    /// Check against the configured `max_classification_latency_ns` (10 µs by default).
    pub fn meets_default_realtime_constraints(&self) -> bool {
        self.meets_realtime_constraints(self.config.max_classification_latency_ns)
    }

    pub fn config(&self) -> &RateCategoryConfig {
        &self.config
    }

    /// Bytes used by this manager. The core is held inline.
    pub fn memory_footprint(&self) -> usize {
        std::mem::size_of::<Self>()
    }
}
