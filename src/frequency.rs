//! Standard sampling frequency validation.
//!
//! [`FrequencyValidator`] resolves an arbitrary input frequency to the
//! closest AES5-2018 standard frequency, measures the deviation in parts per
//! million, and passes or fails it against a tolerance.
//!
//! # Closest-standard resolution
//!
//! Resolution runs in two passes:
//!
//! 1. **Exact match** against the ten [`STANDARD_FREQUENCIES`].
//! 2. **Banded fallback** through [`FREQUENCY_BANDS`]: eleven contiguous
//!    half-open bands starting at 0 Hz, each mapped to one standard. The
//!    last band runs to `u32::MAX`, so every input lands in exactly one band.
//!
//! ```text
//!       0 ┬──────────── 32 000
//!  38 051 ┼──────────── 44 100
//!  46 000 ┼──────────── 47 952
//!  47 900 ┼──────────── 47 952   ┐
//!  47 977 ┼──────────── 48 000   ┘ 48 kHz family, biased to primary
//!  48 151 ┼──────────── 48 048
//!  68 124 ┼──────────── 88 200
//!  92 100 ┼──────────── 96 000
//! 136 200 ┼─────────── 176 400
//! 184 200 ┼─────────── 192 000
//! 288 000 ┴─────────── 384 000 (to u32::MAX)
//! ```
//!
//! Inside 47 900–48 150 Hz the three 48 kHz variants sit within 100 Hz of
//! each other. Non-exact inputs there resolve by fixed cut points rather than
//! nearest distance: up to 47 976 Hz goes to the pull-down rate, everything
//! else below 48 151 Hz to the primary rate.
//!
//! # Tolerance
//!
//! `ppm = |measured − reference| × 1 000 000 / reference`. Pass/fail is
//! decided in 64-bit integers (`|Δ| × 10⁶ ≤ tol × reference`); the `f64`
//! figure in the result is for reporting only.

use std::cell::Cell;
use std::fmt;

use crate::clause::{clause_for_frequency, Aes5Clause, ClauseCompliance, ClauseTable};
use crate::config::FrequencyValidatorConfig;
use crate::error::BuildError;
use crate::validation::{ValidationCore, ValidationMetrics, ValidationOutcome};

// ═══════════════════════════════════════════════════════════════════════════════
// Standard frequencies
// ═══════════════════════════════════════════════════════════════════════════════

/// Primary sampling frequency (Section 5.1).
pub const PRIMARY_FREQUENCY_HZ: u32 = 48_000;
/// Consumer sampling frequency (Section 5.2).
pub const CONSUMER_FREQUENCY_HZ: u32 = 44_100;
/// High-bandwidth sampling frequency (Section 5.2).
pub const HIGH_BANDWIDTH_FREQUENCY_HZ: u32 = 96_000;
/// Legacy broadcast sampling frequency (Section 5.4).
pub const LEGACY_FREQUENCY_HZ: u32 = 32_000;
/// 48 kHz × 1001/1000 (Annex A).
pub const PULLUP_48K_HZ: u32 = 48_048;
/// 48 kHz × 1000/1001, rounded (Annex A).
pub const PULLDOWN_48K_HZ: u32 = 47_952;

/// Tolerance applied when the caller does not supply one.
pub const DEFAULT_TOLERANCE_PPM: u32 = 100;
/// Tight tolerance for precision clocking.
pub const TIGHT_TOLERANCE_PPM: u32 = 50;

/// Every standard frequency, ascending.
pub const STANDARD_FREQUENCIES: [u32; 10] = [
    LEGACY_FREQUENCY_HZ,
    CONSUMER_FREQUENCY_HZ,
    PULLDOWN_48K_HZ,
    PRIMARY_FREQUENCY_HZ,
    PULLUP_48K_HZ,
    88_200,
    HIGH_BANDWIDTH_FREQUENCY_HZ,
    176_400,
    192_000,
    384_000,
];

/// One band of the fallback table. Covers `[start_hz, next band's start_hz)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyBand {
    pub start_hz: u32,
    pub standard_hz: u32,
}

const fn band(start_hz: u32, standard_hz: u32) -> FrequencyBand {
    FrequencyBand { start_hz, standard_hz }
}

/// Banded fallback table. Contiguous, non-overlapping, and total over `u32`.
pub const FREQUENCY_BANDS: [FrequencyBand; 11] = [
    band(0, LEGACY_FREQUENCY_HZ),
    band(38_051, CONSUMER_FREQUENCY_HZ),
    band(46_000, PULLDOWN_48K_HZ),
    band(47_900, PULLDOWN_48K_HZ),
    band(47_977, PRIMARY_FREQUENCY_HZ),
    band(48_151, PULLUP_48K_HZ),
    band(68_124, 88_200),
    band(92_100, HIGH_BANDWIDTH_FREQUENCY_HZ),
    band(136_200, 176_400),
    band(184_200, 192_000),
    band(288_000, 384_000),
];

const fn bands_are_total(bands: &[FrequencyBand]) -> bool {
    if bands.is_empty() || bands[0].start_hz != 0 {
        return false;
    }
    let mut i = 1;
    while i < bands.len() {
        if bands[i].start_hz <= bands[i - 1].start_hz {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(bands_are_total(&FREQUENCY_BANDS));

impl FrequencyBand {
    /// Last frequency covered by the band at `index` in [`FREQUENCY_BANDS`].
    pub const fn end_hz(index: usize) -> u32 {
        if index + 1 < FREQUENCY_BANDS.len() {
            FREQUENCY_BANDS[index + 1].start_hz - 1
        } else {
            u32::MAX
        }
    }
}

/// Resolve `frequency_hz` to the closest standard frequency.
#[inline]
pub fn closest_standard_frequency(frequency_hz: u32) -> u32 {
    if STANDARD_FREQUENCIES.contains(&frequency_hz) {
        return frequency_hz;
    }
    // Band 0 starts at 0, so at least one band always qualifies.
    let index = FREQUENCY_BANDS
        .partition_point(|b| b.start_hz <= frequency_hz)
        .saturating_sub(1);
    FREQUENCY_BANDS[index].standard_hz
}

/// Deviation between `measured` and `reference` in ppm.
///
/// Exactly 0.0 for equal values; `f64::MAX` when `reference` is 0.
#[inline]
pub fn tolerance_ppm(measured: u32, reference: u32) -> f64 {
    if reference == 0 {
        return f64::MAX;
    }
    if measured == reference {
        return 0.0;
    }
    scaled_deviation(measured, reference) as f64 / reference as f64
}

/// `|measured − reference| × 10⁶`, exact in 64 bits.
#[inline]
fn scaled_deviation(measured: u32, reference: u32) -> u64 {
    u64::from(measured.abs_diff(reference)) * 1_000_000
}

/// Integer form of `tolerance_ppm(measured, reference) <= tolerance_ppm`.
#[inline]
fn within_tolerance(measured: u32, reference: u32, tolerance_ppm: u32) -> bool {
    reference != 0
        && scaled_deviation(measured, reference) <= u64::from(tolerance_ppm) * u64::from(reference)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tolerance table
// ═══════════════════════════════════════════════════════════════════════════════

/// Acceptance window around one standard frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyTolerance {
    pub nominal_hz: u32,
    pub tolerance_ppm: u32,
    /// Lowest integer frequency within tolerance.
    pub min_hz: u32,
    /// Highest integer frequency within tolerance.
    pub max_hz: u32,
}

impl FrequencyTolerance {
    /// Window of ±`tolerance_ppm` around `nominal_hz`.
    pub const fn new(nominal_hz: u32, tolerance_ppm: u32) -> Self {
        let max_deviation = (nominal_hz as u64 * tolerance_ppm as u64 / 1_000_000) as u32;
        Self {
            nominal_hz,
            tolerance_ppm,
            min_hz: nominal_hz.saturating_sub(max_deviation),
            max_hz: nominal_hz.saturating_add(max_deviation),
        }
    }

    #[inline]
    pub const fn contains(&self, frequency_hz: u32) -> bool {
        frequency_hz >= self.min_hz && frequency_hz <= self.max_hz
    }
}

const fn tolerance_table(tolerance_ppm: u32) -> [FrequencyTolerance; STANDARD_FREQUENCIES.len()] {
    let mut table = [FrequencyTolerance::new(0, 0); STANDARD_FREQUENCIES.len()];
    let mut i = 0;
    while i < STANDARD_FREQUENCIES.len() {
        table[i] = FrequencyTolerance::new(STANDARD_FREQUENCIES[i], tolerance_ppm);
        i += 1;
    }
    table
}

/// Acceptance windows at [`DEFAULT_TOLERANCE_PPM`].
pub const DEFAULT_TOLERANCES: [FrequencyTolerance; STANDARD_FREQUENCIES.len()] =
    tolerance_table(DEFAULT_TOLERANCE_PPM);

// ═══════════════════════════════════════════════════════════════════════════════
// Result
// ═══════════════════════════════════════════════════════════════════════════════

/// Outcome of one [`FrequencyValidator::validate_frequency`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyValidationResult {
    pub status: ValidationOutcome,
    /// The input frequency.
    pub detected_frequency: u32,
    pub closest_standard_frequency: u32,
    /// Deviation from the closest standard, in ppm.
    pub tolerance_ppm: f64,
    pub applicable_clause: Aes5Clause,
}

impl FrequencyValidationResult {
    fn invalid_input(frequency_hz: u32) -> Self {
        Self {
            status: ValidationOutcome::InvalidInput,
            detected_frequency: frequency_hz,
            closest_standard_frequency: 0,
            tolerance_ppm: 0.0,
            applicable_clause: Aes5Clause::Unknown,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    pub fn description(&self) -> &'static str {
        match self.status {
            ValidationOutcome::Valid => "frequency is valid according to AES5-2018",
            ValidationOutcome::InvalidInput => "invalid input frequency (must be > 0)",
            ValidationOutcome::OutOfTolerance => "frequency is outside acceptable tolerance",
            ValidationOutcome::PerformanceViolation => "validation exceeded its latency budget",
            ValidationOutcome::InternalError => "internal validation error",
        }
    }
}

impl fmt::Display for FrequencyValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz -> {} Hz ({:.1} ppm, {}): {}",
            self.detected_frequency,
            self.closest_standard_frequency,
            self.tolerance_ppm,
            self.applicable_clause,
            self.description()
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Validator
// ═══════════════════════════════════════════════════════════════════════════════

/// Validates sampling frequencies against the AES5-2018 standard set.
///
/// All hot-path methods take `&self`, never allocate, and are safe to call
/// from several threads at once.
///
/// ```rust
/// use aes5_rates::frequency::FrequencyValidator;
/// use aes5_rates::validation::ValidationOutcome;
///
/// let validator = FrequencyValidator::with_defaults();
///
/// let ok = validator.validate_frequency(48_000, 100);
/// assert!(ok.is_valid());
/// assert_eq!(ok.closest_standard_frequency, 48_000);
///
/// let off = validator.validate_frequency(48_100, 25);
/// assert_eq!(off.status, ValidationOutcome::OutOfTolerance);
/// ```
pub struct FrequencyValidator {
    compliance: Box<dyn ClauseCompliance>,
    core: ValidationCore,
    config: FrequencyValidatorConfig,
    tolerances: [FrequencyTolerance; STANDARD_FREQUENCIES.len()],
}

impl fmt::Debug for FrequencyValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrequencyValidator")
            .field("core", &self.core)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FrequencyValidator {
    /// Build from injected collaborators with the default configuration.
    ///
    /// Fails if either collaborator is absent.
    pub fn create(
        compliance: Option<Box<dyn ClauseCompliance>>,
        core: Option<ValidationCore>,
    ) -> Result<Self, BuildError> {
        Self::create_with_config(compliance, core, FrequencyValidatorConfig::default())
    }

    /// Build from injected collaborators and an explicit configuration.
    pub fn create_with_config(
        compliance: Option<Box<dyn ClauseCompliance>>,
        core: Option<ValidationCore>,
        config: FrequencyValidatorConfig,
    ) -> Result<Self, BuildError> {
        let compliance = compliance.ok_or(BuildError::MissingCompliance)?;
        let core = core.ok_or(BuildError::MissingValidationCore)?;
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "rejecting frequency validator configuration");
            return Err(e.into());
        }
        Ok(Self::assemble(compliance, core, config))
    }

    /// Validator with the standard clause table, a fresh core, and default settings.
    pub fn with_defaults() -> Self {
        Self::assemble(
            Box::new(ClauseTable),
            ValidationCore::new(),
            FrequencyValidatorConfig::default(),
        )
    }

    fn assemble(
        compliance: Box<dyn ClauseCompliance>,
        core: ValidationCore,
        config: FrequencyValidatorConfig,
    ) -> Self {
        tracing::debug!(
            default_tolerance_ppm = config.default_tolerance_ppm,
            max_validation_latency_ns = config.max_validation_latency_ns,
            "frequency validator ready"
        );
        Self {
            compliance,
            core,
            config,
            tolerances: tolerance_table(config.default_tolerance_ppm),
        }
    }

    // ── Hot path ──

    /// Validate `frequency_hz` against the closest standard within `tolerance_ppm`.
    ///
    /// A zero frequency returns `InvalidInput` immediately without touching
    /// the metrics. Any other input records exactly one metrics sample that
    /// times the resolution and tolerance computation.
    pub fn validate_frequency(&self, frequency_hz: u32, tolerance_ppm: u32) -> FrequencyValidationResult {
        if frequency_hz == 0 {
            return FrequencyValidationResult::invalid_input(0);
        }

        let result = Cell::new(FrequencyValidationResult::invalid_input(frequency_hz));
        let check = |f: u32| {
            let evaluated = evaluate(f, tolerance_ppm);
            result.set(evaluated);
            evaluated.status
        };
        self.core.validate(frequency_hz, Some(&check));
        result.get()
    }

    /// [`validate_frequency`](Self::validate_frequency) with the configured default tolerance.
    pub fn validate_frequency_default(&self, frequency_hz: u32) -> FrequencyValidationResult {
        self.validate_frequency(frequency_hz, self.config.default_tolerance_ppm)
    }

    /// Closest standard frequency to `frequency_hz`. See the module docs.
    #[inline]
    pub fn find_closest_standard_frequency(&self, frequency_hz: u32) -> u32 {
        closest_standard_frequency(frequency_hz)
    }

    /// Deviation of `measured` from `reference` in ppm.
    #[inline]
    pub fn calculate_tolerance_ppm(&self, measured: u32, reference: u32) -> f64 {
        tolerance_ppm(measured, reference)
    }

    // ── Observability ──

    pub fn metrics(&self) -> &ValidationMetrics {
        self.core.metrics()
    }

    pub fn reset_metrics(&self) {
        self.core.reset_metrics();
    }

    pub fn meets_realtime_constraints(&self, max_latency_ns: u64) -> bool {
        self.core.meets_realtime_constraints(max_latency_ns)
    }

    /// Check against the configured `max_validation_latency_ns` (50 µs by default).
    pub fn meets_default_realtime_constraints(&self) -> bool {
        self.meets_realtime_constraints(self.config.max_validation_latency_ns)
    }

    /// Bytes used by this validator, including its inline core.
    ///
    /// The clause collaborator lives behind a pointer and is not counted.
    pub fn memory_footprint(&self) -> usize {
        std::mem::size_of::<Self>()
    }

    // ── Accessors ──

    pub fn config(&self) -> &FrequencyValidatorConfig {
        &self.config
    }

    /// The clause-compliance collaborator supplied at construction.
    pub fn compliance(&self) -> &dyn ClauseCompliance {
        self.compliance.as_ref()
    }

    /// Acceptance windows for every standard at the configured default tolerance.
    pub fn tolerance_table(&self) -> &[FrequencyTolerance] {
        &self.tolerances
    }

    /// Acceptance window for one standard frequency.
    pub fn tolerance_for(&self, standard_hz: u32) -> Option<&FrequencyTolerance> {
        self.tolerances.iter().find(|t| t.nominal_hz == standard_hz)
    }
}

/// Resolution plus tolerance decision for a nonzero frequency.
#[inline]
fn evaluate(frequency_hz: u32, tolerance_ppm_limit: u32) -> FrequencyValidationResult {
    let closest = closest_standard_frequency(frequency_hz);
    let status = if within_tolerance(frequency_hz, closest, tolerance_ppm_limit) {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::OutOfTolerance
    };
    FrequencyValidationResult {
        status,
        detected_frequency: frequency_hz,
        closest_standard_frequency: closest,
        tolerance_ppm: tolerance_ppm(frequency_hz, closest),
        applicable_clause: clause_for_frequency(closest),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standards_resolve_to_themselves() {
        for &f in &STANDARD_FREQUENCIES {
            assert_eq!(closest_standard_frequency(f), f, "{f} Hz");
        }
    }

    #[test]
    fn every_band_maps_to_a_standard() {
        for b in &FREQUENCY_BANDS {
            assert!(STANDARD_FREQUENCIES.contains(&b.standard_hz));
        }
    }

    #[test]
    fn bands_are_contiguous_and_cover_u32() {
        assert_eq!(FREQUENCY_BANDS[0].start_hz, 0);
        for i in 0..FREQUENCY_BANDS.len() - 1 {
            assert_eq!(FrequencyBand::end_hz(i) + 1, FREQUENCY_BANDS[i + 1].start_hz);
        }
        assert_eq!(FrequencyBand::end_hz(FREQUENCY_BANDS.len() - 1), u32::MAX);
    }

    #[test]
    fn band_edges_resolve_to_their_band() {
        for (i, b) in FREQUENCY_BANDS.iter().enumerate() {
            for f in [b.start_hz, FrequencyBand::end_hz(i)] {
                if STANDARD_FREQUENCIES.contains(&f) {
                    continue;
                }
                assert_eq!(closest_standard_frequency(f), b.standard_hz, "{f} Hz in band {i}");
            }
        }
    }

    #[test]
    fn closest_standard_reference_points() {
        let cases = [
            (1, 32_000),
            (35_000, 32_000),
            (38_050, 32_000),
            (38_051, 44_100),
            (40_000, 44_100),
            (46_000, 47_952),
            (48_500, 48_048),
            (70_000, 88_200),
            (100_000, 96_000),
            (1_000_000, 384_000),
            (u32::MAX, 384_000),
        ];
        for (input, expected) in cases {
            assert_eq!(closest_standard_frequency(input), expected, "{input} Hz");
        }
    }

    #[test]
    fn forty_eight_k_neighborhood_cut_points() {
        assert_eq!(closest_standard_frequency(47_899), 47_952);
        assert_eq!(closest_standard_frequency(47_900), 47_952);
        assert_eq!(closest_standard_frequency(47_976), 47_952);
        assert_eq!(closest_standard_frequency(47_977), 48_000);
        assert_eq!(closest_standard_frequency(48_024), 48_000);
        assert_eq!(closest_standard_frequency(48_047), 48_000);
        assert_eq!(closest_standard_frequency(48_048), 48_048);
        assert_eq!(closest_standard_frequency(48_049), 48_000);
        assert_eq!(closest_standard_frequency(48_150), 48_000);
        assert_eq!(closest_standard_frequency(48_151), 48_048);
    }

    #[test]
    fn ppm_reference_values() {
        let cases = [
            (48_048, 48_000, 1000.0),
            (48_024, 48_000, 500.0),
            (47_976, 48_000, 500.0),
            (44_144, 44_100, 997.7),
            (32_032, 32_000, 1000.0),
        ];
        for (measured, reference, expected) in cases {
            let ppm = tolerance_ppm(measured, reference);
            assert!(
                (ppm - expected).abs() < 0.1,
                "{measured} vs {reference}: {ppm} ppm, expected {expected}"
            );
        }
    }

    #[test]
    fn ppm_edge_cases() {
        assert_eq!(tolerance_ppm(48_000, 48_000), 0.0);
        assert_eq!(tolerance_ppm(1, 1), 0.0);
        assert_eq!(tolerance_ppm(48_000, 0), f64::MAX);
        // No overflow at the top of the domain.
        let ppm = tolerance_ppm(u32::MAX, 1);
        assert!((ppm - (u32::MAX as f64 - 1.0) * 1e6).abs() < 1e6);
    }

    #[test]
    fn integer_decision_matches_float_report() {
        for f in 47_990..=48_010 {
            let ppm = tolerance_ppm(f, 48_000);
            assert_eq!(within_tolerance(f, 48_000, 100), ppm <= 100.0, "{f} Hz");
        }
        assert!(!within_tolerance(1, 0, u32::MAX));
    }

    #[test]
    fn tolerance_window_matches_decision() {
        let validator = FrequencyValidator::with_defaults();
        for t in validator.tolerance_table() {
            // The 48 048 window overlaps the primary-biased band; skip it.
            if t.nominal_hz == PULLUP_48K_HZ {
                continue;
            }
            for f in t.min_hz.saturating_sub(3)..=t.max_hz + 3 {
                let result = validator.validate_frequency(f, DEFAULT_TOLERANCE_PPM);
                assert_eq!(t.contains(f), result.is_valid(), "{f} Hz around {}", t.nominal_hz);
            }
        }
    }

    #[test]
    fn tolerance_table_bounds() {
        let t = FrequencyTolerance::new(48_000, 100);
        assert_eq!((t.min_hz, t.max_hz), (47_996, 48_004));
        assert!(t.contains(48_000));
        assert!(!t.contains(48_005));

        let validator = FrequencyValidator::with_defaults();
        assert_eq!(validator.tolerance_table(), &DEFAULT_TOLERANCES[..]);
        assert_eq!(validator.tolerance_for(96_000).map(|t| t.max_hz), Some(96_009));
        assert!(validator.tolerance_for(50_000).is_none());
    }

    #[test]
    fn evaluate_assigns_clause_of_closest_standard() {
        assert_eq!(evaluate(48_000, 100).applicable_clause, Aes5Clause::Section5_1);
        assert_eq!(evaluate(44_100, 100).applicable_clause, Aes5Clause::Section5_2);
        assert_eq!(evaluate(88_210, 1000).applicable_clause, Aes5Clause::Section5_3);
        assert_eq!(evaluate(32_000, 100).applicable_clause, Aes5Clause::Section5_4);
        assert_eq!(evaluate(47_952, 100).applicable_clause, Aes5Clause::AnnexA);
    }

    #[test]
    fn zero_frequency_skips_metrics() {
        let validator = FrequencyValidator::with_defaults();
        let result = validator.validate_frequency(0, 100);
        assert_eq!(result.status, ValidationOutcome::InvalidInput);
        assert_eq!(result.closest_standard_frequency, 0);
        assert_eq!(result.tolerance_ppm, 0.0);
        assert_eq!(result.applicable_clause, Aes5Clause::Unknown);
        assert_eq!(validator.metrics().total_validations(), 0);
    }

    #[test]
    fn description_and_display() {
        let validator = FrequencyValidator::with_defaults();
        let result = validator.validate_frequency(48_000, 100);
        assert!(result.description().contains("valid"));
        let text = result.to_string();
        assert!(text.starts_with("48000 Hz -> 48000 Hz"));
        assert!(text.contains("Section 5.1"));
    }

    #[test]
    fn missing_collaborators_fail_construction() {
        let err = FrequencyValidator::create(None, Some(ValidationCore::new())).unwrap_err();
        assert_eq!(err, BuildError::MissingCompliance);

        let err = FrequencyValidator::create(Some(Box::new(ClauseTable)), None).unwrap_err();
        assert_eq!(err, BuildError::MissingValidationCore);

        assert!(FrequencyValidator::create(Some(Box::new(ClauseTable)), Some(ValidationCore::new())).is_ok());
    }

    #[test]
    fn invalid_config_fails_construction() {
        let config = FrequencyValidatorConfig {
            max_validation_latency_ns: 0,
            ..Default::default()
        };
        let result = FrequencyValidator::create_with_config(
            Some(Box::new(ClauseTable)),
            Some(ValidationCore::new()),
            config,
        );
        assert!(matches!(result, Err(BuildError::InvalidConfig(_))));
    }

    #[test]
    fn default_tolerance_comes_from_config() {
        let config = FrequencyValidatorConfig {
            default_tolerance_ppm: 200,
            ..Default::default()
        };
        let validator = FrequencyValidator::create_with_config(
            Some(Box::new(ClauseTable)),
            Some(ValidationCore::new()),
            config,
        )
        .unwrap();

        // 48 005 Hz is ~104 ppm off: fails at 100, passes at 200.
        assert!(validator.validate_frequency_default(48_005).is_valid());
        assert!(!validator.validate_frequency(48_005, 100).is_valid());
        assert_eq!(validator.tolerance_for(48_000).map(|t| t.tolerance_ppm), Some(200));
    }

    #[test]
    fn compliance_collaborator_is_reachable() {
        let validator = FrequencyValidator::with_defaults();
        let result = validator.validate_frequency(44_100, 100);
        assert!(validator
            .compliance()
            .verify_clause_compliance(result.closest_standard_frequency, result.applicable_clause.id()));
    }

    #[test]
    fn footprint_includes_core() {
        let validator = FrequencyValidator::with_defaults();
        assert!(validator.memory_footprint() >= ValidationCore::memory_footprint());
        assert!(validator.memory_footprint() < 2048);
    }
}
