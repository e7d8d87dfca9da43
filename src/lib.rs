//! aes5-rates: classify and validate digital-audio sampling frequencies
//! against AES5-2018 from inside a real-time audio thread.
//!
//! # Modules
//!
//! - [`validation`]: lock-free check runner with latency and outcome counters
//! - [`frequency`]: closest-standard resolution, ppm deviation, pass/fail
//! - [`rate_category`]: Quarter … Octuple band classification and multipliers
//! - [`clause`]: AES5-2018 clause identifiers and the frequency-to-clause mapping
//! - [`config`]: serde-friendly tunables for the two front-ends
//! - [`error`]: construction failures
//!
//! Every hot-path call takes `&self`, never allocates, and records into
//! atomics only, so one instance can be shared between audio threads.
//!
//! ```rust
//! use aes5_rates::prelude::*;
//!
//! let validator = FrequencyValidator::with_defaults();
//! let rates = RateCategoryManager::with_defaults();
//!
//! let check = validator.validate_frequency(44_100, TIGHT_TOLERANCE_PPM);
//! assert!(check.is_valid());
//! assert_eq!(check.applicable_clause, Aes5Clause::Section5_2);
//!
//! assert_eq!(rates.get_rate_category(192_000), RateCategory::Quadruple);
//! assert_eq!(rates.calculate_rate_multiplier(192_000), 4.0);
//! ```

pub mod clause;
pub mod config;
pub mod error;
pub mod frequency;
pub mod rate_category;
pub mod validation;

pub use clause::{Aes5Clause, ClauseCompliance, ClauseTable};
pub use config::{ConfigError, FrequencyValidatorConfig, RateCategoryConfig};
pub use error::BuildError;
pub use frequency::{FrequencyValidationResult, FrequencyValidator};
pub use rate_category::{RateCategory, RateCategoryManager, RateCategoryResult};
pub use validation::{MetricsSnapshot, ValidationCore, ValidationMetrics, ValidationOutcome};

/// Common imports for host applications.
pub mod prelude {
    pub use crate::clause::{Aes5Clause, ClauseCompliance, ClauseTable};
    pub use crate::config::{FrequencyValidatorConfig, RateCategoryConfig};
    pub use crate::error::BuildError;
    pub use crate::frequency::{
        FrequencyValidationResult, FrequencyValidator, DEFAULT_TOLERANCE_PPM,
        TIGHT_TOLERANCE_PPM,
    };
    pub use crate::rate_category::{RateCategory, RateCategoryManager, RateCategoryResult};
    pub use crate::validation::{ValidationCore, ValidationOutcome};
}
