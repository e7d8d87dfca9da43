//! Tunables for the validator and the rate category manager.
//!
//! Plain data with `serde` derives so a host application can embed these in
//! its own configuration. Nothing here touches the filesystem.
//!
//! ```rust
//! use aes5_rates::config::FrequencyValidatorConfig;
//!
//! let config = FrequencyValidatorConfig {
//!     default_tolerance_ppm: 50,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Widest tolerance accepted by configuration: ±100%.
pub const MAX_TOLERANCE_PPM: u32 = 1_000_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    ZeroLatencyBudget { field: &'static str },
    #[error("tolerance of {ppm} ppm exceeds the {} ppm limit", MAX_TOLERANCE_PPM)]
    ToleranceTooWide { ppm: u32 },
}

/// Settings for [`FrequencyValidator`](crate::frequency::FrequencyValidator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyValidatorConfig {
    /// Tolerance used by `validate_frequency_default`.
    #[serde(default = "default_tolerance_ppm")]
    pub default_tolerance_ppm: u32,
    /// Budget used by `meets_default_realtime_constraints`.
    #[serde(default = "default_validation_latency_ns")]
    pub max_validation_latency_ns: u64,
}

/// Settings for [`RateCategoryManager`](crate::rate_category::RateCategoryManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCategoryConfig {
    /// Budget used by `meets_default_realtime_constraints`.
    #[serde(default = "default_classification_latency_ns")]
    pub max_classification_latency_ns: u64,
}

fn default_tolerance_ppm() -> u32 { 100 }
fn default_validation_latency_ns() -> u64 { 50_000 }
fn default_classification_latency_ns() -> u64 { 10_000 }

impl Default for FrequencyValidatorConfig {
    fn default() -> Self {
        Self {
            default_tolerance_ppm: default_tolerance_ppm(),
            max_validation_latency_ns: default_validation_latency_ns(),
        }
    }
}

impl Default for RateCategoryConfig {
    fn default() -> Self {
        Self {
            max_classification_latency_ns: default_classification_latency_ns(),
        }
    }
}

impl FrequencyValidatorConfig {
    /// Reject a zero latency budget or a tolerance wider than [`MAX_TOLERANCE_PPM`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_validation_latency_ns == 0 {
            return Err(ConfigError::ZeroLatencyBudget {
                field: "max_validation_latency_ns",
            });
        }
        if self.default_tolerance_ppm > MAX_TOLERANCE_PPM {
            return Err(ConfigError::ToleranceTooWide {
                ppm: self.default_tolerance_ppm,
            });
        }
        Ok(())
    }
}

impl RateCategoryConfig {
    /// Reject a zero latency budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_classification_latency_ns == 0 {
            return Err(ConfigError::ZeroLatencyBudget {
                field: "max_classification_latency_ns",
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
