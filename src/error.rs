//! Construction-time errors.
//!
//! Hot-path operations never fail with an error value; they return results
//! that carry their own outcome. Only building a component can fail.

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("missing validation core")]
    MissingValidationCore,
    #[error("missing clause-compliance collaborator")]
    MissingCompliance,
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
