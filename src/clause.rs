//! AES5-2018 clause identifiers and the frequency-to-clause mapping.
//!
//! [`clause_for_frequency`] is the single source of truth for which clause
//! governs a standard frequency. The [`ClauseCompliance`] collaborator that
//! a [`FrequencyValidator`](crate::frequency::FrequencyValidator) is built
//! with answers clause queries, and the standard implementation
//! [`ClauseTable`] derives its answers from the same mapping, so the two can
//! never disagree.
//!
//! | Clause | Frequencies |
//! |--------|-------------|
//! | 5.1 | 48 000 (primary) |
//! | 5.2 | 44 100, 96 000 |
//! | 5.3 | 88 200, 176 400, 192 000, 384 000 (rate multiples) |
//! | 5.4 | 32 000 (legacy) |
//! | A.1 | 47 952, 48 048 (pull-down / pull-up) |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A clause of AES5-2018 that justifies a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Aes5Clause {
    /// Section 5.1: primary sampling frequency.
    Section5_1,
    /// Section 5.2: other recommended sampling frequencies.
    Section5_2,
    /// Section 5.3: rate categories and multiples of the base rate.
    Section5_3,
    /// Section 5.4: legacy sampling frequencies.
    Section5_4,
    /// Annex A: video-synchronous pull-up / pull-down variants.
    AnnexA,
    /// No clause applies.
    #[default]
    Unknown,
}

/// Every clause that maps to at least one frequency, in document order.
pub const KNOWN_CLAUSES: [Aes5Clause; 5] = [
    Aes5Clause::Section5_1,
    Aes5Clause::Section5_2,
    Aes5Clause::Section5_3,
    Aes5Clause::Section5_4,
    Aes5Clause::AnnexA,
];

impl Aes5Clause {
    /// Textual identifier as used in the standard ("5.1", "A.1", ...).
    pub fn id(self) -> &'static str {
        match self {
            Aes5Clause::Section5_1 => "5.1",
            Aes5Clause::Section5_2 => "5.2",
            Aes5Clause::Section5_3 => "5.3",
            Aes5Clause::Section5_4 => "5.4",
            Aes5Clause::AnnexA => "A.1",
            Aes5Clause::Unknown => "unknown",
        }
    }

    /// Look up a clause by identifier. Unrecognised identifiers give `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        KNOWN_CLAUSES.into_iter().find(|clause| clause.id() == id)
    }

    /// Standard frequencies governed by this clause (empty for `Unknown`).
    pub fn frequencies(self) -> &'static [u32] {
        match self {
            Aes5Clause::Section5_1 => &[48_000],
            Aes5Clause::Section5_2 => &[44_100, 96_000],
            Aes5Clause::Section5_3 => &[88_200, 176_400, 192_000, 384_000],
            Aes5Clause::Section5_4 => &[32_000],
            Aes5Clause::AnnexA => &[47_952, 48_048],
            Aes5Clause::Unknown => &[],
        }
    }
}

impl fmt::Display for Aes5Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aes5Clause::Unknown => f.write_str("unknown clause"),
            Aes5Clause::AnnexA => write!(f, "AES5-2018 Annex {}", self.id()),
            _ => write!(f, "AES5-2018 Section {}", self.id()),
        }
    }
}

impl FromStr for Aes5Clause {
    type Err = UnknownClause;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aes5Clause::from_id(s.trim()).ok_or_else(|| UnknownClause(s.to_string()))
    }
}

/// Error returned when parsing an unrecognised clause identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown AES5-2018 clause: {0:?}")]
pub struct UnknownClause(pub String);

/// The clause governing `frequency_hz`, or `Unknown` if it is not a standard frequency.
#[inline]
pub const fn clause_for_frequency(frequency_hz: u32) -> Aes5Clause {
    match frequency_hz {
        48_000 => Aes5Clause::Section5_1,
        44_100 | 96_000 => Aes5Clause::Section5_2,
        88_200 | 176_400 | 192_000 | 384_000 => Aes5Clause::Section5_3,
        32_000 => Aes5Clause::Section5_4,
        47_952 | 48_048 => Aes5Clause::AnnexA,
        _ => Aes5Clause::Unknown,
    }
}

// ---------------------------------------------------------------------------
// Collaborator interface
// ---------------------------------------------------------------------------

/// Clause-compliance lookup handed to a frequency validator at construction.
///
/// Not consulted on the hot path; the validator resolves clauses through
/// [`clause_for_frequency`] directly.
pub trait ClauseCompliance: Send + Sync {
    /// Whether `frequency_hz` is one of the frequencies listed under `clause_id`.
    fn verify_clause_compliance(&self, frequency_hz: u32, clause_id: &str) -> bool;

    /// Frequencies listed under `clause_id` (empty for unknown clauses).
    fn supported_frequencies(&self, clause_id: &str) -> &'static [u32];

    /// Whether `clause_id` names a known clause.
    fn is_clause_supported(&self, clause_id: &str) -> bool;
}

/// Standard [`ClauseCompliance`] backed by [`Aes5Clause::frequencies`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClauseTable;

impl ClauseCompliance for ClauseTable {
    fn verify_clause_compliance(&self, frequency_hz: u32, clause_id: &str) -> bool {
        frequency_hz != 0 && self.supported_frequencies(clause_id).contains(&frequency_hz)
    }

    fn supported_frequencies(&self, clause_id: &str) -> &'static [u32] {
        Aes5Clause::from_id(clause_id)
            .map(Aes5Clause::frequencies)
            .unwrap_or(&[])
    }

    fn is_clause_supported(&self, clause_id: &str) -> bool {
        Aes5Clause::from_id(clause_id).is_some()
    }
}
