//! Error types for the vigil verification pipeline.
//!
//! A rule that finds a bad record does NOT produce a `VigilError`: that is a
//! `Violation`, recorded in the `VerificationResult`.  `VigilError` is reserved
//! for the cases where verification itself cannot proceed.

use thiserror::Error;

/// The unified error type for the vigil crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VigilError {
    /// A rule predicate failed while evaluating a record (unparseable date,
    /// unknown lookup key, ...).  Aborts the run unless faults are isolated.
    #[error("rule '{rule}' could not be evaluated: {reason}")]
    PredicateFault { rule: String, reason: String },

    /// A `VerificationResult` was constructed with a `verified` flag that
    /// disagrees with its error list.
    #[error("verification result invariant violated: {reason}")]
    InvariantViolation { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// Records could not be loaded from the data source.
    #[error("data source error: {reason}")]
    DataSource { reason: String },

    /// A rendered report or export could not be written.
    #[error("report sink error: {reason}")]
    Sink { reason: String },
}

impl VigilError {
    /// Shorthand used by rule predicates to report a fault.
    ///
    /// The `rule` field is left empty here and filled in by `Rule::apply`,
    /// which knows the description of the rule being evaluated.
    pub fn fault(reason: impl Into<String>) -> Self {
        VigilError::PredicateFault {
            rule: String::new(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the vigil crates.
pub type VigilResult<T> = Result<T, VigilError>;
