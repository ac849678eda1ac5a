//! The outcome of applying one rule to one dataset.
//!
//! `VerificationResult` couples its `verified` flag to its error list: a
//! result is verified exactly when it carries no violations.  The fields are
//! private and there is no mutating API, so a result cannot drift out of that
//! state after construction.  Deserialization goes through the same check.

use serde::{Deserialize, Serialize};

use crate::{
    error::{VigilError, VigilResult},
    violation::Violation,
};

/// The result of verifying one rule against a collection of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawVerificationResult")]
pub struct VerificationResult {
    rule: String,
    verified: bool,
    errors: Vec<Violation>,
}

/// Unchecked wire form, validated by `TryFrom` before it becomes a result.
#[derive(Deserialize)]
struct RawVerificationResult {
    rule: String,
    verified: bool,
    #[serde(default)]
    errors: Vec<Violation>,
}

impl TryFrom<RawVerificationResult> for VerificationResult {
    type Error = VigilError;

    fn try_from(raw: RawVerificationResult) -> VigilResult<Self> {
        VerificationResult::new(raw.rule, raw.verified, raw.errors)
    }
}

impl VerificationResult {
    /// Build a result from an explicit flag and error list.
    ///
    /// Returns `VigilError::InvariantViolation` when `verified` is true with
    /// errors present, or false with no errors.
    pub fn new(
        rule: impl Into<String>,
        verified: bool,
        errors: Vec<Violation>,
    ) -> VigilResult<Self> {
        let rule = rule.into();
        if verified != errors.is_empty() {
            return Err(VigilError::InvariantViolation {
                reason: format!(
                    "rule '{}' marked verified={} with {} error(s)",
                    rule,
                    verified,
                    errors.len()
                ),
            });
        }
        Ok(Self {
            rule,
            verified,
            errors,
        })
    }

    /// A passing result with no errors.
    pub fn verified(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            verified: true,
            errors: Vec::new(),
        }
    }

    /// Freeze an accumulated error list; the flag is derived from it.
    pub fn from_errors(rule: impl Into<String>, errors: Vec<Violation>) -> Self {
        Self {
            rule: rule.into(),
            verified: errors.is_empty(),
            errors,
        }
    }

    /// The description of the rule that produced this result.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Violations in record order.
    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Rendered messages of every violation, in order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|v| v.message.as_str())
    }

    pub fn into_errors(self) -> Vec<Violation> {
        self.errors
    }
}
