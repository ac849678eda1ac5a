//! Rules and the rule application primitive.
//!
//! A `Rule` is a value: a description plus a predicate that inspects one
//! record and returns either nothing (the record is fine) or a `Violation`.
//! `Rule::apply` runs the predicate over every record of a dataset and
//! freezes the collected violations into a `VerificationResult`.
//!
//! Predicates return `VigilResult` so that a record the predicate cannot
//! evaluate (an unparseable timestamp, an unknown lookup key) is reported as
//! a fault rather than mistaken for a violation.  `apply` does not catch
//! faults; the first one ends the application and is returned to the caller.

use std::fmt;

use tracing::debug;

use vigil_contracts::{
    error::{VigilError, VigilResult},
    result::VerificationResult,
    violation::Violation,
};

/// A per-record check.
///
/// Returns `Ok(None)` when the record satisfies the rule, `Ok(Some(v))` when
/// it breaks it, and `Err` when the record could not be evaluated at all.
pub type Predicate<R> = Box<dyn Fn(&R) -> VigilResult<Option<Violation>> + Send + Sync>;

/// A named, stateless validity check over records of type `R`.
pub struct Rule<R> {
    /// Short machine name (e.g. `event_wrong_prefix`), used by sinks to name
    /// export files.  Optional: the description is the rule's identity.
    name: Option<String>,
    description: String,
    predicate: Predicate<R>,
}

impl<R> Rule<R> {
    /// Build a rule from a fallible predicate.
    pub fn new<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&R) -> VigilResult<Option<Violation>> + Send + Sync + 'static,
    {
        Self {
            name: None,
            description: description.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Build a rule from a predicate that cannot fault.
    pub fn infallible<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&R) -> Option<Violation> + Send + Sync + 'static,
    {
        Self::new(description, move |record: &R| Ok(predicate(record)))
    }

    /// Attach a short machine name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Evaluate the predicate against a single record.
    ///
    /// A fault raised without a rule description gets this rule's description.
    pub fn check(&self, record: &R) -> VigilResult<Option<Violation>> {
        (self.predicate)(record).map_err(|e| self.attribute(e))
    }

    /// Apply the rule to every record in order and produce one result.
    ///
    /// Violations keep record order; records that pass contribute nothing.
    /// An empty dataset always yields a verified result.
    pub fn apply(&self, records: &[R]) -> VigilResult<VerificationResult> {
        debug!(
            rule = %self.description,
            record_count = records.len(),
            "applying verification rule"
        );

        let mut errors: Vec<Violation> = Vec::new();
        for record in records {
            if let Some(violation) = self.check(record)? {
                debug!(
                    rule = %self.description,
                    record_id = %violation.record_id,
                    "record broke rule"
                );
                errors.push(violation);
            }
        }

        Ok(VerificationResult::from_errors(self.description.clone(), errors))
    }

    fn attribute(&self, error: VigilError) -> VigilError {
        match error {
            VigilError::PredicateFault { rule, reason } if rule.is_empty() => {
                VigilError::PredicateFault {
                    rule: self.description.clone(),
                    reason,
                }
            }
            other => other,
        }
    }
}

impl<R> fmt::Debug for Rule<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use vigil_contracts::{error::VigilError, violation::Violation};

    use super::Rule;

    // ── Builder helpers ───────────────────────────────────────────────────────

    fn even_numbers() -> Rule<i64> {
        Rule::infallible("All numbers should be even", |n: &i64| {
            if n % 2 != 0 {
                Some(Violation::new(n.to_string(), format!("{n} is not even")))
            } else {
                None
            }
        })
    }

    // ── apply ─────────────────────────────────────────────────────────────────

    #[test]
    fn empty_input_is_verified() {
        let result = even_numbers().apply(&[]).unwrap();
        assert!(result.is_verified());
        assert!(result.errors().is_empty());
        assert_eq!(result.rule(), "All numbers should be even");
    }

    #[test]
    fn errors_follow_record_order() {
        let result = even_numbers().apply(&[3, 4, 5]).unwrap();
        assert!(!result.is_verified());
        assert_eq!(
            result.messages().collect::<Vec<_>>(),
            vec!["3 is not even", "5 is not even"]
        );
        assert_eq!(result.errors()[0].record_id, "3");
        assert_eq!(result.errors()[1].record_id, "5");
    }

    #[test]
    fn passing_records_contribute_nothing() {
        let result = even_numbers().apply(&[2, 4, 6, 8]).unwrap();
        assert!(result.is_verified());
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn fault_propagates_with_rule_description() {
        let rule: Rule<&str> = Rule::new("Dates parse", |s: &&str| {
            if s.is_empty() {
                Err(VigilError::fault("empty date"))
            } else {
                Ok(None)
            }
        });

        let err = rule.apply(&["2020-01-01", "", "2021-01-01"]).unwrap_err();
        assert_eq!(
            err,
            VigilError::PredicateFault {
                rule: "Dates parse".to_string(),
                reason: "empty date".to_string(),
            }
        );
    }

    #[test]
    fn fault_stops_evaluation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let rule: Rule<u8> = Rule::new("stops early", move |n: &u8| {
            counter.fetch_add(1, Ordering::SeqCst);
            if *n == 2 {
                Err(VigilError::fault("two"))
            } else {
                Ok(None)
            }
        });

        assert!(rule.apply(&[1, 2, 3, 4]).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2, "records after the fault must not be visited");
    }

    #[test]
    fn non_fault_errors_pass_through_unchanged() {
        let rule: Rule<u8> = Rule::new("config lookup", |_: &u8| {
            Err(VigilError::ConfigError {
                reason: "missing".to_string(),
            })
        });
        assert!(matches!(
            rule.check(&1).unwrap_err(),
            VigilError::ConfigError { .. }
        ));
    }

    #[test]
    fn rule_is_reusable() {
        let rule = even_numbers();
        let first = rule.apply(&[1]).unwrap();
        let second = rule.apply(&[1]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn name_is_optional() {
        let rule = even_numbers();
        assert_eq!(rule.name(), None);
        let rule = rule.with_name("even_numbers");
        assert_eq!(rule.name(), Some("even_numbers"));
        assert!(format!("{rule:?}").contains("even_numbers"));
    }
}
