//! The verification runner: executes a batch of (rule, dataset) pairs.
//!
//! Results come back one per pair, in the order the pairs were added,
//! whatever the dataset sizes or error counts.  Report rendering depends on
//! that order.
//!
//! Fault handling follows `RunnerConfig::on_fault`:
//!
//! - `abort` (default): the first predicate fault, in pairing order, is
//!   returned and no results are produced.
//! - `isolate`: a faulting pair becomes a broken result carrying a single
//!   "rule could not be evaluated" violation, and the run continues.
//!
//! With `parallel = true` pairs are evaluated on the rayon pool.  Every pair
//! is still evaluated to completion before faults are inspected, so the fault
//! reported under `abort` is the same one a sequential run would report.

use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vigil_contracts::{
    error::{VigilError, VigilResult},
    result::VerificationResult,
    violation::Violation,
};

use crate::{
    rule::Rule,
    traits::{RuleCheck, Verification},
};

/// What the runner does when a predicate faults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaultPolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Record the fault as a broken result and keep going.
    Isolate,
}

/// Runner settings, usually the `[runner]` table of the vigil config file.
///
/// ```toml
/// [runner]
/// parallel = true
/// on_fault = "isolate"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Evaluate pairs concurrently.  Output order is unaffected.
    pub parallel: bool,
    pub on_fault: FaultPolicy,
}

impl RunnerConfig {
    /// Parse a standalone `RunnerConfig` document.
    pub fn from_toml_str(s: &str) -> VigilResult<Self> {
        toml::from_str(s).map_err(|e| VigilError::ConfigError {
            reason: format!("failed to parse runner TOML: {}", e),
        })
    }

    pub fn from_file(path: &Path) -> VigilResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| VigilError::ConfigError {
            reason: format!("failed to read runner config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}

/// An ordered batch of verifications.
///
/// ```rust,ignore
/// let mut batch = VerificationBatch::new(RunnerConfig::default());
/// batch.add(&prefix_rule, &events).add(&status_rule, &appointments);
/// let results = batch.run()?;
/// ```
#[derive(Default)]
pub struct VerificationBatch<'a> {
    config: RunnerConfig,
    checks: Vec<Box<dyn Verification + 'a>>,
}

impl<'a> VerificationBatch<'a> {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            checks: Vec::new(),
        }
    }

    /// Pair `rule` with `records` at the end of the batch.
    pub fn add<R: Sync>(&mut self, rule: &'a Rule<R>, records: &'a [R]) -> &mut Self {
        self.checks.push(Box::new(RuleCheck::new(rule, records)));
        self
    }

    /// Append a custom verification.
    pub fn push(&mut self, check: Box<dyn Verification + 'a>) -> &mut Self {
        self.checks.push(check);
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every verification and return the results in pairing order.
    pub fn run(&self) -> VigilResult<Vec<VerificationResult>> {
        let outcomes: Vec<VigilResult<VerificationResult>> = if self.config.parallel {
            self.checks
                .par_iter()
                .map(|check| self.evaluate(check.as_ref()))
                .collect()
        } else {
            self.checks
                .iter()
                .map(|check| self.evaluate(check.as_ref()))
                .collect()
        };

        let results = outcomes.into_iter().collect::<VigilResult<Vec<_>>>()?;

        debug!(
            rule_count = results.len(),
            verified = results.iter().filter(|r| r.is_verified()).count(),
            parallel = self.config.parallel,
            "verification run complete"
        );

        Ok(results)
    }

    fn evaluate(&self, check: &dyn Verification) -> VigilResult<VerificationResult> {
        match check.run() {
            Ok(result) => {
                if !result.is_verified() {
                    warn!(
                        rule = %result.rule(),
                        error_count = result.error_count(),
                        "rule broken"
                    );
                }
                Ok(result)
            }
            Err(VigilError::PredicateFault { rule, reason })
                if self.config.on_fault == FaultPolicy::Isolate =>
            {
                warn!(rule = %rule, %reason, "rule could not be evaluated; isolating fault");
                Ok(VerificationResult::from_errors(
                    check.rule(),
                    vec![Violation::message(format!(
                        "rule could not be evaluated: {reason}"
                    ))],
                ))
            }
            Err(e) => {
                warn!(rule = %check.rule(), error = %e, "verification aborted");
                Err(e)
            }
        }
    }
}

/// Run an optional batch.  No batch, or an empty one, yields no results.
pub fn verify_rules(batch: Option<&VerificationBatch<'_>>) -> VigilResult<Vec<VerificationResult>> {
    match batch {
        Some(batch) if !batch.is_empty() => batch.run(),
        _ => Ok(Vec::new()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use vigil_contracts::{error::VigilError, result::VerificationResult, violation::Violation};

    use super::{verify_rules, FaultPolicy, RunnerConfig, VerificationBatch};
    use crate::{rule::Rule, traits::Verification};

    // ── Builder helpers ───────────────────────────────────────────────────────

    fn odd_flagger() -> Rule<i64> {
        Rule::infallible("All numbers should be even", |n: &i64| {
            (n % 2 != 0).then(|| Violation::message(format!("{n} is odd")))
        })
    }

    fn sky_is_blue() -> Rule<&'static str> {
        Rule::infallible("The sky should be blue", |color: &&'static str| {
            (*color != "blue").then(|| Violation::message(format!("sky is {color}")))
        })
    }

    fn faulty() -> Rule<i64> {
        Rule::new("Numbers can be parsed", |n: &i64| {
            if *n < 0 {
                Err(VigilError::fault(format!("cannot handle {n}")))
            } else {
                Ok(None)
            }
        })
    }

    fn config(parallel: bool, on_fault: FaultPolicy) -> RunnerConfig {
        RunnerConfig { parallel, on_fault }
    }

    // ── Empty batches ─────────────────────────────────────────────────────────

    #[test]
    fn no_batch_yields_no_results() {
        assert_eq!(verify_rules(None).unwrap(), Vec::<VerificationResult>::new());
        let empty = VerificationBatch::default();
        assert!(verify_rules(Some(&empty)).unwrap().is_empty());
    }

    // ── Ordering ──────────────────────────────────────────────────────────────

    #[test]
    fn results_follow_pairing_order() {
        let sky = sky_is_blue();
        let numbers = odd_flagger();
        let skies = ["blue"];
        let data = [2, 4, 5, 6, 7, 8, 10];

        let mut batch = VerificationBatch::default();
        batch.add(&sky, &skies).add(&numbers, &data);

        let results = verify_rules(Some(&batch)).unwrap();
        assert_eq!(
            results,
            vec![
                VerificationResult::verified("The sky should be blue"),
                VerificationResult::new(
                    "All numbers should be even",
                    false,
                    vec!["5 is odd".into(), "7 is odd".into()],
                )
                .unwrap(),
            ]
        );
    }

    #[test]
    fn parallel_run_preserves_order() {
        let rules: Vec<Rule<i64>> = (0..32)
            .map(|i| {
                Rule::infallible(format!("rule {i}"), move |n: &i64| {
                    (*n == i).then(|| Violation::message(format!("{n} hit rule {i}")))
                })
            })
            .collect();
        let data: Vec<i64> = (0..32).rev().collect();

        let mut sequential = VerificationBatch::new(config(false, FaultPolicy::Abort));
        let mut parallel = VerificationBatch::new(config(true, FaultPolicy::Abort));
        for rule in &rules {
            sequential.add(rule, &data);
            parallel.add(rule, &data);
        }

        let expected = sequential.run().unwrap();
        let actual = parallel.run().unwrap();
        assert_eq!(actual, expected);
        let names: Vec<&str> = actual.iter().map(|r| r.rule()).collect();
        assert_eq!(names[0], "rule 0");
        assert_eq!(names[31], "rule 31");
    }

    #[test]
    fn same_rule_may_run_over_several_datasets() {
        let numbers = odd_flagger();
        let first = [1];
        let second = [2];

        let mut batch = VerificationBatch::default();
        batch.add(&numbers, &first).add(&numbers, &second);

        let results = batch.run().unwrap();
        assert!(!results[0].is_verified());
        assert!(results[1].is_verified());
    }

    // ── Faults ────────────────────────────────────────────────────────────────

    #[test]
    fn fault_aborts_run_by_default() {
        let numbers = odd_flagger();
        let parse = faulty();
        let data = [1, -1, 3];

        let mut batch = VerificationBatch::default();
        batch.add(&numbers, &data).add(&parse, &data);

        let err = batch.run().unwrap_err();
        assert_eq!(
            err,
            VigilError::PredicateFault {
                rule: "Numbers can be parsed".to_string(),
                reason: "cannot handle -1".to_string(),
            }
        );
    }

    #[test]
    fn parallel_abort_reports_first_fault_in_pairing_order() {
        let first: Rule<i64> = Rule::new("first", |_: &i64| Err(VigilError::fault("first")));
        let second: Rule<i64> = Rule::new("second", |_: &i64| Err(VigilError::fault("second")));
        let data = [1];

        let mut batch = VerificationBatch::new(config(true, FaultPolicy::Abort));
        batch.add(&first, &data).add(&second, &data);

        match batch.run().unwrap_err() {
            VigilError::PredicateFault { rule, .. } => assert_eq!(rule, "first"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn isolate_turns_fault_into_broken_result() {
        let numbers = odd_flagger();
        let parse = faulty();
        let data = [1, -1, 3];

        let mut batch = VerificationBatch::new(config(false, FaultPolicy::Isolate));
        batch.add(&parse, &data).add(&numbers, &data);

        let results = batch.run().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].rule(), "Numbers can be parsed");
        assert!(!results[0].is_verified());
        assert_eq!(
            results[0].messages().collect::<Vec<_>>(),
            vec!["rule could not be evaluated: cannot handle -1"]
        );
        assert_eq!(
            results[1].messages().collect::<Vec<_>>(),
            vec!["1 is odd", "-1 is odd", "3 is odd"],
            "negative odd numbers are odd too"
        );
    }

    #[test]
    fn isolate_does_not_swallow_other_errors() {
        let broken_config: Rule<i64> = Rule::new("needs config", |_: &i64| {
            Err(VigilError::ConfigError {
                reason: "no table".to_string(),
            })
        });
        let data = [1];

        let mut batch = VerificationBatch::new(config(false, FaultPolicy::Isolate));
        batch.add(&broken_config, &data);

        assert!(matches!(
            batch.run().unwrap_err(),
            VigilError::ConfigError { .. }
        ));
    }

    // ── Custom verifications ──────────────────────────────────────────────────

    struct Fixed(VerificationResult);

    impl Verification for Fixed {
        fn rule(&self) -> &str {
            self.0.rule()
        }

        fn run(&self) -> vigil_contracts::error::VigilResult<VerificationResult> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn custom_verifications_mix_with_rule_checks() {
        let numbers = odd_flagger();
        let data = [3];

        let mut batch = VerificationBatch::default();
        batch
            .push(Box::new(Fixed(VerificationResult::verified("fixed"))))
            .add(&numbers, &data);

        let results = batch.run().unwrap();
        assert_eq!(results[0].rule(), "fixed");
        assert_eq!(results[1].rule(), "All numbers should be even");
    }

    // ── Config ────────────────────────────────────────────────────────────────

    #[test]
    fn config_parses_from_toml() {
        let cfg = RunnerConfig::from_toml_str("parallel = true\non_fault = \"isolate\"\n").unwrap();
        assert_eq!(cfg, config(true, FaultPolicy::Isolate));
    }

    #[test]
    fn config_defaults_when_empty() {
        let cfg = RunnerConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, RunnerConfig::default());
        assert_eq!(cfg.on_fault, FaultPolicy::Abort);
        assert!(!cfg.parallel);
    }

    #[test]
    fn config_rejects_unknown_policy() {
        let err = RunnerConfig::from_toml_str("on_fault = \"retry\"").unwrap_err();
        assert!(matches!(err, VigilError::ConfigError { .. }));
    }
}
