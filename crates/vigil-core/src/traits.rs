//! The seam between the runner and the rules it executes.
//!
//! A batch mixes rules over different record types (events, appointments),
//! so the runner cannot hold `Rule<R>` directly.  `Verification` erases the
//! record type: it is one rule already paired with the dataset it will run
//! over.  `RuleCheck` is the standard implementation; hosts may provide their
//! own (for instance a check that loads its dataset lazily).

use vigil_contracts::{error::VigilResult, result::VerificationResult};

use crate::rule::Rule;

/// One rule bound to one dataset, ready to run.
///
/// Implementations must be pure: running the same verification twice yields
/// equal results.  `Send + Sync` lets the runner evaluate a batch in
/// parallel.
pub trait Verification: Send + Sync {
    /// Description of the rule, used to label faults and isolated failures.
    fn rule(&self) -> &str;

    /// Apply the rule to its dataset.
    fn run(&self) -> VigilResult<VerificationResult>;
}

/// A borrowed (rule, dataset) pair.
#[derive(Debug)]
pub struct RuleCheck<'a, R> {
    rule: &'a Rule<R>,
    records: &'a [R],
}

impl<'a, R> RuleCheck<'a, R> {
    pub fn new(rule: &'a Rule<R>, records: &'a [R]) -> Self {
        Self { rule, records }
    }
}

impl<R: Sync> Verification for RuleCheck<'_, R> {
    fn rule(&self) -> &str {
        self.rule.description()
    }

    fn run(&self) -> VigilResult<VerificationResult> {
        self.rule.apply(self.records)
    }
}
