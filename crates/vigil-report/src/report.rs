//! The verification report: many results partitioned into verified and broken.
//!
//! `verified` keeps every passing rule description in result order, duplicates
//! included.  `broken` maps each failing rule description to its violations and
//! iterates in the order the rules were first seen, not by key.  If the same
//! description is broken twice, the later violations are appended to the first
//! entry.
//!
//! A description is in exactly one partition.  Once broken it stays broken: it
//! leaves `verified`, and later passing results for it are dropped.
//!
//! Equality is structural over both partitions.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};

use vigil_contracts::{result::VerificationResult, violation::Violation};

/// Summary of one verification run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    verified: Vec<String>,
    broken: IndexMap<String, Vec<Violation>>,
}

impl VerificationReport {
    /// Partition `results` in order.
    pub fn new(results: &[VerificationResult]) -> Self {
        results.iter().cloned().collect()
    }

    fn push(&mut self, result: VerificationResult) {
        if result.is_verified() {
            if !self.broken.contains_key(result.rule()) {
                self.verified.push(result.rule().to_string());
            }
        } else {
            let rule = result.rule().to_string();
            self.verified.retain(|r| *r != rule);
            self.broken
                .entry(rule)
                .or_default()
                .extend(result.into_errors());
        }
    }

    /// Descriptions of the rules that passed, in result order.
    pub fn verified(&self) -> &[String] {
        &self.verified
    }

    /// Broken rule descriptions mapped to their violations, in result order.
    pub fn broken(&self) -> &IndexMap<String, Vec<Violation>> {
        &self.broken
    }

    pub fn has_verified(&self) -> bool {
        !self.verified.is_empty()
    }

    pub fn has_broken(&self) -> bool {
        !self.broken.is_empty()
    }

    pub fn verified_count(&self) -> usize {
        self.verified.len()
    }

    pub fn broken_count(&self) -> usize {
        self.broken.len()
    }

    /// The structured form handed to JSON sinks:
    /// `{ "verified": [rule...], "broken": { rule: [message...] } }`.
    pub fn to_json_value(&self) -> Value {
        let broken: serde_json::Map<String, Value> = self
            .broken
            .iter()
            .map(|(rule, errors)| {
                let messages: Vec<&str> = errors.iter().map(|v| v.message.as_str()).collect();
                (rule.clone(), json!(messages))
            })
            .collect();
        json!({
            "verified": self.verified,
            "broken": broken,
        })
    }
}

impl FromIterator<VerificationResult> for VerificationReport {
    fn from_iter<I: IntoIterator<Item = VerificationResult>>(iter: I) -> Self {
        let mut report = VerificationReport::default();
        for result in iter {
            report.push(result);
        }
        report
    }
}

impl From<Vec<VerificationResult>> for VerificationReport {
    fn from(results: Vec<VerificationResult>) -> Self {
        results.into_iter().collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
