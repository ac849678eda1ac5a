//! # vigil-core
//!
//! The rule verification engine.
//!
//! This crate provides:
//! - `Rule`, a described per-record predicate, and `Rule::apply`, which turns
//!   it into one `VerificationResult` for a dataset
//! - the `Verification` trait that erases the record type of a rule/dataset pair
//! - `VerificationBatch`, which runs many pairs in order, sequentially or on
//!   the rayon pool
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vigil_core::{Rule, RunnerConfig, VerificationBatch};
//!
//! let even = Rule::infallible("All numbers should be even", |n: &i64| {
//!     (n % 2 != 0).then(|| Violation::message(format!("{n} is not even")))
//! });
//! let mut batch = VerificationBatch::new(RunnerConfig::default());
//! batch.add(&even, &[2, 3, 4]);
//! let results = batch.run()?;
//! ```

pub mod rule;
pub mod runner;
pub mod traits;

pub use rule::{Predicate, Rule};
pub use runner::{verify_rules, FaultPolicy, RunnerConfig, VerificationBatch};
pub use traits::{RuleCheck, Verification};
