//! # vigil-report
//!
//! Aggregation and presentation of verification results.
//!
//! - [`report::VerificationReport`] partitions results into verified rule
//!   descriptions and broken rules with their violations.
//! - [`render::render`] produces the fixed plain-text summary.
//! - [`export::export_errors`] and [`export::render_csv`] turn a broken
//!   result into export rows and CSV text.
//!
//! Everything here is pure; writing the output is the caller's job.

pub mod export;
pub mod render;
pub mod report;

pub use export::{export_default, export_errors, render_csv};
pub use render::render;
pub use report::VerificationReport;
