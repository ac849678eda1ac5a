//! # vigil-contracts
//!
//! Shared types for the vigil record verifier.
//!
//! All crates in the workspace import from here. No verification logic lives
//! in this crate, only the result and violation data model and the error type.

pub mod error;
pub mod result;
pub mod violation;

pub use error::{VigilError, VigilResult};
pub use result::VerificationResult;
pub use violation::{ExportRow, Violation};
