//! Reference business rules.
//!
//! Each constructor returns a `Rule` whose predicate owns an `Arc` of the
//! rule-set configuration and, for time-dependent rules, the reference time
//! "now".  Passing the clock in keeps every predicate pure.

use chrono::NaiveDateTime;

use vigil_contracts::error::{VigilError, VigilResult};

pub mod appointments;
pub mod events;

/// Parse a record timestamp, reporting a predicate fault on failure.
pub(crate) fn parse_timestamp(
    value: &str,
    format: &str,
    record: &str,
) -> VigilResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, format).map_err(|e| {
        VigilError::fault(format!(
            "{record} has unparseable start time '{value}': {e}"
        ))
    })
}
