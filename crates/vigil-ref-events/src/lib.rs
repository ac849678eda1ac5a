//! # vigil-ref-events
//!
//! Reference rule set for the vigil record verifier: the business rules a
//! university career office runs over its event and appointment exports.
//!
//! - [`records`]: typed `Event` and `Appointment` records, loaded from JSON
//!   exports keyed by analytics column names.
//! - [`rules`]: the six reference rules (event prefixes, invite-only
//!   settings, advertisement labels, virtual sessions, appointment statuses
//!   and types).
//! - [`rule_sets`]: the rule catalog and the daily rule set.
//! - [`config`]: TOML configuration for the rules, the runner and output.
//! - [`mock_data`]: fictional exports for demos and tests.

pub mod config;
pub mod mock_data;
pub mod records;
pub mod rule_sets;
pub mod rules;
pub mod text;

pub use config::{RuleSetConfig, VigilConfig};
pub use records::{Appointment, Event};
pub use rule_sets::{
    daily::{daily_verification, DailyRuleSet},
    RuleCatalog,
};
