//! Rule sets: fixed groups of reference rules paired with the datasets they
//! run over.

use std::sync::Arc;

use chrono::NaiveDateTime;

use vigil_core::rule::Rule;

use crate::{
    config::RuleSetConfig,
    records::{Appointment, Event},
    rules::{appointments, events},
};

pub mod daily;

/// Every reference rule, built against one configuration and clock.
#[derive(Debug)]
pub struct RuleCatalog {
    pub events: Vec<Rule<Event>>,
    pub appointments: Vec<Rule<Appointment>>,
}

impl RuleCatalog {
    pub fn new(config: &RuleSetConfig, now: NaiveDateTime) -> Self {
        let config = Arc::new(config.clone());
        Self {
            events: vec![
                events::prefixed_correctly(Arc::clone(&config)),
                events::invite_only_iff_not_university_wide(Arc::clone(&config), now),
                events::advertisements_labeled(Arc::clone(&config)),
                events::past_events_not_virtual_sessions(Arc::clone(&config), now),
            ],
            appointments: vec![
                appointments::past_appointments_finalized(config, now),
                appointments::appointments_have_type(),
            ],
        }
    }

    /// `(name, description)` for every rule, events first.
    pub fn describe(&self) -> Vec<(&str, &str)> {
        let events = self.events.iter().map(|r| (r.name().unwrap_or(""), r.description()));
        let appts = self
            .appointments
            .iter()
            .map(|r| (r.name().unwrap_or(""), r.description()));
        events.chain(appts).collect()
    }

    /// Machine name of the rule with this description.
    pub fn name_for(&self, description: &str) -> Option<&str> {
        self.describe()
            .into_iter()
            .find(|(_, d)| *d == description)
            .map(|(name, _)| name)
    }
}
