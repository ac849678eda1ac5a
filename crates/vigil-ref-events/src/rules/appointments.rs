//! Rules over advising appointments.

use std::sync::Arc;

use chrono::NaiveDateTime;

use vigil_contracts::{error::VigilResult, violation::Violation};
use vigil_core::rule::Rule;

use crate::{config::RuleSetConfig, records::Appointment, rules::parse_timestamp};

pub const STATUS_RULE: &str =
    "No past appointments are marked as \"approved\", \"requested\", or \"started\"";
pub const TYPE_MISSING_RULE: &str = "All appointments have an associated appointment type";

/// Appointments that started before `now` have left every incomplete status.
pub fn past_appointments_finalized(
    config: Arc<RuleSetConfig>,
    now: NaiveDateTime,
) -> Rule<Appointment> {
    Rule::new(STATUS_RULE, move |appt: &Appointment| {
        status_violation(&config, now, appt)
    })
    .with_name("appointment_status")
}

/// Every appointment names an appointment type.
pub fn appointments_have_type() -> Rule<Appointment> {
    Rule::infallible(TYPE_MISSING_RULE, |appt: &Appointment| {
        let missing = appt
            .appointment_type
            .as_deref()
            .map_or(true, |t| t.trim().is_empty());
        missing.then(|| appointment_violation(appt, "does not have an appointment type".to_string()))
    })
    .with_name("appointment_type_missing")
}

fn status_violation(
    config: &RuleSetConfig,
    now: NaiveDateTime,
    appt: &Appointment,
) -> VigilResult<Option<Violation>> {
    let start = parse_timestamp(
        &appt.start_date_time,
        &config.timestamp_format,
        &format!("appointment {}", appt.id),
    )?;
    let incomplete = config.incomplete_statuses.iter().any(|s| *s == appt.status);

    if incomplete && start < now {
        Ok(Some(
            appointment_violation(appt, format!("has status \"{}\"", appt.status))
                .with_field("status", appt.status.clone()),
        ))
    } else {
        Ok(None)
    }
}

/// `Appointment <id> (<staff>, <start>) <tail>`.
fn appointment_violation(appt: &Appointment, tail: String) -> Violation {
    let staff = appt.staff_name();
    Violation::new(
        appt.id.clone(),
        format!(
            "Appointment {} ({}, {}) {}",
            appt.id, staff, appt.start_date_time, tail
        ),
    )
    .with_field("staff_name", staff)
    .with_field("start_date_time", appt.start_date_time.clone())
}
