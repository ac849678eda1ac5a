//! Rules over career-center events.
//!
//! Events owned by no career center (external events) are exempt from every
//! rule here except where noted.

use std::sync::Arc;

use chrono::NaiveDateTime;

use vigil_contracts::{
    error::{VigilError, VigilResult},
    violation::Violation,
};
use vigil_core::rule::Rule;

use crate::{
    config::RuleSetConfig,
    records::Event,
    rules::parse_timestamp,
    text::{or_list, strip_prefix_trimmed},
};

pub const PREFIX_RULE: &str = "Events are prefixed correctly if they are owned by a career center";
pub const INVITE_ONLY_RULE: &str =
    "Events are invite-only if and only if they are not University-Wide or external";
pub const ADVERTISEMENT_RULE: &str =
    "\"Advertisement\" events are labeled properly and have event type \"Other\"";
pub const VIRTUAL_SESSION_RULE: &str =
    "Non-external past events do not have the \"Virtual Session\" event type";

/// Career-center events must start with one of their center's prefixes.
///
/// University-wide and test events are exempt.  An event marked (or
/// misspelt as) cancelled must carry `"<cancelled prefix> <center prefix>"`.
pub fn prefixed_correctly(config: Arc<RuleSetConfig>) -> Rule<Event> {
    Rule::new(PREFIX_RULE, move |event: &Event| prefix_violation(&config, event))
        .with_name("event_wrong_prefix")
}

/// Upcoming career-center events are invite-only exactly when they are not
/// university-wide.
pub fn invite_only_iff_not_university_wide(
    config: Arc<RuleSetConfig>,
    now: NaiveDateTime,
) -> Rule<Event> {
    Rule::new(INVITE_ONLY_RULE, move |event: &Event| {
        invite_violation(&config, now, event)
    })
    .with_name("event_invite_only")
}

/// "Office hours" events of the advertisement center carry the
/// advertisement label and the advertisement event type.
pub fn advertisements_labeled(config: Arc<RuleSetConfig>) -> Rule<Event> {
    Rule::infallible(ADVERTISEMENT_RULE, move |event: &Event| {
        advertisement_violation(&config, event)
    })
    .with_name("event_advertisements")
}

/// Past career-center events do not keep the virtual-session event type.
pub fn past_events_not_virtual_sessions(
    config: Arc<RuleSetConfig>,
    now: NaiveDateTime,
) -> Rule<Event> {
    Rule::new(VIRTUAL_SESSION_RULE, move |event: &Event| {
        virtual_session_violation(&config, now, event)
    })
    .with_name("past_event_virtual_session")
}

// ── Predicates ────────────────────────────────────────────────────────────────

fn prefix_violation(config: &RuleSetConfig, event: &Event) -> VigilResult<Option<Violation>> {
    let Some(center) = event.owning_center() else {
        return Ok(None);
    };

    let cleaned = strip_prefix_trimmed(&event.name, &config.cancelled_prefix);
    if cleaned.starts_with(&config.university_wide_prefix) || cleaned.starts_with(&config.test_prefix)
    {
        return Ok(None);
    }

    let prefixes = config.prefixes_for(center).ok_or_else(|| {
        VigilError::fault(format!(
            "event {} belongs to career center '{}' which has no configured prefixes",
            event.id, center
        ))
    })?;

    let valid: Vec<String> = if intended_cancelled(config, &event.name) {
        prefixes
            .iter()
            .map(|p| format!("{} {}", config.cancelled_prefix, p))
            .collect()
    } else {
        prefixes.to_vec()
    };

    if valid.iter().any(|p| event.name.starts_with(p.as_str())) {
        return Ok(None);
    }

    Ok(Some(
        event_violation(
            event,
            format!("should have prefix {}", or_list(&valid)),
        )
        .with_field("career_center", center),
    ))
}

/// The name carries the cancelled prefix, or a malformed spelling of it.
fn intended_cancelled(config: &RuleSetConfig, name: &str) -> bool {
    if name.starts_with(&config.cancelled_prefix) {
        return true;
    }
    let lower = name.to_lowercase();
    lower.starts_with("cancelled") || lower.starts_with("canceled")
}

fn invite_violation(
    config: &RuleSetConfig,
    now: NaiveDateTime,
    event: &Event,
) -> VigilResult<Option<Violation>> {
    if event.owning_center().is_none() {
        return Ok(None);
    }

    let start = parse_timestamp(
        &event.start_date_time,
        &config.timestamp_format,
        &format!("event {}", event.id),
    )?;
    if start <= now {
        return Ok(None);
    }

    let cleaned = strip_prefix_trimmed(&event.name, &config.cancelled_prefix);
    let university_wide = cleaned.starts_with(&config.university_wide_prefix);
    let invite_only = event.invite_only();

    let imperative = match (university_wide, invite_only) {
        (true, true) => "should not",
        (false, false) => "should",
        _ => return Ok(None),
    };
    Ok(Some(event_violation(
        event,
        format!("{imperative} be invite-only"),
    )))
}

fn advertisement_violation(config: &RuleSetConfig, event: &Event) -> Option<Violation> {
    let is_ad = event.career_center.as_deref() == Some(config.advertisement_center.as_str())
        && event.name.to_lowercase().contains("office hours");
    if !is_ad {
        return None;
    }

    let labeled = event.has_label(&config.advertisement_label);
    let wrong_type = event.event_type != config.advertisement_event_type;
    let label_fix = format!("be labeled \"{}\"", config.advertisement_label);
    let type_fix = format!("have event type \"{}\"", config.advertisement_event_type);

    let fix = match (labeled, wrong_type) {
        (true, false) => return None,
        (false, true) => format!("{label_fix} and {type_fix}"),
        (true, true) => type_fix,
        (false, false) => label_fix,
    };
    Some(event_violation(event, format!("should {fix}")))
}

fn virtual_session_violation(
    config: &RuleSetConfig,
    now: NaiveDateTime,
    event: &Event,
) -> VigilResult<Option<Violation>> {
    let start = parse_timestamp(
        &event.start_date_time,
        &config.timestamp_format,
        &format!("event {}", event.id),
    )?;
    let past = start < now;
    let virtual_session = event.event_type == config.virtual_session_event_type;

    if past && virtual_session && event.owning_center().is_some() {
        Ok(Some(event_violation(
            event,
            format!(
                "should not have the \"{}\" event type",
                config.virtual_session_event_type
            ),
        )))
    } else {
        Ok(None)
    }
}

/// `Event <id> (<name>) <tail>`, with the event name kept for export.
fn event_violation(event: &Event, tail: String) -> Violation {
    Violation::new(
        event.id.clone(),
        format!("Event {} ({}) {}", event.id, event.name, tail),
    )
    .with_field("event_name", event.name.clone())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
