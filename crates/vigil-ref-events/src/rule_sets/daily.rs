//! The daily rule set.
//!
//! Checks event prefixes and invite-only settings, then appointment statuses,
//! and summarizes them into one report.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use vigil_contracts::{error::VigilResult, result::VerificationResult};
use vigil_core::{
    rule::Rule,
    runner::{RunnerConfig, VerificationBatch},
};
use vigil_report::VerificationReport;

use crate::{
    config::{RuleSetConfig, VigilConfig},
    records::{Appointment, Event},
    rules::{appointments, events},
};

/// File stem of the daily report; the run date is appended.
pub const REPORT_STEM: &str = "daily_rule_verification_results";

/// `daily_rule_verification_results_<YYYY-MM-DD>.txt`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("{}_{}.txt", REPORT_STEM, date.format("%Y-%m-%d"))
}

/// The three daily rules, built once per run.
#[derive(Debug)]
pub struct DailyRuleSet {
    prefix: Rule<Event>,
    invite_only: Rule<Event>,
    status: Rule<Appointment>,
}

impl DailyRuleSet {
    pub fn new(config: &RuleSetConfig, now: NaiveDateTime) -> Self {
        let config = Arc::new(config.clone());
        Self {
            prefix: events::prefixed_correctly(Arc::clone(&config)),
            invite_only: events::invite_only_iff_not_university_wide(Arc::clone(&config), now),
            status: appointments::past_appointments_finalized(config, now),
        }
    }

    /// Pair each rule with its dataset, in report order.
    pub fn batch<'a>(
        &'a self,
        events: &'a [Event],
        appointments: &'a [Appointment],
        runner: RunnerConfig,
    ) -> VerificationBatch<'a> {
        let mut batch = VerificationBatch::new(runner);
        batch
            .add(&self.prefix, events)
            .add(&self.invite_only, events)
            .add(&self.status, appointments);
        batch
    }
}

/// Run the daily rule set and summarize it.
///
/// Returns the per-rule results in rule order together with the report built
/// from them.  The first predicate fault aborts the run unless the runner is
/// configured to isolate faults.
pub fn daily_verification(
    events: &[Event],
    appointments: &[Appointment],
    now: NaiveDateTime,
    config: &VigilConfig,
) -> VigilResult<(Vec<VerificationResult>, VerificationReport)> {
    let rule_set = DailyRuleSet::new(&config.rules, now);
    let results = rule_set
        .batch(events, appointments, config.runner.clone())
        .run()?;
    let report = VerificationReport::new(&results);

    info!(
        event_count = events.len(),
        appointment_count = appointments.len(),
        verified = report.verified_count(),
        broken = report.broken_count(),
        "daily verification finished"
    );

    Ok((results, report))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use vigil_contracts::error::VigilError;
    use vigil_core::runner::FaultPolicy;
    use vigil_report::render;

    use super::{daily_verification, report_file_name};
    use crate::{
        config::VigilConfig,
        mock_data,
        records::Event,
        rules::{appointments::STATUS_RULE, events::{INVITE_ONLY_RULE, PREFIX_RULE}},
    };

    #[test]
    fn mock_day_breaks_every_daily_rule() {
        let events = mock_data::events().unwrap();
        let appts = mock_data::appointments().unwrap();
        let now = mock_data::mock_now().unwrap();

        let (results, report) =
            daily_verification(&events, &appts, now, &VigilConfig::default()).unwrap();

        let rules: Vec<&str> = results.iter().map(|r| r.rule()).collect();
        assert_eq!(rules, vec![PREFIX_RULE, INVITE_ONLY_RULE, STATUS_RULE]);
        assert!(!report.has_verified());
        assert_eq!(report.broken_count(), 3);

        let expected = "\
================== Verification Report ===================

Rules broken:

    Events are prefixed correctly if they are owned by a career center
        Event 100002 (Cary: Drop-in Mondays) should have prefix \"Carey:\"
        Event 100007 (Canceled Nursing: Job Talk) should have prefix \"CANCELLED: Nursing:\"
    Events are invite-only if and only if they are not University-Wide or external
        Event 100003 (University-Wide: Fall Career Fair) should not be invite-only
        Event 100004 (SAIS DC: Alumni Panel) should be invite-only
    No past appointments are marked as \"approved\", \"requested\", or \"started\"
        Appointment 200001 (Alex Vanderbildt, 2019-09-20 15:30:00) has status \"approved\"
        Appointment 200003 (Jess Walker, 2019-09-30 13:00:00) has status \"started\"

================== 0 verified, 3 broken ==================";
        assert_eq!(render(&report), expected);
    }

    #[test]
    fn empty_day_verifies_everything() {
        let now = mock_data::mock_now().unwrap();
        let (results, report) = daily_verification(&[], &[], now, &VigilConfig::default()).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(report.verified_count(), 3);
        assert!(!report.has_broken());
    }

    #[test]
    fn parallel_run_matches_sequential() {
        let events = mock_data::events().unwrap();
        let appts = mock_data::appointments().unwrap();
        let now = mock_data::mock_now().unwrap();

        let mut config = VigilConfig::default();
        let (sequential, _) = daily_verification(&events, &appts, now, &config).unwrap();
        config.runner.parallel = true;
        let (parallel, _) = daily_verification(&events, &appts, now, &config).unwrap();
        assert_eq!(sequential, parallel, "parallel runs must keep rule order");
    }

    #[test]
    fn unknown_center_aborts_or_isolates() {
        let events = vec![Event {
            start_date_time: "2019-10-05 10:00:00".to_string(),
            is_invite_only: true,
            ..Event::new("1", "Mystery: Fair", Some("Unknown Center"))
        }];
        let now = mock_data::mock_now().unwrap();

        let mut config = VigilConfig::default();
        let err = daily_verification(&events, &[], now, &config).unwrap_err();
        assert!(matches!(err, VigilError::PredicateFault { .. }));

        config.runner.on_fault = FaultPolicy::Isolate;
        let (results, report) = daily_verification(&events, &[], now, &config).unwrap();
        assert!(!results[0].is_verified());
        assert!(results[0].errors()[0]
            .message
            .starts_with("rule could not be evaluated: "));
        assert_eq!(report.verified_count(), 2);
    }

    #[test]
    fn report_file_is_datestamped() {
        let date = NaiveDate::from_ymd_opt(2019, 10, 1).unwrap();
        assert_eq!(
            report_file_name(date),
            "daily_rule_verification_results_2019-10-01.txt"
        );
    }
}
