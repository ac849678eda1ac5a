//! Simulated analytics exports for demos and tests.
//!
//! All data in this module is hardcoded and fictional.  Timestamps are laid
//! out around [`MOCK_NOW`] so that time-dependent rules behave the same on
//! every run when evaluated against it.

use chrono::NaiveDateTime;
use serde_json::{json, Value};

use vigil_contracts::error::{VigilError, VigilResult};

use crate::records::{records_from_value, Appointment, Event};

/// Reference time the mock datasets are arranged around.
pub const MOCK_NOW: &str = "2019-10-01 09:00:00";

/// [`MOCK_NOW`] parsed.
pub fn mock_now() -> VigilResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(MOCK_NOW, "%Y-%m-%d %H:%M:%S").map_err(|e| {
        VigilError::DataSource {
            reason: format!("invalid mock reference time: {}", e),
        }
    })
}

// ── Events ────────────────────────────────────────────────────────────────────

/// One export of events, as the analytics page would return it.
///
/// Broken against [`MOCK_NOW`]:
/// - 100002, 100007: wrong prefix
/// - 100003: university-wide but invite-only
/// - 100004: career-center event that is not invite-only
/// - 100008: office-hours advertisement missing its label and type
/// - 100009: past event still typed as a virtual session
pub fn events_json() -> Value {
    json!([
        {
            "events.id": "100001",
            "events.name": "Homewood: Resume Workshop",
            "career_center_on_events.name": "Life Design Lab (Homewood)",
            "events.start_date_time": "2019-10-15 12:00:00",
            "events.is_invite_only": "Yes",
            "event_type_on_events.name": "Workshop",
            "events.labels_list": []
        },
        {
            "events.id": "100002",
            "events.name": "Cary: Drop-in Mondays",
            "career_center_on_events.name": "Carey Business School",
            "events.start_date_time": "2019-10-07 10:00:00",
            "events.is_invite_only": "Yes",
            "event_type_on_events.name": "Drop-in",
            "events.labels_list": []
        },
        {
            "events.id": "100003",
            "events.name": "University-Wide: Fall Career Fair",
            "career_center_on_events.name": "Professional Development and Career Office",
            "events.start_date_time": "2019-10-20 11:00:00",
            "events.is_invite_only": "Yes",
            "event_type_on_events.name": "Career Fair",
            "events.labels_list": []
        },
        {
            "events.id": "100004",
            "events.name": "SAIS DC: Alumni Panel",
            "career_center_on_events.name": "SAIS",
            "events.start_date_time": "2019-10-09 18:00:00",
            "events.is_invite_only": "No",
            "event_type_on_events.name": "Panel",
            "events.labels_list": []
        },
        {
            "events.id": "100005",
            "events.name": "McKinsey Virtual Session",
            "career_center_on_events.name": null,
            "events.start_date_time": "2019-09-10 16:00:00",
            "events.is_invite_only": "No",
            "event_type_on_events.name": "Virtual Session",
            "events.labels_list": []
        },
        {
            "events.id": "100006",
            "events.name": "CANCELLED: Peabody: Gig Fair",
            "career_center_on_events.name": "Peabody Institute",
            "events.start_date_time": "2019-10-03 14:00:00",
            "events.is_invite_only": "Yes",
            "event_type_on_events.name": "Career Fair",
            "events.labels_list": []
        },
        {
            "events.id": "100007",
            "events.name": "Canceled Nursing: Job Talk",
            "career_center_on_events.name": "School of Nursing",
            "events.start_date_time": "2019-10-04 12:00:00",
            "events.is_invite_only": "Yes",
            "event_type_on_events.name": "Info Session",
            "events.labels_list": []
        },
        {
            "events.id": "100008",
            "events.name": "Homewood: Office Hours with Deloitte",
            "career_center_on_events.name": "Life Design Lab (Homewood)",
            "events.start_date_time": "2019-10-10 13:00:00",
            "events.is_invite_only": "Yes",
            "event_type_on_events.name": "Workshop",
            "events.labels_list": []
        },
        {
            "events.id": "100009",
            "events.name": "BSPH: Consulting Webinar",
            "career_center_on_events.name": "Bloomberg School of Public Health",
            "events.start_date_time": "2019-09-12 17:00:00",
            "events.is_invite_only": "Yes",
            "event_type_on_events.name": "Virtual Session",
            "events.labels_list": []
        },
        {
            "events.id": "100010",
            "events.name": "Test: Sandbox Event",
            "career_center_on_events.name": "Advanced Academic Programs",
            "events.start_date_time": "2019-10-11 09:00:00",
            "events.is_invite_only": "Yes",
            "event_type_on_events.name": "Other",
            "events.labels_list": ["shared: test"]
        }
    ])
}

pub fn events() -> VigilResult<Vec<Event>> {
    records_from_value(events_json())
}

// ── Appointments ──────────────────────────────────────────────────────────────

/// One export of appointments.
///
/// Broken against [`MOCK_NOW`]:
/// - 200001, 200003: past but still incomplete
/// - 200005: no appointment type
pub fn appointments_json() -> Value {
    json!([
        {
            "appointments.id": "200001",
            "appointments.start_date_time": "2019-09-20 15:30:00",
            "appointments.status": "approved",
            "appointment_type_on_appointments.name": "Career Advising",
            "staff_member_on_appointments.first_name": "Alex",
            "staff_member_on_appointments.last_name": "Vanderbildt"
        },
        {
            "appointments.id": "200002",
            "appointments.start_date_time": "2019-09-23 10:00:00",
            "appointments.status": "completed",
            "appointment_type_on_appointments.name": "Resume Review",
            "staff_member_on_appointments.first_name": "Mary",
            "staff_member_on_appointments.last_name": "Smith"
        },
        {
            "appointments.id": "200003",
            "appointments.start_date_time": "2019-09-30 13:00:00",
            "appointments.status": "started",
            "appointment_type_on_appointments.name": "Mock Interview",
            "staff_member_on_appointments.first_name": " Jess",
            "staff_member_on_appointments.last_name": "Walker "
        },
        {
            "appointments.id": "200004",
            "appointments.start_date_time": "2019-10-02 09:30:00",
            "appointments.status": "requested",
            "appointment_type_on_appointments.name": "Career Advising",
            "staff_member_on_appointments.first_name": "Ella",
            "staff_member_on_appointments.last_name": "Barns"
        },
        {
            "appointments.id": "200005",
            "appointments.start_date_time": "2019-09-18 11:00:00",
            "appointments.status": "no_show",
            "appointment_type_on_appointments.name": null,
            "staff_member_on_appointments.first_name": "Jack",
            "staff_member_on_appointments.last_name": "Heizer"
        }
    ])
}

pub fn appointments() -> VigilResult<Vec<Appointment>> {
    records_from_value(appointments_json())
}
