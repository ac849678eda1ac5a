//! Typed event and appointment records.
//!
//! Field names on the wire are the column keys of the analytics export the
//! records come from (`events.id`, `appointments.status`, ...).  Columns a
//! given export may leave out default to empty values so that rules which do
//! not read them still run.

use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use vigil_contracts::error::{VigilError, VigilResult};

/// One scheduled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "events.id")]
    pub id: String,

    #[serde(rename = "events.name")]
    pub name: String,

    /// Owning career center.  `None` (or empty) for external events.
    #[serde(rename = "career_center_on_events.name", default)]
    pub career_center: Option<String>,

    #[serde(rename = "events.start_date_time", default)]
    pub start_date_time: String,

    /// Exported as `"Yes"` or `"No"`.
    #[serde(rename = "events.is_invite_only", default, with = "yes_no")]
    pub is_invite_only: bool,

    #[serde(rename = "event_type_on_events.name", default)]
    pub event_type: String,

    #[serde(rename = "events.labels_list", default)]
    pub labels: Vec<String>,
}

impl Event {
    /// Minimal event, as most rule fixtures need.
    pub fn new(id: impl Into<String>, name: impl Into<String>, career_center: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            career_center: career_center.map(str::to_string),
            start_date_time: String::new(),
            is_invite_only: false,
            event_type: String::new(),
            labels: Vec::new(),
        }
    }

    /// The owning career center, treating an empty name as external.
    pub fn owning_center(&self) -> Option<&str> {
        self.career_center.as_deref().filter(|c| !c.trim().is_empty())
    }

    pub fn invite_only(&self) -> bool {
        self.is_invite_only
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// One advising appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "appointments.id")]
    pub id: String,

    #[serde(rename = "appointments.start_date_time")]
    pub start_date_time: String,

    #[serde(rename = "appointments.status")]
    pub status: String,

    #[serde(rename = "appointment_type_on_appointments.name", default)]
    pub appointment_type: Option<String>,

    #[serde(rename = "staff_member_on_appointments.first_name", default)]
    pub staff_first_name: String,

    #[serde(rename = "staff_member_on_appointments.last_name", default)]
    pub staff_last_name: String,
}

impl Appointment {
    /// Staff member's display name, whitespace-trimmed.
    pub fn staff_name(&self) -> String {
        format!(
            "{} {}",
            self.staff_first_name.trim(),
            self.staff_last_name.trim()
        )
    }
}

/// `"Yes"` / `"No"` flags.  An empty cell reads as `"No"`.
mod yes_no {
    use serde::{
        de::{self, Unexpected},
        Deserialize, Deserializer, Serializer,
    };

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "Yes" } else { "No" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "Yes" => Ok(true),
            "No" | "" => Ok(false),
            other => Err(de::Error::invalid_value(
                Unexpected::Str(other),
                &"\"Yes\" or \"No\"",
            )),
        }
    }
}

/// Parse a JSON array of records.
pub fn records_from_json<T: DeserializeOwned>(s: &str) -> VigilResult<Vec<T>> {
    serde_json::from_str(s).map_err(|e| VigilError::DataSource {
        reason: format!("failed to parse records: {}", e),
    })
}

/// Convert an in-memory JSON array of records.
pub fn records_from_value<T: DeserializeOwned>(value: serde_json::Value) -> VigilResult<Vec<T>> {
    serde_json::from_value(value).map_err(|e| VigilError::DataSource {
        reason: format!("failed to convert records: {}", e),
    })
}

/// Read and parse a JSON file holding an array of records.
pub fn records_from_file<T: DeserializeOwned>(path: &Path) -> VigilResult<Vec<T>> {
    let contents = std::fs::read_to_string(path).map_err(|e| VigilError::DataSource {
        reason: format!("failed to read records file '{}': {}", path.display(), e),
    })?;
    records_from_json(&contents)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use vigil_contracts::error::VigilError;

    use super::{records_from_json, Appointment, Event};

    #[test]
    fn event_deserializes_from_export_columns() {
        let value = json!([{
            "events.id": "4324725",
            "events.name": "McKinsey Virtual Session",
            "career_center_on_events.name": null,
            "events.start_date_time": "2019-09-01 12:00:00",
            "events.is_invite_only": "Yes",
            "event_type_on_events.name": "Virtual Session",
            "events.labels_list": ["shared: advertisement"]
        }]);
        let events: Vec<Event> = records_from_json(&value.to_string()).unwrap();
        let event = &events[0];
        assert_eq!(event.id, "4324725");
        assert_eq!(event.owning_center(), None);
        assert!(event.invite_only());
        assert!(event.has_label("shared: advertisement"));
    }

    #[test]
    fn event_optional_columns_default() {
        let value = json!([{ "events.id": "1", "events.name": "Homewood: Fair" }]);
        let events: Vec<Event> = records_from_json(&value.to_string()).unwrap();
        assert_eq!(events[0].career_center, None);
        assert!(events[0].labels.is_empty());
        assert!(!events[0].invite_only());
    }

    #[test]
    fn invite_only_flag_reads_yes_no() {
        let value = json!([
            { "events.id": "1", "events.name": "a", "events.is_invite_only": "Yes" },
            { "events.id": "2", "events.name": "b", "events.is_invite_only": "No" },
            { "events.id": "3", "events.name": "c", "events.is_invite_only": "" }
        ]);
        let events: Vec<Event> = records_from_json(&value.to_string()).unwrap();
        let flags: Vec<bool> = events.iter().map(|e| e.is_invite_only).collect();
        assert_eq!(flags, vec![true, false, false]);

        let back = serde_json::to_value(&events[0]).unwrap();
        assert_eq!(back["events.is_invite_only"], "Yes");
    }

    #[test]
    fn unknown_invite_only_value_is_a_data_source_error() {
        let value = json!([{ "events.id": "1", "events.name": "a", "events.is_invite_only": "Maybe" }]);
        let err = records_from_json::<Event>(&value.to_string()).unwrap_err();
        assert!(matches!(err, VigilError::DataSource { .. }));
        assert!(err.to_string().contains("Maybe"), "got: {err}");
    }

    #[test]
    fn blank_career_center_counts_as_external() {
        let event = Event::new("1", "x", Some("  "));
        assert_eq!(event.owning_center(), None);
    }

    #[test]
    fn appointment_staff_name_is_trimmed() {
        let value = json!([{
            "appointments.id": "6352432",
            "appointments.start_date_time": "2018-05-28 15:30:00",
            "appointments.status": "approved",
            "staff_member_on_appointments.first_name": " Alex ",
            "staff_member_on_appointments.last_name": "Vanderbildt  "
        }]);
        let appts: Vec<Appointment> = records_from_json(&value.to_string()).unwrap();
        assert_eq!(appts[0].staff_name(), "Alex Vanderbildt");
        assert_eq!(appts[0].appointment_type, None);
    }

    #[test]
    fn malformed_json_is_a_data_source_error() {
        let err = records_from_json::<Event>("{ not json").unwrap_err();
        assert!(matches!(err, VigilError::DataSource { .. }));
    }
}
