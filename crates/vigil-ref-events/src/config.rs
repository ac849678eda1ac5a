//! Configuration for the reference rule set and the tools that run it.
//!
//! A `VigilConfig` is deserialized from TOML.  Every table is optional; the
//! built-in defaults mirror `config/default.toml`.
//!
//! ```toml
//! [runner]
//! on_fault = "isolate"
//!
//! [rules.career_centers]
//! "Peabody Institute" = ["Peabody:"]
//!
//! [output]
//! dir = "reports"
//! export_errors = true
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use vigil_contracts::error::{VigilError, VigilResult};
use vigil_core::runner::RunnerConfig;

/// The configuration file shipped with the crate.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Constants the reference rules read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSetConfig {
    /// chrono format string for `start_date_time` columns.
    pub timestamp_format: String,
    pub university_wide_prefix: String,
    pub cancelled_prefix: String,
    pub test_prefix: String,

    /// Career center whose "office hours" events are advertisements.
    pub advertisement_center: String,
    pub advertisement_label: String,
    pub advertisement_event_type: String,
    pub virtual_session_event_type: String,

    /// Appointment statuses that must not remain on past appointments.
    pub incomplete_statuses: Vec<String>,

    /// Career center name to the event-name prefixes it may use, in the
    /// order they are listed in error messages.
    pub career_centers: IndexMap<String, Vec<String>>,
}

impl Default for RuleSetConfig {
    fn default() -> Self {
        let centers: [(&str, &[&str]); 8] = [
            ("Life Design Lab (Homewood)", &["Homewood:"]),
            ("Carey Business School", &["Carey:"]),
            ("SAIS", &["SAIS:", "SAIS DC:", "SAIS Europe:", "HNC:", "SAIS ALL:"]),
            ("Professional Development and Career Office", &["PDCO:"]),
            ("School of Nursing", &["Nursing:"]),
            ("Bloomberg School of Public Health", &["BSPH:"]),
            ("Peabody Institute", &["Peabody:"]),
            ("Advanced Academic Programs", &["AAP:"]),
        ];
        Self {
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            university_wide_prefix: "University-Wide:".to_string(),
            cancelled_prefix: "CANCELLED:".to_string(),
            test_prefix: "Test:".to_string(),
            advertisement_center: "Life Design Lab (Homewood)".to_string(),
            advertisement_label: "shared: advertisement".to_string(),
            advertisement_event_type: "Other".to_string(),
            virtual_session_event_type: "Virtual Session".to_string(),
            incomplete_statuses: ["approved", "requested", "started"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            career_centers: centers
                .iter()
                .map(|(center, prefixes)| {
                    (
                        center.to_string(),
                        prefixes.iter().map(|p| p.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl RuleSetConfig {
    /// Reject configurations the rules cannot work with.
    pub fn validate(&self) -> VigilResult<()> {
        if self.timestamp_format.trim().is_empty() {
            return Err(VigilError::ConfigError {
                reason: "rules.timestamp_format must not be empty".to_string(),
            });
        }
        if self.cancelled_prefix.trim().is_empty() {
            return Err(VigilError::ConfigError {
                reason: "rules.cancelled_prefix must not be empty".to_string(),
            });
        }
        for (center, prefixes) in &self.career_centers {
            if prefixes.is_empty() {
                return Err(VigilError::ConfigError {
                    reason: format!("career center '{}' has no valid prefixes", center),
                });
            }
        }
        Ok(())
    }

    /// Valid prefixes for `center`, or `None` when it is not configured.
    pub fn prefixes_for(&self, center: &str) -> Option<&[String]> {
        self.career_centers.get(center).map(Vec::as_slice)
    }
}

/// Where tools write their reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Also write one CSV per broken rule.
    pub export_errors: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            export_errors: false,
        }
    }
}

/// The top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VigilConfig {
    pub runner: RunnerConfig,
    pub rules: RuleSetConfig,
    pub output: OutputConfig,
}

impl VigilConfig {
    /// Parse `s` as TOML and validate it.
    ///
    /// Returns `VigilError::ConfigError` if the TOML is malformed, does not
    /// match the expected schema, or fails validation.
    pub fn from_toml_str(s: &str) -> VigilResult<Self> {
        let config: VigilConfig = toml::from_str(s).map_err(|e| VigilError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })?;
        config.rules.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as vigil configuration.
    pub fn from_file(path: &Path) -> VigilResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| VigilError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
