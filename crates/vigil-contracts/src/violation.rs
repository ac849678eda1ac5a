//! The per-record error a rule produces.
//!
//! A `Violation` is the structured form of "this record breaks this rule".
//! It always carries a rendered message; the record identifier and the extra
//! fields exist so that sinks can export violations as table rows without
//! going back to the original records.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One flat, export-ready row: column name to cell value, in column order.
pub type ExportRow = IndexMap<String, String>;

/// A rule violation found for a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Identifier of the offending record.  Empty for message-only violations.
    #[serde(default)]
    pub record_id: String,

    /// Human-readable explanation, shown verbatim in rendered reports.
    pub message: String,

    /// Additional values (timestamps, names, URLs) kept for tabular export.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<String, String>,
}

impl Violation {
    /// Create a violation for the record identified by `record_id`.
    pub fn new(record_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            message: message.into(),
            fields: IndexMap::new(),
        }
    }

    /// Create a violation that carries only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(String::new(), message)
    }

    /// Attach an extra export field.  Setting the same name twice keeps the
    /// original column position and replaces the value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// The default export mapping: `id`, `error_msg`, then every extra field
    /// in insertion order.
    pub fn to_row(&self) -> ExportRow {
        let mut row = ExportRow::with_capacity(self.fields.len() + 2);
        row.insert("id".to_string(), self.record_id.clone());
        row.insert("error_msg".to_string(), self.message.clone());
        for (name, value) in &self.fields {
            row.insert(name.clone(), value.clone());
        }
        row
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&str> for Violation {
    fn from(message: &str) -> Self {
        Violation::message(message)
    }
}

impl From<String> for Violation {
    fn from(message: String) -> Self {
        Violation::message(message)
    }
}
