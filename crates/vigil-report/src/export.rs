//! Tabular export of a broken result's violations.
//!
//! `export_errors` is a thin adapter: it maps each violation of a result to a
//! flat row, one row per violation in order, and knows nothing about files.
//! `render_csv` turns rows into CSV text for sinks that write CSV files.

use indexmap::IndexSet;

use vigil_contracts::{
    error::{VigilError, VigilResult},
    result::VerificationResult,
    violation::{ExportRow, Violation},
};

/// Map every violation of `result` through `mapper`, preserving order.
pub fn export_errors<F>(result: &VerificationResult, mapper: F) -> Vec<ExportRow>
where
    F: FnMut(&Violation) -> ExportRow,
{
    result.errors().iter().map(mapper).collect()
}

/// `export_errors` with the default `Violation::to_row` mapping.
pub fn export_default(result: &VerificationResult) -> Vec<ExportRow> {
    export_errors(result, Violation::to_row)
}

/// Serialize rows as CSV.
///
/// The header is the union of all row columns in first-seen order; cells a
/// row lacks are left empty.  Quoting follows the csv writer's defaults and
/// records end with `\n`.  No rows yields an empty string.
///
/// Returns `VigilError::Sink` if the writer fails.
pub fn render_csv(rows: &[ExportRow]) -> VigilResult<String> {
    let columns: IndexSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();
    if columns.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns.iter().copied()).map_err(csv_error)?;
    for row in rows {
        let cells = columns
            .iter()
            .map(|column| row.get(*column).map(String::as_str).unwrap_or(""));
        writer.write_record(cells).map_err(csv_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| VigilError::Sink {
        reason: format!("failed to flush CSV: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| VigilError::Sink {
        reason: format!("CSV output is not UTF-8: {}", e),
    })
}

fn csv_error(e: csv::Error) -> VigilError {
    VigilError::Sink {
        reason: format!("failed to write CSV record: {}", e),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
