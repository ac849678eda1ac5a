//! Fixed-format plain-text rendering of a `VerificationReport`.
//!
//! Downstream consumers compare this output byte for byte.  Layout:
//!
//! ```text
//! ================== Verification Report ===================
//!
//! Rules verified:
//!
//!     <rule>
//!
//! Rules broken:
//!
//!     <rule>
//!         <error message>
//!
//! ================== <N> verified, <M> broken ==================
//! ```
//!
//! Each section is omitted when its partition is empty.  The footer is always
//! present and has no trailing newline.

use std::fmt;

use crate::report::VerificationReport;

const HEADER: &str = "================== Verification Report ===================";
const RULE_INDENT: &str = "    ";
const ERROR_INDENT: &str = "        ";

/// Render `report` to its text form.
pub fn render(report: &VerificationReport) -> String {
    report.to_string()
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;

        if self.has_verified() {
            write!(f, "\nRules verified:\n\n")?;
            for rule in self.verified() {
                writeln!(f, "{RULE_INDENT}{rule}")?;
            }
        }

        if self.has_broken() {
            write!(f, "\nRules broken:\n\n")?;
            for (rule, errors) in self.broken() {
                writeln!(f, "{RULE_INDENT}{rule}")?;
                for error in errors {
                    writeln!(f, "{ERROR_INDENT}{error}")?;
                }
            }
        }

        write!(
            f,
            "\n================== {} verified, {} broken ==================",
            self.verified_count(),
            self.broken_count()
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
