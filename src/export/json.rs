//! JSON Export functionality
//!
//! Wraps a report in a versioned envelope so consumers can detect format
//! changes.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::LedgerResult;
use crate::reports::{BudgetEvaluation, ExpenseReport};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Versioned report export
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    pub report: &'a ExpenseReport,
}

impl<'a> ReportExport<'a> {
    pub fn new(report: &'a ExpenseReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            report,
        }
    }
}

/// Export a report to JSON
pub fn export_report_json<W: Write>(
    report: &ExpenseReport,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    let export = ReportExport::new(report);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)?;
    } else {
        serde_json::to_writer(&mut *writer, &export)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Export a budget overview to JSON
pub fn export_budget_json<W: Write>(
    evaluations: &[BudgetEvaluation],
    writer: &mut W,
) -> LedgerResult<()> {
    serde_json::to_writer_pretty(&mut *writer, evaluations)?;
    writeln!(writer)?;
    Ok(())
}
