//! Report export
//!
//! Serializes an [`ExpenseReport`](crate::reports::ExpenseReport) for use
//! outside the terminal:
//! - CSV: one flat row per breakdown entry and series point (spreadsheet-compatible)
//! - JSON: the full report inside a versioned envelope
//! - YAML: the same envelope, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_report_csv, CsvRow};
pub use json::{export_budget_json, export_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;
