//! CLI command handlers
//!
//! Bridges clap argument parsing with the reporting layer.

pub mod budget;
pub mod report;

pub use budget::{handle_budget_command, BudgetArgs, BudgetFormat};
pub use report::{build_filters, handle_report_command, OutputFormat, ReportArgs};
