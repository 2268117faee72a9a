//! CSV Export functionality
//!
//! Flattens a report into rows sharing one header:
//! `section,key,label,amount,count,percentage,budget,budget_used_percent,remaining,status`.
//! Budget columns are only filled for project rows.

use std::io::Write;

use serde::Serialize;

use crate::error::LedgerResult;
use crate::models::Money;
use crate::reports::{Breakdown, ExpenseReport, ProjectBreakdown, SeriesPoint};

/// One exported CSV line
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CsvRow {
    pub section: String,
    pub key: String,
    pub label: String,
    pub amount: Option<String>,
    pub count: Option<usize>,
    pub percentage: Option<String>,
    pub budget: Option<String>,
    pub budget_used_percent: Option<String>,
    pub remaining: Option<String>,
    pub status: Option<String>,
}

fn amount(value: Money) -> String {
    format!("{:.2}", value.as_units_f64())
}

fn percent(value: f64) -> String {
    format!("{:.2}", value)
}

fn summary_rows(report: &ExpenseReport) -> Vec<CsvRow> {
    let range = format!("{} to {}", report.filters.start, report.filters.end);
    let previous = &report.previous_period;
    vec![
        CsvRow {
            section: "summary".into(),
            key: "total".into(),
            label: range.clone(),
            amount: Some(amount(report.total_amount)),
            count: Some(report.entry_count),
            ..Default::default()
        },
        CsvRow {
            section: "summary".into(),
            key: "average".into(),
            label: range,
            amount: Some(amount(report.average_amount)),
            ..Default::default()
        },
        CsvRow {
            section: "summary".into(),
            key: "previous_total".into(),
            label: format!(
                "{} to {} (exclusive)",
                previous.previous_start, previous.previous_end_exclusive
            ),
            amount: Some(amount(previous.previous_total)),
            ..Default::default()
        },
        CsvRow {
            section: "summary".into(),
            key: "growth".into(),
            label: "growth vs previous period".into(),
            percentage: report.growth_rate_percent.map(percent),
            ..Default::default()
        },
        CsvRow {
            section: "summary".into(),
            key: "skipped".into(),
            label: "skipped records".into(),
            count: Some(report.skipped_records),
            ..Default::default()
        },
    ]
}

fn breakdown_row(section: &str, entry: &Breakdown) -> CsvRow {
    CsvRow {
        section: section.to_string(),
        key: entry.key.id_string(),
        label: entry.label.clone(),
        amount: Some(amount(entry.value)),
        count: Some(entry.count),
        percentage: Some(percent(entry.percentage)),
        ..Default::default()
    }
}

fn project_row(entry: &ProjectBreakdown) -> CsvRow {
    CsvRow {
        section: "project".into(),
        key: entry.project_id.as_uuid().to_string(),
        label: entry.label.clone(),
        amount: Some(amount(entry.value)),
        count: Some(entry.count),
        percentage: Some(percent(entry.percentage)),
        budget: Some(amount(entry.budget)),
        budget_used_percent: Some(percent(entry.budget_used_percent)),
        remaining: Some(amount(entry.remaining)),
        status: Some(entry.status.label().to_string()),
    }
}

fn series_row(section: &str, point: &SeriesPoint) -> CsvRow {
    CsvRow {
        section: section.to_string(),
        key: point.period_start.format("%Y-%m-%d").to_string(),
        label: point.label.clone(),
        amount: Some(amount(point.amount)),
        count: Some(point.count),
        ..Default::default()
    }
}

/// Every row of the report in export order
pub fn report_rows(report: &ExpenseReport) -> Vec<CsvRow> {
    let mut rows = summary_rows(report);
    rows.extend(report.by_category.iter().map(|e| breakdown_row("category", e)));
    rows.extend(report.by_project.iter().map(project_row));
    rows.extend(report.by_payment_mode.iter().map(|e| breakdown_row("payment_mode", e)));
    rows.extend(report.by_payer.iter().map(|e| breakdown_row("payer", e)));
    rows.extend(report.daily_series.iter().map(|p| series_row("daily", p)));
    rows.extend(report.monthly_series.iter().map(|p| series_row("monthly", p)));
    rows
}

/// Write the report as CSV
pub fn export_report_csv<W: Write>(report: &ExpenseReport, writer: W) -> LedgerResult<()> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    for row in report_rows(report) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
