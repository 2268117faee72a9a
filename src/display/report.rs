//! Report formatting utilities for terminal output
//!
//! Breakdown, series and budget tables are rendered with `tabled`; the small
//! string helpers below are shared by every report.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::reports::{Breakdown, BudgetEvaluation, ProjectBreakdown, SeriesPoint};

/// Width of the share bars drawn next to breakdown rows
pub const BAR_WIDTH: usize = 20;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Format a growth rate with its sign, or "n/a" when undefined
pub fn format_growth(rate: Option<f64>) -> String {
    match rate {
        Some(r) if r > 0.0 => format!("+{:.1}%", r),
        Some(r) => format!("{:.1}%", r),
        None => "n/a".to_string(),
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Table of breakdown entries with a share bar per row
pub fn format_breakdown_table(entries: &[Breakdown], symbol: &str) -> String {
    if entries.is_empty() {
        return "  (no expenses)\n".to_string();
    }

    let max = entries
        .iter()
        .map(|e| e.percentage)
        .fold(0.0_f64, f64::max);

    let rows = entries
        .iter()
        .map(|e| BreakdownRow {
            name: truncate(&e.label, 32),
            amount: e.value.format_with_symbol(symbol),
            count: e.count,
            share: format_percentage(e.percentage),
            bar: format_bar(e.percentage, max, BAR_WIDTH),
        })
        .collect();
    render(rows)
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "Project")]
    name: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Project breakdown with budget columns
pub fn format_project_table(entries: &[ProjectBreakdown], symbol: &str) -> String {
    if entries.is_empty() {
        return "  (no expenses)\n".to_string();
    }

    let rows = entries
        .iter()
        .map(|e| ProjectRow {
            name: truncate(&e.label, 32),
            spent: e.value.format_with_symbol(symbol),
            count: e.count,
            share: format_percentage(e.percentage),
            budget: e.budget.format_with_symbol(symbol),
            used: format_percentage(e.budget_used_percent),
            remaining: e.remaining.format_with_symbol(symbol),
            status: status_cell(e.status),
        })
        .collect();
    render(rows)
}

#[derive(Tabled)]
struct SeriesRow {
    #[tabled(rename = "Period")]
    label: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Count")]
    count: usize,
}

/// Two-column series table
pub fn format_series_table(points: &[SeriesPoint], symbol: &str) -> String {
    if points.is_empty() {
        return "  (no expenses)\n".to_string();
    }

    let rows = points
        .iter()
        .map(|p| SeriesRow {
            label: p.label.clone(),
            amount: p.amount.format_with_symbol(symbol),
            count: p.count,
        })
        .collect();
    render(rows)
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Project")]
    name: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Per-project budget status table
pub fn format_budget_table(evaluations: &[BudgetEvaluation], symbol: &str) -> String {
    if evaluations.is_empty() {
        return "No projects found.\n".to_string();
    }

    let rows = evaluations
        .iter()
        .map(|e| BudgetRow {
            name: truncate(&e.project_name, 32),
            budget: e.budget.format_with_symbol(symbol),
            spent: e.spent.format_with_symbol(symbol),
            remaining: e.remaining.format_with_symbol(symbol),
            used: format_percentage(e.utilization_percent),
            status: status_cell(e.status),
        })
        .collect();
    render(rows)
}

fn status_cell(status: crate::reports::BudgetStatus) -> String {
    if status.needs_attention() {
        format!("{} !", status.label())
    } else {
        status.label().to_string()
    }
}
