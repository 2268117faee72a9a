//! Expense Report
//!
//! Composes the filter engine, breakdowns, series, period comparison and
//! budget figures into one immutable report.

use serde::Serialize;

use crate::display::report::{
    double_separator, format_breakdown_table, format_growth, format_project_table,
    format_series_table, separator,
};
use crate::error::LedgerResult;
use crate::models::{Expense, Money};
use crate::storage::ExpenseSource;

use super::breakdown::{aggregate, aggregate_projects, Breakdown, Dimension, ProjectBreakdown};
use super::filters::{filter_expenses, ReportFilters};
use super::period::{compare_periods, previous_length_days, PeriodComparison};
use super::reference::ReferenceData;
use super::series::{daily_series, monthly_series, SeriesPoint};

/// Full analytics for one filter over one data snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseReport {
    /// Filters the report was generated with
    pub filters: ReportFilters,
    pub total_amount: Money,
    pub entry_count: usize,
    /// Mean amount rounded to the nearest cent, 0 for an empty report
    pub average_amount: Money,
    /// Change against the previous period, None when there is nothing to compare
    pub growth_rate_percent: Option<f64>,
    pub previous_period: PeriodComparison,
    pub by_category: Vec<Breakdown>,
    pub by_project: Vec<ProjectBreakdown>,
    pub by_payment_mode: Vec<Breakdown>,
    pub by_payer: Vec<Breakdown>,
    pub daily_series: Vec<SeriesPoint>,
    pub monthly_series: Vec<SeriesPoint>,
    /// Records left out because they could not be decoded or failed validation
    pub skipped_records: usize,
}

impl ExpenseReport {
    /// Generate a report from a data source
    ///
    /// Filters are validated before the source is read.
    pub fn generate<S: ExpenseSource + ?Sized>(
        source: &S,
        filters: &ReportFilters,
    ) -> LedgerResult<Self> {
        filters.validate()?;

        let expenses = source.expenses()?;
        let reference = ReferenceData::from_source(source)?;
        Self::from_parts(&expenses, &reference, filters, source.malformed_count()?)
    }

    /// Generate a report from already loaded records and reference data
    ///
    /// `malformed` is the number of records the caller dropped while decoding.
    pub fn from_parts(
        expenses: &[Expense],
        reference: &ReferenceData,
        filters: &ReportFilters,
        malformed: usize,
    ) -> LedgerResult<Self> {
        let outcome = filter_expenses(expenses, filters)?;
        let subset = outcome.matched;

        let total_amount: Money = subset.iter().map(|e| e.amount).sum();
        let entry_count = subset.len();
        let previous_period = compare_periods(&subset, expenses, filters);

        tracing::debug!(
            start = %filters.start,
            end = %filters.end,
            entries = entry_count,
            total = %total_amount,
            "generating expense report"
        );

        Ok(Self {
            filters: filters.clone(),
            total_amount,
            entry_count,
            average_amount: total_amount.average_over(entry_count),
            growth_rate_percent: previous_period.growth_rate_percent,
            previous_period,
            by_category: aggregate(&subset, Dimension::Category, reference),
            by_project: aggregate_projects(&subset, reference),
            by_payment_mode: aggregate(&subset, Dimension::PaymentMode, reference),
            by_payer: aggregate(&subset, Dimension::Payer, reference),
            daily_series: daily_series(&subset, filters.start, filters.end),
            monthly_series: monthly_series(&subset),
            skipped_records: malformed + outcome.skipped,
        })
    }

    /// Whether any expense matched the filters
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// The `n` largest categories
    pub fn top_categories(&self, n: usize) -> &[Breakdown] {
        &self.by_category[..n.min(self.by_category.len())]
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Expense Report: {} to {}\n",
            self.filters.start, self.filters.end
        ));
        output.push_str(&double_separator(72));
        output.push('\n');
        output.push_str(&format!(
            "Total Spent:   {}\n",
            self.total_amount.format_with_symbol(symbol)
        ));
        output.push_str(&format!("Entries:       {}\n", self.entry_count));
        output.push_str(&format!(
            "Average:       {}\n",
            self.average_amount.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Previous {} days: {} ({})\n",
            previous_length_days(&self.filters),
            self.previous_period.previous_total.format_with_symbol(symbol),
            format_growth(self.growth_rate_percent)
        ));
        if self.skipped_records > 0 {
            output.push_str(&format!(
                "Skipped:       {} record(s) could not be used\n",
                self.skipped_records
            ));
        }

        let sections: [(&str, String); 5] = [
            ("BY CATEGORY", format_breakdown_table(&self.by_category, symbol)),
            ("BY PROJECT", format_project_table(&self.by_project, symbol)),
            (
                "BY PAYMENT MODE",
                format_breakdown_table(&self.by_payment_mode, symbol),
            ),
            ("BY PAYER", format_breakdown_table(&self.by_payer, symbol)),
            ("BY MONTH", format_series_table(&self.monthly_series, symbol)),
        ];

        for (title, table) in sections {
            output.push('\n');
            output.push_str(title);
            output.push('\n');
            output.push_str(&separator(72));
            output.push('\n');
            output.push_str(&table);
            if !table.ends_with('\n') {
                output.push('\n');
            }
        }

        output
    }
}
