//! Expense analytics
//!
//! Everything here is a pure function of a record snapshot, reference data
//! and a [`ReportFilters`] value. The pieces compose into [`ExpenseReport`]:
//! the filter engine selects the working subset, then breakdowns, time series,
//! the period comparison and budget figures are computed from it independently.

pub mod breakdown;
pub mod budget;
pub mod cache;
pub mod expense_report;
pub mod filters;
pub mod period;
pub mod reference;
pub mod series;

#[cfg(test)]
pub(crate) mod test_support;

pub use breakdown::{aggregate, aggregate_projects, Breakdown, BreakdownKey, Dimension, ProjectBreakdown};
pub use budget::{budget_overview, evaluate, BudgetEvaluation, BudgetStatus};
pub use cache::ReportCache;
pub use expense_report::ExpenseReport;
pub use filters::{filter_expenses, ComparisonBasis, FilterOutcome, ReportFilters};
pub use period::{compare_periods, growth_rate, PeriodComparison};
pub use reference::ReferenceData;
pub use series::{daily_series, monthly_series, SeriesPoint};
