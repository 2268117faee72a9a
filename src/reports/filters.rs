//! Report filters and the filter engine
//!
//! A record passes when it is not soft-deleted, its date and amount fall in the
//! inclusive ranges, and each non-empty selection set contains its value.
//! Dimensions combine with AND; a selection set is an OR over its members.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryId, Expense, Money, PaymentMode, Payer, ProjectId};

/// Which records make up the previous period in a growth comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonBasis {
    /// Previous date window only; project, category, payment and amount
    /// selections are not applied
    #[default]
    DateWindow,
    /// Previous date window with every other filter dimension applied
    SameFilters,
}

/// Multi-dimensional report filter
///
/// Sets are ordered so two equal filters always hash the same, which lets a
/// filter key the report cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportFilters {
    /// First day of the report (inclusive)
    pub start: NaiveDate,
    /// Last day of the report (inclusive)
    pub end: NaiveDate,
    /// Empty means every project
    #[serde(default)]
    pub projects: BTreeSet<ProjectId>,
    #[serde(default)]
    pub categories: BTreeSet<CategoryId>,
    #[serde(default)]
    pub payment_modes: BTreeSet<PaymentMode>,
    #[serde(default)]
    pub payers: BTreeSet<Payer>,
    /// Smallest amount included (inclusive)
    pub min_amount: Money,
    /// Largest amount included (inclusive)
    pub max_amount: Money,
    #[serde(default)]
    pub comparison: ComparisonBasis,
}

impl ReportFilters {
    /// Filter covering `[start, end]` with every other dimension open
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            projects: BTreeSet::new(),
            categories: BTreeSet::new(),
            payment_modes: BTreeSet::new(),
            payers: BTreeSet::new(),
            min_amount: Money::zero(),
            max_amount: Money::MAX,
            comparison: ComparisonBasis::default(),
        }
    }

    pub fn with_projects(mut self, ids: impl IntoIterator<Item = ProjectId>) -> Self {
        self.projects.extend(ids);
        self
    }

    pub fn with_categories(mut self, ids: impl IntoIterator<Item = CategoryId>) -> Self {
        self.categories.extend(ids);
        self
    }

    pub fn with_payment_modes(mut self, modes: impl IntoIterator<Item = PaymentMode>) -> Self {
        self.payment_modes.extend(modes);
        self
    }

    pub fn with_payers(mut self, payers: impl IntoIterator<Item = Payer>) -> Self {
        self.payers.extend(payers);
        self
    }

    pub fn with_amount_range(mut self, min: Money, max: Money) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    pub fn with_comparison(mut self, basis: ComparisonBasis) -> Self {
        self.comparison = basis;
        self
    }

    /// Reject inverted date or amount ranges
    pub fn validate(&self) -> LedgerResult<()> {
        if self.start > self.end {
            return Err(LedgerError::InvalidDateRange {
                start: self.start,
                end: self.end,
            });
        }
        if self.min_amount > self.max_amount {
            return Err(LedgerError::InvalidAmountRange {
                min: self.min_amount,
                max: self.max_amount,
            });
        }
        Ok(())
    }

    /// Number of calendar days in the range
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every predicate except the date range
    pub fn matches_dimensions(&self, expense: &Expense) -> bool {
        self.min_amount <= expense.amount
            && expense.amount <= self.max_amount
            && selected(&self.projects, &expense.project_id)
            && selected(&self.categories, &expense.category_id)
            && selected(&self.payment_modes, &expense.payment_mode)
            && selected(&self.payers, &expense.paid_by)
    }

    /// Full predicate for an active expense
    pub fn matches(&self, expense: &Expense) -> bool {
        expense.is_active() && self.contains_date(expense.date) && self.matches_dimensions(expense)
    }
}

fn selected<T: Ord>(selection: &BTreeSet<T>, value: &T) -> bool {
    selection.is_empty() || selection.contains(value)
}

/// Whether a record may take part in any computation
///
/// Soft-deleted records and records that fail validation never do.
pub fn is_reportable(expense: &Expense) -> bool {
    expense.is_active() && expense.validate().is_ok()
}

/// Result of running the filter engine
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome<'a> {
    /// Matching records in input order
    pub matched: Vec<&'a Expense>,
    /// Active records skipped because they failed validation
    pub skipped: usize,
}

/// Run the filter engine over a record collection
///
/// The filters are validated first; an invalid filter does no work.
pub fn filter_expenses<'a>(
    records: &'a [Expense],
    filters: &ReportFilters,
) -> LedgerResult<FilterOutcome<'a>> {
    filters.validate()?;

    let mut outcome = FilterOutcome::default();
    for expense in records.iter().filter(|e| e.is_active()) {
        if let Err(e) = expense.validate() {
            tracing::warn!(expense = %expense.id, error = %e, "skipping invalid expense");
            outcome.skipped += 1;
            continue;
        }
        if filters.matches(expense) {
            outcome.matched.push(expense);
        }
    }

    tracing::debug!(
        input = records.len(),
        matched = outcome.matched.len(),
        skipped = outcome.skipped,
        "filtered expenses"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::{date, Fixture};

    #[test]
    fn test_inverted_ranges_rejected_before_filtering() {
        let fx = Fixture::new();
        let records = vec![fx.expense(&fx.tower, &fx.labour, 10, date(2024, 1, 5))];

        let filters = ReportFilters::new(date(2024, 2, 1), date(2024, 1, 1));
        let err = filter_expenses(&records, &filters).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDateRange { .. }));

        let filters = ReportFilters::new(date(2024, 1, 1), date(2024, 1, 31))
            .with_amount_range(Money::from_units(100), Money::from_units(1));
        let err = filter_expenses(&records, &filters).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmountRange { .. }));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let fx = Fixture::new();
        let records = vec![
            fx.expense(&fx.tower, &fx.labour, 1, date(2023, 12, 31)),
            fx.expense(&fx.tower, &fx.labour, 2, date(2024, 1, 1)),
            fx.expense(&fx.tower, &fx.labour, 3, date(2024, 1, 31)),
            fx.expense(&fx.tower, &fx.labour, 4, date(2024, 2, 1)),
        ];
        let filters = ReportFilters::new(date(2024, 1, 1), date(2024, 1, 31));

        let outcome = filter_expenses(&records, &filters).unwrap();
        let amounts: Vec<_> = outcome.matched.iter().map(|e| e.amount.units()).collect();
        assert_eq!(amounts, vec![2, 3]);
    }

    #[test]
    fn test_soft_deleted_records_never_match() {
        let fx = Fixture::new();
        let records = vec![
            fx.expense(&fx.tower, &fx.labour, 10, date(2024, 1, 5)).deleted(),
            fx.expense(&fx.tower, &fx.labour, 20, date(2024, 1, 5)),
        ];
        let filters = ReportFilters::new(date(2024, 1, 1), date(2024, 1, 31));

        let outcome = filter_expenses(&records, &filters).unwrap();
        assert_eq!(outcome.matched.len(), 1);
        assert_eq!(outcome.matched[0].amount, Money::from_units(20));
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_dimensions_and_together_sets_or_within() {
        let fx = Fixture::new();
        let records = vec![
            fx.expense(&fx.tower, &fx.labour, 10, date(2024, 1, 5))
                .with_payment_mode(PaymentMode::Cash),
            fx.expense(&fx.tower, &fx.materials, 20, date(2024, 1, 5))
                .with_payment_mode(PaymentMode::Upi),
            fx.expense(&fx.tower, &fx.transport, 30, date(2024, 1, 5))
                .with_payment_mode(PaymentMode::Cash),
            fx.expense(&fx.depot, &fx.labour, 40, date(2024, 1, 5))
                .with_payment_mode(PaymentMode::Cash),
        ];
        let filters = ReportFilters::new(date(2024, 1, 1), date(2024, 1, 31))
            .with_projects([fx.tower.id])
            .with_categories([fx.labour.id, fx.materials.id])
            .with_payment_modes([PaymentMode::Cash, PaymentMode::Upi]);

        let outcome = filter_expenses(&records, &filters).unwrap();
        let amounts: Vec<_> = outcome.matched.iter().map(|e| e.amount.units()).collect();
        assert_eq!(amounts, vec![10, 20]);
    }

    #[test]
    fn test_amount_range_and_payer() {
        let fx = Fixture::new();
        let records = vec![
            fx.expense(&fx.tower, &fx.labour, 99, date(2024, 1, 5)),
            fx.expense(&fx.tower, &fx.labour, 100, date(2024, 1, 5)),
            fx.expense(&fx.tower, &fx.labour, 500, date(2024, 1, 5))
                .with_payer(Payer::Contractor),
            fx.expense(&fx.tower, &fx.labour, 501, date(2024, 1, 5)),
        ];
        let filters = ReportFilters::new(date(2024, 1, 1), date(2024, 1, 31))
            .with_amount_range(Money::from_units(100), Money::from_units(500));
        let outcome = filter_expenses(&records, &filters).unwrap();
        assert_eq!(outcome.matched.len(), 2);

        let filters = filters.with_payers([Payer::Contractor]);
        let outcome = filter_expenses(&records, &filters).unwrap();
        assert_eq!(outcome.matched.len(), 1);
        assert_eq!(outcome.matched[0].paid_by, Payer::Contractor);
    }

    #[test]
    fn test_negative_amounts_skipped_and_counted() {
        let fx = Fixture::new();
        let mut bad = fx.expense(&fx.tower, &fx.labour, 0, date(2024, 1, 5));
        bad.amount = Money::from_cents(-100);
        let records = vec![bad, fx.expense(&fx.tower, &fx.labour, 5, date(2024, 1, 5))];
        let filters = ReportFilters::new(date(2024, 1, 1), date(2024, 1, 31));

        let outcome = filter_expenses(&records, &filters).unwrap();
        assert_eq!(outcome.matched.len(), 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_subset_property() {
        let fx = Fixture::new();
        let records: Vec<_> = (0..40)
            .map(|i| {
                let project = if i % 3 == 0 { &fx.depot } else { &fx.tower };
                let category = if i % 2 == 0 { &fx.labour } else { &fx.materials };
                fx.expense(project, category, i * 7, date(2024, 1, 1) + chrono::Duration::days(i))
            })
            .collect();
        let filters = ReportFilters::new(date(2024, 1, 10), date(2024, 1, 30))
            .with_projects([fx.tower.id])
            .with_amount_range(Money::from_units(50), Money::from_units(200));

        let outcome = filter_expenses(&records, &filters).unwrap();
        assert!(!outcome.matched.is_empty());
        for expense in &outcome.matched {
            assert!(records.iter().any(|r| r.id == expense.id));
            assert!(filters.matches(expense));
        }
        let expected = records.iter().filter(|r| filters.matches(r)).count();
        assert_eq!(outcome.matched.len(), expected);
    }

    #[test]
    fn test_filters_serialize_with_snake_case_basis() {
        let filters = ReportFilters::new(date(2024, 1, 1), date(2024, 1, 31))
            .with_comparison(ComparisonBasis::SameFilters);
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["comparison"], "same_filters");
        assert_eq!(json["start"], "2024-01-01");
        assert_eq!(filters.day_count(), 31);
    }
}
