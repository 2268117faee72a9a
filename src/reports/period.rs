//! Period-over-period comparison
//!
//! For a report range of length `L = end - start` days, the previous period is
//! `[start - L, start)`. The upper bound is exclusive so `start` is never
//! counted twice. A single-day report therefore has an empty previous period
//! and no growth rate. Near the start of the calendar the window is clamped to
//! `NaiveDate::MIN`.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Expense, Money};

use super::filters::{is_reportable, ComparisonBasis, ReportFilters};

/// Current and previous period totals with the derived growth rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodComparison {
    pub basis: ComparisonBasis,
    pub previous_start: NaiveDate,
    pub previous_end_exclusive: NaiveDate,
    pub previous_total: Money,
    pub current_total: Money,
    /// None when the previous period has nothing to compare against
    pub growth_rate_percent: Option<f64>,
}

/// Bounds of the previous period as `(start, end_exclusive)`
pub fn previous_window(start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
    let length = end - start;
    let previous_start = start.checked_sub_signed(length).unwrap_or(NaiveDate::MIN);
    (previous_start, start)
}

/// Percentage change from `previous` to `current`
///
/// Undefined (None) when the previous total is zero.
pub fn growth_rate(current: Money, previous: Money) -> Option<f64> {
    if previous.is_zero() {
        return None;
    }
    let (current, previous) = (current.cents() as f64, previous.cents() as f64);
    let rate = (current - previous) / previous * 100.0;
    rate.is_finite().then_some(rate)
}

/// Compare the filtered subset against the previous period
///
/// `all_records` is the unfiltered collection; which of its records count
/// toward the previous period depends on `filters.comparison`.
pub fn compare_periods(
    current_subset: &[&Expense],
    all_records: &[Expense],
    filters: &ReportFilters,
) -> PeriodComparison {
    let (previous_start, previous_end_exclusive) = previous_window(filters.start, filters.end);

    let previous_total: Money = all_records
        .iter()
        .filter(|e| is_reportable(e))
        .filter(|e| previous_start <= e.date && e.date < previous_end_exclusive)
        .filter(|e| match filters.comparison {
            ComparisonBasis::DateWindow => true,
            ComparisonBasis::SameFilters => filters.matches_dimensions(e),
        })
        .map(|e| e.amount)
        .sum();

    let current_total: Money = current_subset.iter().map(|e| e.amount).sum();

    PeriodComparison {
        basis: filters.comparison,
        previous_start,
        previous_end_exclusive,
        previous_total,
        current_total,
        growth_rate_percent: growth_rate(current_total, previous_total),
    }
}

/// Length of the previous period in days
pub fn previous_length_days(filters: &ReportFilters) -> i64 {
    let (start, end_exclusive) = previous_window(filters.start, filters.end);
    (end_exclusive - start).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::filters::filter_expenses;
    use crate::reports::test_support::{date, Fixture};

    #[test]
    fn test_previous_window_bounds() {
        let (start, end) = previous_window(date(2024, 1, 11), date(2024, 1, 20));
        assert_eq!(start, date(2024, 1, 2));
        assert_eq!(end, date(2024, 1, 11));

        let (start, end) = previous_window(date(2024, 1, 11), date(2024, 1, 11));
        assert_eq!(start, end);
    }

    #[test]
    fn test_previous_window_clamps_at_calendar_start() {
        let start = NaiveDate::MIN + chrono::Duration::days(1);
        let end = NaiveDate::MIN + chrono::Duration::days(11);
        assert_eq!(previous_window(start, end), (NaiveDate::MIN, start));

        let filters = ReportFilters::new(start, end);
        assert!(filters.validate().is_ok());
        assert_eq!(previous_length_days(&filters), 1);
    }

    #[test]
    fn test_growth_rate_null_safety() {
        assert_eq!(growth_rate(Money::from_units(100), Money::zero()), None);
        assert_eq!(growth_rate(Money::zero(), Money::zero()), None);
        assert_eq!(growth_rate(Money::from_units(50), Money::from_units(50)), Some(0.0));
        assert_eq!(growth_rate(Money::from_units(150), Money::from_units(100)), Some(50.0));
        assert_eq!(growth_rate(Money::zero(), Money::from_units(100)), Some(-100.0));
        assert!(growth_rate(Money::MAX, Money::from_cents(-1)).is_some());
    }

    #[test]
    fn test_compare_uses_date_window_only_by_default() {
        let fx = Fixture::new();
        let records = vec![
            // previous window [Jan 2, Jan 11)
            fx.expense(&fx.tower, &fx.labour, 100, date(2024, 1, 2)),
            fx.expense(&fx.depot, &fx.materials, 100, date(2024, 1, 10)),
            // outside both windows
            fx.expense(&fx.tower, &fx.labour, 999, date(2024, 1, 1)),
            // current window [Jan 11, Jan 20]
            fx.expense(&fx.tower, &fx.labour, 300, date(2024, 1, 11)),
            fx.expense(&fx.depot, &fx.labour, 700, date(2024, 1, 20)),
        ];
        let filters = ReportFilters::new(date(2024, 1, 11), date(2024, 1, 20))
            .with_projects([fx.tower.id]);
        let current = filter_expenses(&records, &filters).unwrap();

        let comparison = compare_periods(&current.matched, &records, &filters);
        assert_eq!(comparison.current_total, Money::from_units(300));
        assert_eq!(comparison.previous_total, Money::from_units(200));
        assert_eq!(comparison.growth_rate_percent, Some(50.0));
        assert_eq!(comparison.basis, ComparisonBasis::DateWindow);
    }

    #[test]
    fn test_compare_same_filters_reapplies_dimensions() {
        let fx = Fixture::new();
        let records = vec![
            fx.expense(&fx.tower, &fx.labour, 100, date(2024, 1, 2)),
            fx.expense(&fx.depot, &fx.materials, 100, date(2024, 1, 10)),
            fx.expense(&fx.tower, &fx.labour, 300, date(2024, 1, 11)),
        ];
        let filters = ReportFilters::new(date(2024, 1, 11), date(2024, 1, 20))
            .with_projects([fx.tower.id])
            .with_comparison(ComparisonBasis::SameFilters);
        let current = filter_expenses(&records, &filters).unwrap();

        let comparison = compare_periods(&current.matched, &records, &filters);
        assert_eq!(comparison.previous_total, Money::from_units(100));
        assert_eq!(comparison.growth_rate_percent, Some(200.0));
    }

    #[test]
    fn test_start_day_not_double_counted_and_deleted_ignored() {
        let fx = Fixture::new();
        let records = vec![
            fx.expense(&fx.tower, &fx.labour, 100, date(2024, 1, 5)).deleted(),
            fx.expense(&fx.tower, &fx.labour, 40, date(2024, 1, 10)),
        ];
        let filters = ReportFilters::new(date(2024, 1, 10), date(2024, 1, 15));
        let current = filter_expenses(&records, &filters).unwrap();

        let comparison = compare_periods(&current.matched, &records, &filters);
        assert_eq!(comparison.previous_total, Money::zero());
        assert_eq!(comparison.growth_rate_percent, None);
        assert_eq!(previous_length_days(&filters), 5);
    }

    #[test]
    fn test_single_day_report_has_no_growth() {
        let fx = Fixture::new();
        let records = vec![
            fx.expense(&fx.tower, &fx.labour, 100, date(2024, 1, 9)),
            fx.expense(&fx.tower, &fx.labour, 100, date(2024, 1, 10)),
        ];
        let filters = ReportFilters::new(date(2024, 1, 10), date(2024, 1, 10));
        let current = filter_expenses(&records, &filters).unwrap();

        let comparison = compare_periods(&current.matched, &records, &filters);
        assert_eq!(comparison.growth_rate_percent, None);
        assert_eq!(previous_length_days(&filters), 0);
    }
}
