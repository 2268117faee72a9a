//! Time-series bucketing
//!
//! The daily series is dense: one point for every day of the report range,
//! zero-filled. The monthly series is sparse and covers whatever months the
//! records fall in. It is ordered by (year, month); labels like "Feb 2023"
//! are for display only and never drive the ordering.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::{Expense, Money};

/// One bucket of a time series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    /// Display label ("2024-01-15" for days, "Jan 2024" for months)
    pub label: String,
    /// First calendar day covered by the bucket
    pub period_start: NaiveDate,
    pub amount: Money,
    pub count: usize,
}

/// Dense daily series over `[start, end]`
///
/// Records outside the range are ignored. An inverted range yields no points.
pub fn daily_series(subset: &[&Expense], start: NaiveDate, end: NaiveDate) -> Vec<SeriesPoint> {
    let mut by_day: HashMap<NaiveDate, (Money, usize)> = HashMap::new();
    for expense in subset.iter().filter(|e| start <= e.date && e.date <= end) {
        let entry = by_day.entry(expense.date).or_default();
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            let (amount, count) = by_day.get(&day).copied().unwrap_or_default();
            SeriesPoint {
                label: day.format("%Y-%m-%d").to_string(),
                period_start: day,
                amount,
                count,
            }
        })
        .collect()
}

/// Sparse monthly series in chronological order
pub fn monthly_series(subset: &[&Expense]) -> Vec<SeriesPoint> {
    let mut by_month: BTreeMap<(i32, u32), (NaiveDate, Money, usize)> = BTreeMap::new();
    for expense in subset {
        let date = expense.date;
        let first_of_month = date - Duration::days(i64::from(date.day0()));
        let entry = by_month
            .entry((date.year(), date.month()))
            .or_insert((first_of_month, Money::zero(), 0));
        entry.1 += expense.amount;
        entry.2 += 1;
    }

    by_month
        .into_values()
        .map(|(period_start, amount, count)| SeriesPoint {
            label: period_start.format("%b %Y").to_string(),
            period_start,
            amount,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::{date, Fixture};

    #[test]
    fn test_daily_series_is_dense() {
        let fx = Fixture::new();
        let records = vec![
            fx.expense(&fx.tower, &fx.materials, 4500, date(2024, 1, 15)),
            fx.expense(&fx.tower, &fx.labour, 2500, date(2024, 1, 13)),
        ];
        let subset: Vec<_> = records.iter().collect();

        let series = daily_series(&subset, date(2024, 1, 13), date(2024, 1, 15));
        let amounts: Vec<_> = series.iter().map(|p| p.amount.units()).collect();
        assert_eq!(amounts, vec![2500, 0, 4500]);
        let counts: Vec<_> = series.iter().map(|p| p.count).collect();
        assert_eq!(counts, vec![1, 0, 1]);
        assert_eq!(series[1].label, "2024-01-14");
    }

    #[test]
    fn test_daily_series_length_matches_range() {
        for (start, end) in [
            (date(2024, 1, 1), date(2024, 1, 1)),
            (date(2024, 2, 20), date(2024, 3, 5)),
            (date(2023, 12, 1), date(2024, 11, 30)),
        ] {
            let series = daily_series(&[], start, end);
            assert_eq!(series.len() as i64, (end - start).num_days() + 1);
            assert!(series.windows(2).all(|w| w[0].period_start < w[1].period_start));
            assert_eq!(series.first().unwrap().period_start, start);
            assert_eq!(series.last().unwrap().period_start, end);
        }
    }

    #[test]
    fn test_monthly_series_sorted_chronologically() {
        let fx = Fixture::new();
        // Insertion order and label order both disagree with chronology
        let records = vec![
            fx.expense(&fx.tower, &fx.labour, 10, date(2024, 1, 20)),
            fx.expense(&fx.tower, &fx.labour, 20, date(2023, 2, 3)),
            fx.expense(&fx.tower, &fx.labour, 30, date(2023, 12, 31)),
            fx.expense(&fx.tower, &fx.labour, 5, date(2024, 1, 2)),
            fx.expense(&fx.tower, &fx.labour, 40, date(2023, 11, 1)),
        ];
        let subset: Vec<_> = records.iter().collect();

        let series = monthly_series(&subset);
        let labels: Vec<_> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Feb 2023", "Nov 2023", "Dec 2023", "Jan 2024"]);
        assert_eq!(series[3].amount, Money::from_units(15));
        assert_eq!(series[3].count, 2);
        assert_eq!(series[2].period_start, date(2023, 12, 1));
    }

    #[test]
    fn test_monthly_series_empty() {
        assert!(monthly_series(&[]).is_empty());
    }
}
