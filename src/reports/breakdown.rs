//! Breakdown aggregation
//!
//! Groups a filtered expense set by one typed dimension and computes the sum,
//! count and share of the total for every key that has at least one record.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{CategoryId, Expense, Money, PaymentMode, Payer, ProjectId};

use super::budget::{utilization_percent, BudgetStatus};
use super::reference::ReferenceData;

/// Label for keys with no reference entry
const UNKNOWN_LABEL: &str = "Unknown";

/// A grouping dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Category,
    Project,
    PaymentMode,
    Payer,
}

impl Dimension {
    pub fn all() -> &'static [Self] {
        &[Self::Category, Self::Project, Self::PaymentMode, Self::Payer]
    }

    /// Grouping key of an expense along this dimension
    pub fn key_of(&self, expense: &Expense) -> BreakdownKey {
        match self {
            Self::Category => BreakdownKey::Category(expense.category_id),
            Self::Project => BreakdownKey::Project(expense.project_id),
            Self::PaymentMode => BreakdownKey::PaymentMode(expense.payment_mode),
            Self::Payer => BreakdownKey::Payer(expense.paid_by),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Project => "project",
            Self::PaymentMode => "payment_mode",
            Self::Payer => "payer",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Typed grouping key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "value", rename_all = "snake_case")]
pub enum BreakdownKey {
    Category(CategoryId),
    Project(ProjectId),
    PaymentMode(PaymentMode),
    Payer(Payer),
}

impl BreakdownKey {
    /// Machine-readable identifier for exports
    pub fn id_string(&self) -> String {
        match self {
            Self::Category(id) => id.as_uuid().to_string(),
            Self::Project(id) => id.as_uuid().to_string(),
            Self::PaymentMode(mode) => mode.key().to_string(),
            Self::Payer(payer) => payer.key().to_string(),
        }
    }

    fn label(&self, reference: &ReferenceData) -> String {
        match self {
            Self::Category(id) => reference
                .category(*id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            Self::Project(id) => reference
                .project(*id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            Self::PaymentMode(mode) => mode.label().to_string(),
            Self::Payer(payer) => payer.label().to_string(),
        }
    }

    fn color(&self, reference: &ReferenceData) -> Option<String> {
        let color = match self {
            Self::Category(id) => reference.category(*id).map(|c| c.color.clone()),
            Self::Project(id) => reference.project(*id).map(|p| p.color.clone()),
            Self::PaymentMode(_) | Self::Payer(_) => None,
        };
        color.filter(|c| !c.is_empty())
    }

    /// Keys backed by reference data are shown in name order; enum tags in
    /// declaration order
    fn sorts_by_label(&self) -> bool {
        matches!(self, Self::Category(_) | Self::Project(_))
    }
}

/// One group of a breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub key: BreakdownKey,
    pub label: String,
    /// Display color passed through from reference data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Sum of amounts in this group
    pub value: Money,
    pub count: usize,
    /// Share of the subset total, 0 when the total is 0
    pub percentage: f64,
}

/// A project breakdown entry with budget figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectBreakdown {
    pub project_id: ProjectId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub value: Money,
    pub count: usize,
    pub percentage: f64,
    pub budget: Money,
    pub budget_used_percent: f64,
    pub remaining: Money,
    pub status: BudgetStatus,
}

/// Group `subset` by `dimension`
///
/// Largest value first; equal values fall back to display order so the output
/// is deterministic.
pub fn aggregate(
    subset: &[&Expense],
    dimension: Dimension,
    reference: &ReferenceData,
) -> Vec<Breakdown> {
    let grand_total: Money = subset.iter().map(|e| e.amount).sum();

    let mut groups: HashMap<BreakdownKey, (Money, usize)> = HashMap::new();
    for expense in subset {
        let entry = groups.entry(dimension.key_of(expense)).or_default();
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let mut breakdowns: Vec<Breakdown> = groups
        .into_iter()
        .map(|(key, (value, count))| Breakdown {
            key,
            label: key.label(reference),
            color: key.color(reference),
            value,
            count,
            percentage: value.percent_of(grand_total),
        })
        .collect();

    breakdowns.sort_by(compare_breakdowns);
    breakdowns
}

fn compare_breakdowns(a: &Breakdown, b: &Breakdown) -> Ordering {
    b.value.cmp(&a.value).then_with(|| {
        if a.key.sorts_by_label() {
            a.label.cmp(&b.label).then_with(|| a.key.cmp(&b.key))
        } else {
            a.key.cmp(&b.key)
        }
    })
}

/// Project breakdown with budget usage for each project
pub fn aggregate_projects(subset: &[&Expense], reference: &ReferenceData) -> Vec<ProjectBreakdown> {
    aggregate(subset, Dimension::Project, reference)
        .into_iter()
        .filter_map(|entry| {
            let BreakdownKey::Project(project_id) = entry.key else {
                return None;
            };
            let budget = reference
                .project(project_id)
                .map(|p| p.budget)
                .unwrap_or_default();
            let used = utilization_percent(entry.value, budget);
            Some(ProjectBreakdown {
                project_id,
                label: entry.label,
                color: entry.color,
                value: entry.value,
                count: entry.count,
                percentage: entry.percentage,
                budget,
                budget_used_percent: used,
                remaining: budget - entry.value,
                status: BudgetStatus::from_utilization(used),
            })
        })
        .collect()
}
