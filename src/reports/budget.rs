//! Budget evaluation
//!
//! Measures spend against a project's budget and assigns one status band.
//! The bands are the single policy used by every report:
//!
//! | utilization      | status   |
//! |------------------|----------|
//! | above 100%       | Exceeded |
//! | above 90%        | Critical |
//! | above 80%        | Watch    |
//! | otherwise        | Normal   |
//!
//! A project with a zero budget reports 0% utilization.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Expense, Money, Project, ProjectId};

use super::filters::is_reportable;

/// Budget status band, ordered from healthiest to worst
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    #[default]
    Normal,
    Watch,
    Critical,
    Exceeded,
}

impl BudgetStatus {
    /// Band for a utilization percentage
    pub fn from_utilization(percent: f64) -> Self {
        if percent > 100.0 {
            Self::Exceeded
        } else if percent > 90.0 {
            Self::Critical
        } else if percent > 80.0 {
            Self::Watch
        } else {
            Self::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Watch => "Watch",
            Self::Critical => "Critical",
            Self::Exceeded => "Exceeded",
        }
    }

    /// Whether the presentation layer should raise a warning
    pub fn needs_attention(&self) -> bool {
        *self >= Self::Critical
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Spend measured against one project's budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetEvaluation {
    pub project_id: ProjectId,
    pub project_name: String,
    pub budget: Money,
    pub spent: Money,
    /// Budget minus spend; negative once the budget is exceeded
    pub remaining: Money,
    pub utilization_percent: f64,
    pub status: BudgetStatus,
}

/// Spend as a percentage of budget, 0 when there is no budget
pub fn utilization_percent(spent: Money, budget: Money) -> f64 {
    spent.percent_of(budget)
}

/// Evaluate a project's spend
pub fn evaluate(project: &Project, spent: Money) -> BudgetEvaluation {
    let utilization = utilization_percent(spent, project.budget);
    BudgetEvaluation {
        project_id: project.id,
        project_name: project.name.clone(),
        budget: project.budget,
        spent,
        remaining: project.budget - spent,
        utilization_percent: utilization,
        status: BudgetStatus::from_utilization(utilization),
    }
}

/// Evaluate every project against all of its reportable expenses
///
/// Projects without spend are included. Worst status first, then by name.
pub fn budget_overview(expenses: &[Expense], projects: &[Project]) -> Vec<BudgetEvaluation> {
    let mut spent: HashMap<ProjectId, Money> = HashMap::new();
    for expense in expenses.iter().filter(|e| is_reportable(e)) {
        *spent.entry(expense.project_id).or_default() += expense.amount;
    }

    let mut evaluations: Vec<_> = projects
        .iter()
        .map(|p| evaluate(p, spent.get(&p.id).copied().unwrap_or_default()))
        .collect();

    evaluations.sort_by(|a, b| {
        b.status
            .cmp(&a.status)
            .then_with(|| a.project_name.cmp(&b.project_name))
            .then_with(|| a.project_id.cmp(&b.project_id))
    });
    evaluations
}
