//! Construction project reference data
//!
//! Projects carry the budget that expenses are measured against.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ProjectId;
use super::money::Money;

/// A construction project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,

    /// Project name
    pub name: String,

    /// Total approved budget
    #[serde(default)]
    pub budget: Money,

    /// Display color, passed through untouched to report consumers
    #[serde(default)]
    pub color: String,
}

impl Project {
    /// Create a new project with a budget
    pub fn new(name: impl Into<String>, budget: Money) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            budget,
            color: String::new(),
        }
    }

    /// Set the display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Validate the project
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }
        if self.budget.is_negative() {
            return Err(ProjectValidationError::NegativeBudget(self.budget));
        }
        Ok(())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for projects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyName,
    NegativeBudget(Money),
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Project name cannot be empty"),
            Self::NegativeBudget(budget) => {
                write!(f, "Project budget cannot be negative: {}", budget)
            }
        }
    }
}

impl std::error::Error for ProjectValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_validation() {
        assert!(Project::new("Riverside Tower", Money::from_units(100_000))
            .validate()
            .is_ok());
        assert_eq!(
            Project::new("  ", Money::zero()).validate(),
            Err(ProjectValidationError::EmptyName)
        );
        assert_eq!(
            Project::new("Annex", Money::from_cents(-1)).validate(),
            Err(ProjectValidationError::NegativeBudget(Money::from_cents(-1)))
        );
    }

    #[test]
    fn test_budget_defaults_to_zero() {
        let json = r#"{"id": "550e8400-e29b-41d4-a716-446655440001", "name": "Depot"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.budget.is_zero());
        assert!(project.color.is_empty());
    }
}
