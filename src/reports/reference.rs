//! Reference data lookups
//!
//! Indexes categories and projects by id for label, color and budget lookups
//! during aggregation, and resolves user-supplied names to ids.

use std::collections::HashMap;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryId, Project, ProjectId};
use crate::storage::ExpenseSource;

/// Categories and projects indexed by id
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    categories: HashMap<CategoryId, Category>,
    projects: HashMap<ProjectId, Project>,
}

impl ReferenceData {
    pub fn new(categories: Vec<Category>, projects: Vec<Project>) -> Self {
        Self {
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
            projects: projects.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Build the lookup from a data source
    pub fn from_source<S: ExpenseSource + ?Sized>(source: &S) -> LedgerResult<Self> {
        Ok(Self::new(source.categories()?, source.projects()?))
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    /// All projects sorted by name
    pub fn projects(&self) -> Vec<&Project> {
        let mut projects: Vec<_> = self.projects.values().collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        projects
    }

    /// Resolve a project by id or case-insensitive name
    pub fn find_project(&self, query: &str) -> LedgerResult<ProjectId> {
        if let Ok(id) = query.parse::<ProjectId>() {
            if self.projects.contains_key(&id) {
                return Ok(id);
            }
        }

        let query = query.trim();
        self.projects
            .values()
            .find(|p| p.name.eq_ignore_ascii_case(query))
            .map(|p| p.id)
            .ok_or_else(|| LedgerError::project_not_found(query))
    }

    /// Resolve a category by id or case-insensitive name
    pub fn find_category(&self, query: &str) -> LedgerResult<CategoryId> {
        if let Ok(id) = query.parse::<CategoryId>() {
            if self.categories.contains_key(&id) {
                return Ok(id);
            }
        }

        let query = query.trim();
        self.categories
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(query))
            .map(|c| c.id)
            .ok_or_else(|| LedgerError::category_not_found(query))
    }
}
