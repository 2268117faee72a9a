//! Storage initialization
//!
//! Creates the data directory with empty snapshot files and a starter set of
//! construction expense categories.

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::Category;

use super::expenses::ExpenseRepository;
use super::reference::{CategoryRepository, ProjectRepository};

/// Starter categories with their display colors
const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Materials", "#f59e0b"),
    ("Labour", "#3b82f6"),
    ("Equipment Hire", "#10b981"),
    ("Transport", "#8b5cf6"),
    ("Permits & Fees", "#ef4444"),
    ("Site Overheads", "#6b7280"),
];

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched.
pub fn initialize_storage(paths: &LedgerPaths) -> Result<(), LedgerError> {
    paths.ensure_directories()?;

    if !paths.categories_file().exists() {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, color)| Category::new(*name).with_color(*color))
            .collect();
        CategoryRepository::new(paths.categories_file()).write_snapshot(categories)?;
    }

    if !paths.projects_file().exists() {
        ProjectRepository::new(paths.projects_file()).write_snapshot(Vec::new())?;
    }

    if !paths.expenses_file().exists() {
        ExpenseRepository::new(paths.expenses_file()).write_snapshot(&[])?;
    }

    Ok(())
}
