//! Storage layer for siteledger
//!
//! Reports never talk to files directly. They read through [`ExpenseSource`],
//! a read-only data-provider interface with two implementations:
//!
//! - [`Storage`]: JSON snapshot files in the data directory
//! - [`Snapshot`]: plain in-memory collections (fixtures, embedding)

pub mod expenses;
pub mod file_io;
pub mod init;
pub mod reference;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use reference::{CategoryRepository, ProjectRepository};

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::{Category, Expense, Project};

/// Read-only access to one snapshot of expense data
pub trait ExpenseSource {
    /// Every expense record, including soft-deleted ones
    fn expenses(&self) -> Result<Vec<Expense>, LedgerError>;

    fn categories(&self) -> Result<Vec<Category>, LedgerError>;

    fn projects(&self) -> Result<Vec<Project>, LedgerError>;

    /// Changes whenever the underlying data may have changed
    fn snapshot_version(&self) -> u64;

    /// Records the source could not decode and left out of `expenses()`
    fn malformed_count(&self) -> Result<usize, LedgerError> {
        Ok(0)
    }
}

/// File-backed storage coordinator
pub struct Storage {
    paths: LedgerPaths,
    pub expenses: ExpenseRepository,
    pub categories: CategoryRepository,
    pub projects: ProjectRepository,
    version: AtomicU64,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            projects: ProjectRepository::new(paths.projects_file()),
            paths,
            version: AtomicU64::new(0),
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Load all data from disk and start a new snapshot version
    pub fn load_all(&mut self) -> Result<(), LedgerError> {
        self.expenses.load()?;
        self.categories.load()?;
        self.projects.load()?;
        self.version.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl ExpenseSource for Storage {
    fn expenses(&self) -> Result<Vec<Expense>, LedgerError> {
        self.expenses.get_all()
    }

    fn categories(&self) -> Result<Vec<Category>, LedgerError> {
        self.categories.get_all()
    }

    fn projects(&self) -> Result<Vec<Project>, LedgerError> {
        self.projects.get_all()
    }

    fn snapshot_version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    fn malformed_count(&self) -> Result<usize, LedgerError> {
        self.expenses.malformed_count()
    }
}

/// In-memory snapshot of expense data
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub expenses: Vec<Expense>,
    pub categories: Vec<Category>,
    pub projects: Vec<Project>,
    pub version: u64,
}

impl Snapshot {
    pub fn new(expenses: Vec<Expense>, categories: Vec<Category>, projects: Vec<Project>) -> Self {
        Self {
            expenses,
            categories,
            projects,
            version: 0,
        }
    }
}

impl ExpenseSource for Snapshot {
    fn expenses(&self) -> Result<Vec<Expense>, LedgerError> {
        Ok(self.expenses.clone())
    }

    fn categories(&self) -> Result<Vec<Category>, LedgerError> {
        Ok(self.categories.clone())
    }

    fn projects(&self) -> Result<Vec<Project>, LedgerError> {
        Ok(self.projects.clone())
    }

    fn snapshot_version(&self) -> u64 {
        self.version
    }
}
