//! Expense repository for JSON storage
//!
//! Reads `expenses.json`. Entries that fail to deserialize (an unparseable
//! date, an unknown payment mode) are skipped and counted so one bad row does
//! not take down every report.

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::models::Expense;

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout with entries kept as raw JSON until validated one by one
#[derive(Debug, Default, Deserialize)]
struct RawExpenseData {
    #[serde(default)]
    expenses: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct ExpenseData<'a> {
    expenses: &'a [Expense],
}

#[derive(Debug, Default)]
struct LoadedExpenses {
    expenses: Vec<Expense>,
    malformed: usize,
}

/// Read-only repository over the expense snapshot file
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<LoadedExpenses>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(LoadedExpenses::default()),
        }
    }

    /// Load expenses from disk, replacing whatever was loaded before
    pub fn load(&self) -> Result<(), LedgerError> {
        let raw: RawExpenseData = read_json(&self.path)?;

        let mut loaded = LoadedExpenses::default();
        for (index, value) in raw.expenses.into_iter().enumerate() {
            match serde_json::from_value::<Expense>(value) {
                Ok(expense) => loaded.expenses.push(expense),
                Err(e) => {
                    tracing::warn!(
                        file = %self.path.display(),
                        index,
                        error = %e,
                        "skipping malformed expense record"
                    );
                    loaded.malformed += 1;
                }
            }
        }

        tracing::info!(
            file = %self.path.display(),
            loaded = loaded.expenses.len(),
            malformed = loaded.malformed,
            "loaded expenses"
        );

        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = loaded;
        Ok(())
    }

    /// All loaded expenses in file order, including soft-deleted ones
    pub fn get_all(&self) -> Result<Vec<Expense>, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.expenses.clone())
    }

    /// Number of entries skipped during the last load
    pub fn malformed_count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.malformed)
    }

    /// Write an expense list to the snapshot file (used to seed a data directory)
    pub fn write_snapshot(&self, expenses: &[Expense]) -> Result<(), LedgerError> {
        write_json_atomic(&self.path, &ExpenseData { expenses })
    }
}
