//! Category and project repositories for JSON storage

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::models::{Category, Project};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CategoryData {
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProjectData {
    #[serde(default)]
    projects: Vec<Project>,
}

/// Repository over `categories.json`
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: CategoryData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data.categories;
        Ok(())
    }

    pub fn get_all(&self) -> Result<Vec<Category>, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    pub fn write_snapshot(&self, categories: Vec<Category>) -> Result<(), LedgerError> {
        write_json_atomic(&self.path, &CategoryData { categories })
    }
}

/// Repository over `projects.json`
pub struct ProjectRepository {
    path: PathBuf,
    data: RwLock<Vec<Project>>,
}

impl ProjectRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load projects, rejecting the file if any project fails validation
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: ProjectData = read_json(&self.path)?;
        for project in &file_data.projects {
            project.validate().map_err(|e| {
                LedgerError::Storage(format!("Invalid project {}: {}", project.id, e))
            })?;
        }

        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data.projects;
        Ok(())
    }

    pub fn get_all(&self) -> Result<Vec<Project>, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.clone())
    }

    pub fn write_snapshot(&self, projects: Vec<Project>) -> Result<(), LedgerError> {
        write_json_atomic(&self.path, &ProjectData { projects })
    }
}
