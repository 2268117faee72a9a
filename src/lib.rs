//! siteledger - expense analytics for construction projects
//!
//! This library turns a snapshot of expense records, categories and projects
//! into reports: totals, breakdowns by category, project, payment mode and
//! payer, daily and monthly series, period-over-period growth and budget
//! utilization. All analytics are pure functions of their inputs.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, projects, categories, money)
//! - `storage`: Read-only data sources (JSON files or in-memory snapshots)
//! - `reports`: Filtering, aggregation, series, period comparison and budgets
//! - `export`: CSV, JSON and YAML report export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `siteledger` binary
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use siteledger::reports::{ExpenseReport, ReportFilters};
//! use siteledger::storage::Snapshot;
//!
//! let snapshot = Snapshot::new(expenses, categories, projects);
//! let filters = ReportFilters::new(start, end).with_projects([tower.id]);
//! let report = ExpenseReport::generate(&snapshot, &filters)?;
//! println!("{}", report.format_terminal("$"));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
