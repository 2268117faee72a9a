//! Core data models for siteledger
//!
//! Expenses plus the reference data (categories, projects) they point at.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod payment;
pub mod project;

pub use category::Category;
pub use expense::{Expense, ExpenseValidationError};
pub use ids::{CategoryId, ExpenseId, ProjectId};
pub use money::{Money, MoneyParseError};
pub use payment::{PaymentMode, Payer, TagParseError};
pub use project::{Project, ProjectValidationError};
