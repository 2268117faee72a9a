//! Expense model
//!
//! An expense is a single spend recorded against a project and a category.
//! Records are produced by an external repository and never mutated by the
//! analytics code.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId, ProjectId};
use super::money::Money;
use super::payment::{PaymentMode, Payer};

/// A recorded project expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Calendar date of the expense
    pub date: NaiveDate,

    /// Project the expense is booked against
    pub project_id: ProjectId,

    /// Expense category
    pub category_id: CategoryId,

    /// Amount spent (never negative for a valid record)
    pub amount: Money,

    /// How the expense was paid
    #[serde(default)]
    pub payment_mode: PaymentMode,

    /// Who paid
    #[serde(default)]
    pub paid_by: Payer,

    /// Vendor or supplier name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// References to uploaded receipts or invoices
    #[serde(default)]
    pub attachments: Vec<String>,

    /// Soft-delete flag; deleted expenses are invisible to every report
    #[serde(default)]
    pub is_deleted: bool,
}

impl Expense {
    /// Create a new expense paid in cash by the company
    pub fn new(
        date: NaiveDate,
        project_id: ProjectId,
        category_id: CategoryId,
        amount: Money,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            date,
            project_id,
            category_id,
            amount,
            payment_mode: PaymentMode::default(),
            paid_by: Payer::default(),
            vendor_name: None,
            notes: None,
            attachments: Vec::new(),
            is_deleted: false,
        }
    }

    /// Set the payment mode
    pub fn with_payment_mode(mut self, mode: PaymentMode) -> Self {
        self.payment_mode = mode;
        self
    }

    /// Set the payer
    pub fn with_payer(mut self, payer: Payer) -> Self {
        self.paid_by = payer;
        self
    }

    /// Set the vendor
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor_name = Some(vendor.into());
        self
    }

    /// Mark the expense as soft-deleted
    pub fn deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }

    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    /// Check whether this record takes part in reporting at all
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.date, self.amount)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Expense amount cannot be negative: {}", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Expense {
        Expense::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            ProjectId::new(),
            CategoryId::new(),
            Money::from_units(4500),
        )
    }

    #[test]
    fn test_new_expense_defaults() {
        let expense = sample();
        assert!(expense.is_active());
        assert_eq!(expense.payment_mode, PaymentMode::Cash);
        assert_eq!(expense.paid_by, Payer::Company);
        assert_eq!(expense.attachment_count(), 0);
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_negative_amount_is_invalid() {
        let mut expense = sample();
        expense.amount = Money::from_cents(-1);
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::NegativeAmount(Money::from_cents(-1)))
        );
    }

    #[test]
    fn test_deserialize_with_optional_fields_missing() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "date": "2024-01-13",
            "project_id": "550e8400-e29b-41d4-a716-446655440001",
            "category_id": "550e8400-e29b-41d4-a716-446655440002",
            "amount": 250000
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.amount, Money::from_units(2500));
        assert!(!expense.is_deleted);
        assert!(expense.vendor_name.is_none());
        assert!(expense.attachments.is_empty());
    }

    #[test]
    fn test_unparseable_date_is_rejected() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "date": "2024-13-45",
            "project_id": "550e8400-e29b-41d4-a716-446655440001",
            "category_id": "550e8400-e29b-41d4-a716-446655440002",
            "amount": 100
        }"#;
        assert!(serde_json::from_str::<Expense>(json).is_err());
    }
}
