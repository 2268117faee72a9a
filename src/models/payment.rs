//! Payment mode and payer tags
//!
//! Both are closed enumerations. Grouping expenses by one of them can never
//! create a bucket for a misspelled tag. Declaration order is the display
//! order and breaks ties in breakdowns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an expense was paid
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    #[default]
    Cash,
    BankTransfer,
    Cheque,
    Card,
    Upi,
    Other,
}

impl PaymentMode {
    pub fn all() -> &'static [Self] {
        &[
            Self::Cash,
            Self::BankTransfer,
            Self::Cheque,
            Self::Card,
            Self::Upi,
            Self::Other,
        ]
    }

    /// Stable machine key, matching the serialized form
    pub fn key(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::BankTransfer => "bank_transfer",
            Self::Cheque => "cheque",
            Self::Card => "card",
            Self::Upi => "upi",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::BankTransfer => "Bank Transfer",
            Self::Cheque => "Cheque",
            Self::Card => "Card",
            Self::Upi => "UPI",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PaymentMode {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_tag(s);
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.key() == wanted)
            .ok_or_else(|| TagParseError::UnknownPaymentMode(s.to_string()))
    }
}

/// Who paid for an expense
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Payer {
    #[default]
    Company,
    ProjectManager,
    SiteEngineer,
    Contractor,
    Client,
}

impl Payer {
    pub fn all() -> &'static [Self] {
        &[
            Self::Company,
            Self::ProjectManager,
            Self::SiteEngineer,
            Self::Contractor,
            Self::Client,
        ]
    }

    /// Stable machine key, matching the serialized form
    pub fn key(&self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::ProjectManager => "project_manager",
            Self::SiteEngineer => "site_engineer",
            Self::Contractor => "contractor",
            Self::Client => "client",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Company => "Company",
            Self::ProjectManager => "Project Manager",
            Self::SiteEngineer => "Site Engineer",
            Self::Contractor => "Contractor",
            Self::Client => "Client",
        }
    }
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Payer {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_tag(s);
        Self::all()
            .iter()
            .copied()
            .find(|payer| payer.key() == wanted)
            .ok_or_else(|| TagParseError::UnknownPayer(s.to_string()))
    }
}

/// "Bank Transfer", "bank-transfer" and "bank_transfer" all map to the same key
fn normalize_tag(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Error type for tag parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagParseError {
    UnknownPaymentMode(String),
    UnknownPayer(String),
}

impl fmt::Display for TagParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPaymentMode(s) => write!(f, "Unknown payment mode: {}", s),
            Self::UnknownPayer(s) => write!(f, "Unknown payer: {}", s),
        }
    }
}

impl std::error::Error for TagParseError {}
