//! User settings for siteledger
//!
//! Controls how reports are presented and which calendar decides "today"
//! when a report is requested without explicit dates.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::storage::file_io::write_json_atomic;

/// Calendar used to decide the current date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Calendar {
    /// UTC calendar days (default; identical on every machine)
    #[default]
    Utc,
    /// The host's local timezone
    Local,
}

impl Calendar {
    /// Today's date in this calendar
    pub fn today(&self) -> NaiveDate {
        match self {
            Self::Utc => chrono::Utc::now().date_naive(),
            Self::Local => chrono::Local::now().date_naive(),
        }
    }
}

/// User settings for siteledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format accepted on the command line besides ISO `YYYY-MM-DD` (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Calendar that decides "today"
    #[serde(default)]
    pub calendar: Calendar,

    /// Days covered by a report when no start date is given
    #[serde(default = "default_lookback_days")]
    pub default_lookback_days: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_lookback_days() -> u32 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            calendar: Calendar::default(),
            default_lookback_days: default_lookback_days(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Default report range: the lookback window ending today (inclusive)
    pub fn default_range(&self) -> (NaiveDate, NaiveDate) {
        let end = self.calendar.today();
        let span = i64::from(self.default_lookback_days.saturating_sub(1));
        let start = end
            .checked_sub_signed(Duration::days(span))
            .unwrap_or(NaiveDate::MIN);
        (start, end)
    }
}
