//! Display formatting for terminal output

pub mod report;

pub use report::{
    format_bar, format_breakdown_table, format_budget_table, format_growth, format_percentage,
    format_project_table, format_series_table,
};
