//! Budget CLI command
//!
//! Shows every project's spend against its budget, worst status first.

use clap::{Args, ValueEnum};

use crate::config::settings::Settings;
use crate::display::report::format_budget_table;
use crate::error::LedgerResult;
use crate::export::export_budget_json;
use crate::reports::{budget_overview, BudgetEvaluation};
use crate::storage::{ExpenseSource, Storage};

/// Output format for `siteledger budget`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BudgetFormat {
    #[default]
    Terminal,
    Json,
}

/// Arguments for `siteledger budget`
#[derive(Args, Debug, Clone, Default)]
pub struct BudgetArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = BudgetFormat::Terminal)]
    pub format: BudgetFormat,
}

/// Handle `siteledger budget`
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    args: BudgetArgs,
) -> LedgerResult<()> {
    let overview = budget_overview(&storage.expenses()?, &storage.projects()?);

    match args.format {
        BudgetFormat::Terminal => print!("{}", format_budget_overview(&overview, settings)),
        BudgetFormat::Json => {
            let stdout = std::io::stdout();
            export_budget_json(&overview, &mut stdout.lock())?;
        }
    }
    Ok(())
}

/// Terminal rendering of a budget overview with a warning footer
pub fn format_budget_overview(overview: &[BudgetEvaluation], settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str("Project Budgets\n");
    output.push_str(&crate::display::report::double_separator(72));
    output.push('\n');
    output.push_str(&format_budget_table(overview, &settings.currency_symbol));
    output.push('\n');

    let attention: Vec<_> = overview
        .iter()
        .filter(|e| e.status.needs_attention())
        .collect();
    if !attention.is_empty() {
        output.push('\n');
        for evaluation in attention {
            output.push_str(&format!(
                "Warning: {} is at {:.1}% of budget ({})\n",
                evaluation.project_name,
                evaluation.utilization_percent,
                evaluation.status
            ));
        }
    }
    output
}
