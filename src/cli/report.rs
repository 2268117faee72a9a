//! CLI command for expense reports
//!
//! Turns command-line arguments into [`ReportFilters`], generates the report
//! and prints or exports it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, ValueEnum};

use crate::config::settings::Settings;
use crate::display::report::format_breakdown_table;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_report_csv, export_report_json, export_report_yaml};
use crate::models::{Money, PaymentMode, Payer};
use crate::reports::{ComparisonBasis, ExpenseReport, ReferenceData, ReportFilters};
use crate::storage::Storage;

/// Output format for `siteledger report`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Csv,
    Json,
    Yaml,
}

/// Arguments for `siteledger report`
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Start date (YYYY-MM-DD); defaults to the configured lookback window
    #[arg(short, long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    pub end: Option<String>,

    /// Only include this project (name or ID, repeatable)
    #[arg(short, long = "project")]
    pub projects: Vec<String>,

    /// Only include this category (name or ID, repeatable)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Only include this payment mode (e.g. cash, bank_transfer, upi; repeatable)
    #[arg(long = "payment-mode")]
    pub payment_modes: Vec<String>,

    /// Only include expenses paid by this party (e.g. company, contractor; repeatable)
    #[arg(long = "paid-by")]
    pub payers: Vec<String>,

    /// Minimum amount (inclusive)
    #[arg(long)]
    pub min: Option<String>,

    /// Maximum amount (inclusive)
    #[arg(long)]
    pub max: Option<String>,

    /// Apply project, category, payment and amount filters to the previous period too
    #[arg(long)]
    pub same_filters: bool,

    /// Show the top N categories only
    #[arg(long)]
    pub top: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle `siteledger report`
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    args: ReportArgs,
) -> LedgerResult<()> {
    let reference = ReferenceData::from_source(storage)?;
    let filters = build_filters(&args, &reference, settings)?;
    let report = ExpenseReport::generate(storage, &filters)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_report(&report, &args, settings, &mut writer)?;
            writer.flush()?;
            println!("Report exported to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_report(&report, &args, settings, &mut writer)?;
        }
    }

    Ok(())
}

fn write_report<W: Write>(
    report: &ExpenseReport,
    args: &ReportArgs,
    settings: &Settings,
    writer: &mut W,
) -> LedgerResult<()> {
    let symbol = &settings.currency_symbol;
    match args.format {
        OutputFormat::Terminal => match args.top {
            Some(n) => {
                writeln!(
                    writer,
                    "Top {} Categories: {} to {}\n",
                    n, report.filters.start, report.filters.end
                )?;
                writeln!(writer, "{}", format_breakdown_table(report.top_categories(n), symbol))?;
                writeln!(
                    writer,
                    "\nTotal Spent: {}",
                    report.total_amount.format_with_symbol(symbol)
                )?;
            }
            None => write!(writer, "{}", report.format_terminal(symbol))?,
        },
        OutputFormat::Csv => export_report_csv(report, writer)?,
        OutputFormat::Json => export_report_json(report, writer, true)?,
        OutputFormat::Yaml => export_report_yaml(report, writer)?,
    }
    Ok(())
}

/// Build report filters from command-line arguments
///
/// Names are resolved against the reference data; an unknown project or
/// category is an error rather than an empty report.
pub fn build_filters(
    args: &ReportArgs,
    reference: &ReferenceData,
    settings: &Settings,
) -> LedgerResult<ReportFilters> {
    let (default_start, default_end) = settings.default_range();
    let end = match &args.end {
        Some(s) => parse_date(s, &settings.date_format, "end")?,
        None => default_end,
    };
    let start = match &args.start {
        Some(s) => parse_date(s, &settings.date_format, "start")?,
        None if args.end.is_some() => {
            let span = i64::from(settings.default_lookback_days.saturating_sub(1));
            end.checked_sub_signed(chrono::Duration::days(span))
                .unwrap_or(NaiveDate::MIN)
        }
        None => default_start,
    };

    let projects = args
        .projects
        .iter()
        .map(|p| reference.find_project(p))
        .collect::<LedgerResult<Vec<_>>>()?;
    let categories = args
        .categories
        .iter()
        .map(|c| reference.find_category(c))
        .collect::<LedgerResult<Vec<_>>>()?;
    let payment_modes = args
        .payment_modes
        .iter()
        .map(|m| m.parse::<PaymentMode>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LedgerError::Validation(e.to_string()))?;
    let payers = args
        .payers
        .iter()
        .map(|p| p.parse::<Payer>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LedgerError::Validation(e.to_string()))?;

    let min = match &args.min {
        Some(s) => parse_amount(s, "minimum")?,
        None => Money::zero(),
    };
    let max = match &args.max {
        Some(s) => parse_amount(s, "maximum")?,
        None => Money::MAX,
    };

    let comparison = if args.same_filters {
        ComparisonBasis::SameFilters
    } else {
        ComparisonBasis::DateWindow
    };

    let filters = ReportFilters::new(start, end)
        .with_projects(projects)
        .with_categories(categories)
        .with_payment_modes(payment_modes)
        .with_payers(payers)
        .with_amount_range(min, max)
        .with_comparison(comparison);
    filters.validate()?;
    Ok(filters)
}

fn parse_date(value: &str, format: &str, which: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, format))
        .map_err(|_| {
            LedgerError::Validation(format!(
                "Invalid {} date: {}. Use YYYY-MM-DD",
                which, value
            ))
        })
}

fn parse_amount(value: &str, which: &str) -> LedgerResult<Money> {
    let amount = Money::parse(value).map_err(|e| {
        LedgerError::Validation(format!("Invalid {} amount: {}", which, e))
    })?;
    if amount.is_negative() {
        return Err(LedgerError::Validation(format!(
            "Invalid {} amount: {} is negative",
            which, value
        )));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::{date, Fixture};

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn test_build_filters_resolves_names() {
        let fx = Fixture::new();
        let args = ReportArgs {
            start: Some("2024-01-01".into()),
            end: Some("2024-01-31".into()),
            projects: vec!["riverside tower".into()],
            categories: vec!["Labour".into(), fx.materials.id.as_uuid().to_string()],
            payment_modes: vec!["bank-transfer".into()],
            payers: vec!["Site Engineer".into()],
            min: Some("10".into()),
            max: Some("2500.50".into()),
            same_filters: true,
            ..Default::default()
        };

        let filters = build_filters(&args, &fx.reference(), &settings()).unwrap();

        assert_eq!(filters.start, date(2024, 1, 1));
        assert_eq!(filters.end, date(2024, 1, 31));
        assert!(filters.projects.contains(&fx.tower.id));
        assert!(filters.categories.contains(&fx.labour.id));
        assert!(filters.categories.contains(&fx.materials.id));
        assert!(filters.payment_modes.contains(&PaymentMode::BankTransfer));
        assert!(filters.payers.contains(&Payer::SiteEngineer));
        assert_eq!(filters.min_amount, Money::from_units(10));
        assert_eq!(filters.max_amount, Money::from_cents(250_050));
        assert_eq!(filters.comparison, ComparisonBasis::SameFilters);
    }

    #[test]
    fn test_defaults_cover_lookback_window() {
        let fx = Fixture::new();
        let settings = settings();
        let filters = build_filters(&ReportArgs::default(), &fx.reference(), &settings).unwrap();

        assert_eq!((filters.end - filters.start).num_days(), 29);
        assert_eq!(filters.max_amount, Money::MAX);
        assert_eq!(filters.comparison, ComparisonBasis::DateWindow);

        let args = ReportArgs {
            end: Some("2024-03-31".into()),
            ..Default::default()
        };
        let filters = build_filters(&args, &fx.reference(), &settings).unwrap();
        assert_eq!(filters.start, date(2024, 3, 2));
    }

    #[test]
    fn test_build_filters_rejects_bad_input() {
        let fx = Fixture::new();
        let reference = fx.reference();
        let settings = settings();

        let bad_date = ReportArgs {
            start: Some("15/01/2024".into()),
            ..Default::default()
        };
        assert!(build_filters(&bad_date, &reference, &settings)
            .unwrap_err()
            .is_validation());

        let inverted = ReportArgs {
            start: Some("2024-02-01".into()),
            end: Some("2024-01-01".into()),
            ..Default::default()
        };
        assert!(matches!(
            build_filters(&inverted, &reference, &settings),
            Err(LedgerError::InvalidDateRange { .. })
        ));

        let unknown = ReportArgs {
            projects: vec!["Harbour Bridge".into()],
            ..Default::default()
        };
        assert!(build_filters(&unknown, &reference, &settings)
            .unwrap_err()
            .is_not_found());

        let mode = ReportArgs {
            payment_modes: vec!["barter".into()],
            ..Default::default()
        };
        assert!(build_filters(&mode, &reference, &settings)
            .unwrap_err()
            .is_validation());

        let negative = ReportArgs {
            min: Some("-5".into()),
            ..Default::default()
        };
        assert!(build_filters(&negative, &reference, &settings)
            .unwrap_err()
            .is_validation());

        let huge = ReportArgs {
            max: Some("100000000000000000".into()),
            ..Default::default()
        };
        assert!(build_filters(&huge, &reference, &settings)
            .unwrap_err()
            .is_validation());

        let precise = ReportArgs {
            min: Some("10.999".into()),
            ..Default::default()
        };
        assert!(build_filters(&precise, &reference, &settings)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_custom_date_format_accepted() {
        let fx = Fixture::new();
        let settings = Settings {
            date_format: "%d/%m/%Y".into(),
            ..Settings::default()
        };
        let args = ReportArgs {
            start: Some("15/01/2024".into()),
            end: Some("2024-01-20".into()),
            ..Default::default()
        };
        let filters = build_filters(&args, &fx.reference(), &settings).unwrap();
        assert_eq!(filters.start, date(2024, 1, 15));
    }
}
