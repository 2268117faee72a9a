use anyhow::Result;
use clap::{Parser, Subcommand};

use siteledger::cli::{handle_budget_command, handle_report_command, BudgetArgs, ReportArgs};
use siteledger::config::{paths::LedgerPaths, settings::Settings};
use siteledger::logging::init_tracing;
use siteledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "siteledger",
    version,
    about = "Expense analytics and budget reporting for construction projects",
    long_about = "siteledger reads expense records, projects and categories from a \
                  data directory and reports totals, breakdowns, trends and budget \
                  utilization. It never modifies the records it reads."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an expense report
    Report(ReportArgs),

    /// Show spend against budget for every project
    Budget(BudgetArgs),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Report(args)) => {
            let storage = load_storage(&paths)?;
            handle_report_command(&storage, &settings, args)?;
        }
        Some(Commands::Budget(args)) => {
            let storage = load_storage(&paths)?;
            handle_budget_command(&storage, &settings, args)?;
        }
        Some(Commands::Init) => {
            println!("Initializing siteledger at: {}", paths.base_dir().display());
            siteledger::storage::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Default expense categories have been created:");
            println!("  Materials, Labour, Equipment Hire, Transport, Permits & Fees, Site Overheads");
            println!();
            println!("Add projects to {}", paths.projects_file().display());
            println!("and expenses to {}", paths.expenses_file().display());
        }
        Some(Commands::Config) => {
            println!("siteledger Configuration");
            println!("========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Initialized:     {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Calendar:         {:?}", settings.calendar);
            println!("  Lookback days:    {}", settings.default_lookback_days);
        }
        None => {
            println!("siteledger - expense analytics for construction projects");
            println!();
            println!("Run 'siteledger --help' for usage information.");
            println!("Run 'siteledger init' to create a data directory.");
        }
    }

    Ok(())
}

fn load_storage(paths: &LedgerPaths) -> Result<Storage> {
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    Ok(storage)
}
