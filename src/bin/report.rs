use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rusqlite::Connection;

use finance_tracker::{
    BudgetMonth, BudgetThresholds, CategoryLookup, DashboardConfig, DashboardReport,
    LedgerReader, SqliteLedger, UserId, build_dashboard, export_transactions_csv,
    format_currency, get_user_by_id, initialize_db, set_budget, setup_logging, today_in,
};

/// Prints the dashboard of a finance_tracker user, exports their transactions and sets budgets.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database.
    #[arg(long, short)]
    db_path: PathBuf,

    /// The ID of the user to report on.
    #[arg(long, short)]
    user_id: i64,

    /// The canonical timezone used to work out today's date, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// The log level used when `RUST_LOG` is not set.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the totals, category breakdown, trend, budgets and goals for the current month.
    Dashboard {
        /// How to print the dashboard.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// How many days, ending today, the trend covers.
        #[arg(long, default_value_t = 30)]
        trend_days: u32,

        /// The fraction of a budget at which spending is reported as "near".
        #[arg(long, default_value_t = 0.8)]
        near_fraction: f64,

        /// Include days without transactions in the trend.
        #[arg(long)]
        zero_fill: bool,
    },
    /// Export all of the user's transactions as CSV.
    Export {
        /// Where to write the CSV file, defaults to stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Set the budget of a category for a month, replacing any existing budget.
    SetBudget {
        #[arg(long)]
        category_id: i64,

        /// The month number, 1-12.
        #[arg(long)]
        month: u8,

        #[arg(long)]
        year: i32,

        #[arg(long)]
        amount: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging(&args.log_level);

    let conn = Connection::open(&args.db_path)?;
    initialize_db(&conn)?;

    let user = get_user_by_id(UserId::new(args.user_id), &conn)?;
    let ledger = SqliteLedger::new(user.id, &conn);

    match args.command {
        Command::Dashboard {
            format,
            trend_days,
            near_fraction,
            zero_fill,
        } => {
            let today = today_in(&args.timezone)?;
            let config = DashboardConfig {
                trend_window_days: trend_days,
                zero_fill_trend: zero_fill,
                budget_thresholds: BudgetThresholds { near_fraction },
            };
            let report = build_dashboard(&ledger, today, &config)?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => {
                    let categories = CategoryLookup::new(ledger.categories()?);
                    print_text_report(&report, &categories, io::stdout().lock())?;
                }
            }
        }
        Command::Export { output } => {
            let transactions = ledger.transactions(None)?;
            let categories = CategoryLookup::new(ledger.categories()?);

            match output {
                Some(path) => {
                    export_transactions_csv(&transactions, &categories, File::create(&path)?)?;
                    eprintln!("Exported {} transactions to {path:#?}", transactions.len());
                }
                None => export_transactions_csv(&transactions, &categories, io::stdout().lock())?,
            }
        }
        Command::SetBudget {
            category_id,
            month,
            year,
            amount,
        } => {
            let period = BudgetMonth::new(year, month)?;
            let budget = set_budget(user.id, category_id, period, amount, &conn)?;
            println!(
                "Budget for category {} in {period} is now {}",
                budget.category_id,
                format_currency(budget.amount)
            );
        }
    }

    Ok(())
}

fn print_text_report(
    report: &DashboardReport,
    categories: &CategoryLookup,
    mut out: impl Write,
) -> io::Result<()> {
    writeln!(out, "Dashboard as of {}", report.as_of)?;
    writeln!(out)?;
    writeln!(out, "Income:   {}", format_currency(report.totals.income))?;
    writeln!(out, "Expenses: {}", format_currency(report.totals.expenses))?;
    writeln!(out, "Balance:  {}", format_currency(report.totals.balance))?;

    if !report.category_breakdown.is_empty() {
        writeln!(out)?;
        writeln!(out, "Spending by category")?;

        for (label, value) in report
            .category_breakdown
            .labels
            .iter()
            .zip(&report.category_breakdown.values)
        {
            writeln!(out, "  {label:<20} {}", format_currency(*value))?;
        }
    }

    if !report.trend.dates.is_empty() {
        writeln!(out)?;
        writeln!(out, "Daily activity")?;

        for ((date, income), expenses) in report
            .trend
            .dates
            .iter()
            .zip(&report.trend.income)
            .zip(&report.trend.expenses)
        {
            writeln!(
                out,
                "  {date}  +{}  -{}",
                format_currency(*income),
                format_currency(*expenses)
            )?;
        }
    }

    if !report.budgets.is_empty() {
        writeln!(out)?;
        writeln!(out, "Budgets")?;

        for budget in &report.budgets {
            let name = categories.resolve(Some(budget.category_id)).label();
            writeln!(
                out,
                "  {name:<20} {} of {} ({}, {} left)",
                format_currency(budget.actual),
                format_currency(budget.budgeted),
                budget.status,
                format_currency(budget.remaining)
            )?;
        }
    }

    if !report.goals.is_empty() {
        writeln!(out)?;
        writeln!(out, "Goals")?;

        for summary in &report.goals {
            let progress = &summary.progress;
            write!(
                out,
                "  {:<20} {:.1}% ({} to go)",
                summary.goal.title,
                progress.percent_complete,
                format_currency(progress.amount_remaining)
            )?;

            if let Some(days) = progress.days_remaining {
                write!(out, ", {days} days left")?;
            }

            writeln!(out)?;
        }
    }

    Ok(())
}
