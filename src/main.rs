//! The cashbook command line interface.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use cashbook_rs::{
    Error,
    db::initialize,
    ledger::{
        FilterCriteria, MonthOrder, aggregate_by_month, apply_filter, load_ledger, submit_record,
    },
    session::SingleUserSession,
    sheet::{DEFAULT_EXPORT_FILE, export_sheet, import_sheet, read_sheet_file, write_sheet_file},
    store::SqliteRecordStore,
    transaction::{Transaction, TransactionKind},
};

/// A personal ledger: record incomes and expenses, view monthly totals,
/// and exchange records with spreadsheet files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the ledger SQLite database.
    #[arg(long, default_value = "cashbook.db")]
    database: PathBuf,

    /// The owner whose records are managed.
    #[arg(long, default_value = "local")]
    owner: String,

    #[command(subcommand)]
    command: Command,
}

/// Criteria for narrowing the ledger. All set criteria must match.
#[derive(clap::Args, Debug, Default)]
struct FilterArgs {
    /// Keep entries whose date contains this text.
    #[arg(long)]
    date: Option<String>,

    /// Keep entries of this kind (income or expense).
    #[arg(long)]
    kind: Option<TransactionKind>,

    /// Keep entries whose category contains this text.
    #[arg(long)]
    category: Option<String>,

    /// Keep entries whose description contains this text.
    #[arg(long)]
    description: Option<String>,

    /// Keep entries whose amount contains this text.
    #[arg(long)]
    amount: Option<String>,
}

impl FilterArgs {
    fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            date: self.date,
            kind: self.kind,
            category: self.category,
            description: self.description,
            amount: self.amount,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the merged ledger and its running balance.
    Show {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print the entries as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print the income and expense totals per calendar month.
    Monthly {
        #[command(flatten)]
        filter: FilterArgs,

        /// Sort months by date instead of first appearance in the ledger.
        #[arg(long)]
        chronological: bool,

        /// Print the totals as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Record a single income or expense.
    Add {
        /// Whether the record is an income or an expense.
        #[arg(long)]
        kind: TransactionKind,

        /// The amount of money, as a non-negative number.
        #[arg(long)]
        amount: f64,

        /// The category label.
        #[arg(long)]
        category: String,

        /// A description of the record.
        #[arg(long, default_value = "")]
        description: String,

        /// The calendar date, such as 2024-01-05.
        #[arg(long)]
        date: String,
    },

    /// Import records from a spreadsheet file.
    Import {
        /// The CSV or Excel file to import.
        file: PathBuf,
    },

    /// Export the ledger, optionally filtered, to a CSV file.
    Export {
        /// The CSV file to write.
        #[arg(default_value = DEFAULT_EXPORT_FILE)]
        file: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    if let Err(error) = run(args).await {
        eprintln!("{error}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Error> {
    let connection = Connection::open(&args.database)?;
    initialize(&connection)?;

    let store = SqliteRecordStore::new(Arc::new(Mutex::new(connection)));
    let session = SingleUserSession::new(&args.owner);

    match args.command {
        Command::Show { filter, json } => {
            let ledger = load_ledger(&store, &session).await?;
            let entries = apply_filter(&ledger.transactions, &filter.into_criteria());

            if json {
                println!("{}", to_json(&entries)?);
            } else {
                print_entries(&entries);
                println!("Balance: {}", ledger.balance());
            }
        }
        Command::Monthly {
            filter,
            chronological,
            json,
        } => {
            let order = if chronological {
                MonthOrder::Chronological
            } else {
                MonthOrder::FirstSeen
            };

            let ledger = load_ledger(&store, &session).await?;
            let entries = apply_filter(&ledger.transactions, &filter.into_criteria());
            let buckets = aggregate_by_month(&entries, order);

            if json {
                println!("{}", to_json(&buckets)?);
            } else {
                for bucket in buckets {
                    println!(
                        "{}-{:02}  income {:>12}  expense {:>12}",
                        bucket.year, bucket.month, bucket.income, bucket.expense
                    );
                }
            }
        }
        Command::Add {
            kind,
            amount,
            category,
            description,
            date,
        } => {
            submit_record(&store, &session, kind, amount, &category, &description, &date).await?;

            println!("Recorded {kind} of {amount} on {date}");
        }
        Command::Import { file } => {
            let sheet = read_sheet_file(&file).await?;
            let summary = import_sheet(&store, &session, &sheet).await?;

            println!(
                "Imported {} incomes and {} expenses from {} ({} header, {} rows skipped)",
                summary.incomes_inserted,
                summary.expenses_inserted,
                file.display(),
                summary.language,
                summary.rows_skipped,
            );
        }
        Command::Export { file, filter } => {
            let ledger = load_ledger(&store, &session).await?;
            let entries = apply_filter(&ledger.transactions, &filter.into_criteria());
            let sheet = export_sheet(&entries);

            write_sheet_file(&file, &sheet).await?;

            println!("Exported {} entries to {}", entries.len(), file.display());
        }
    }

    Ok(())
}

/// Send log events to stderr so they never mix with exported data or JSON
/// on stdout. The filter defaults to `info` and follows `RUST_LOG`.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .init();
}

fn print_entries(entries: &[Transaction]) {
    for entry in entries {
        println!(
            "{:<12} {:<8} {:<22} {:<30} {:>12}",
            entry.date, entry.kind, entry.category, entry.description, entry.amount
        );
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, Error> {
    serde_json::to_string_pretty(value).map_err(|error| {
        Error::JSONSerializationError(format!("could not serialize output: {error}"))
    })
}
