use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;

use cashbook_rs::{
    db::initialize,
    store::{RecordStore, RecordTable, SqliteRecordStore},
    transaction::{EXPENSE_CATEGORIES, INCOME_CATEGORIES, NewRecord},
};

/// A utility for creating a cashbook database filled with sample records.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The owner the sample records belong to.
    #[arg(long, default_value = "local")]
    owner: String,
}

/// Create and populate a database for manual testing.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let connection = Connection::open(output_path)?;

    initialize(&connection)?;

    let store = SqliteRecordStore::new(Arc::new(Mutex::new(connection)));
    let owner = args.owner.as_str();

    println!("Inserting sample records...");

    let incomes = vec![
        NewRecord::new(owner, 3000.0, INCOME_CATEGORIES[0], "November salary", "2024-11-05")?,
        NewRecord::new(owner, 500.0, INCOME_CATEGORIES[1], "Quarterly bonus", "2024-11-20")?,
        NewRecord::new(owner, 3000.0, INCOME_CATEGORIES[0], "December salary", "2024-12-05")?,
        NewRecord::new(owner, 150.0, INCOME_CATEGORIES[3], "Deposit interest", "2024-12-28")?,
    ];

    let expenses = vec![
        NewRecord::new(owner, 420.5, EXPENSE_CATEGORIES[1], "Weekly groceries", "2024-11-09")?,
        NewRecord::new(owner, 60.0, EXPENSE_CATEGORIES[2], "Metro pass", "2024-11-10")?,
        NewRecord::new(owner, 85.9, EXPENSE_CATEGORIES[0], "Dinner out", "2024-11-23")?,
        NewRecord::new(owner, 230.0, EXPENSE_CATEGORIES[5], "Electricity and water", "2024-12-02")?,
        NewRecord::new(owner, 1200.0, EXPENSE_CATEGORIES[3], "Winter coat", "2024-12-14")?,
    ];

    store.insert_batch(RecordTable::Incomes, incomes).await?;
    store.insert_batch(RecordTable::Expenses, expenses).await?;

    println!("Success!");

    Ok(())
}
