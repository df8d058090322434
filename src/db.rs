//! Sets up the database tables used by the cashbook.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, store::RecordTable};

/// Create the table for `table` in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL
/// error.
pub fn create_record_table(
    connection: &Connection,
    table: RecordTable,
) -> Result<(), rusqlite::Error> {
    let table_name = table.table_name();

    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {table_name} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL
                )"
        ),
        (),
    )?;

    // Index used when loading an owner's side of the ledger.
    connection.execute(
        &format!("CREATE INDEX IF NOT EXISTS idx_{table_name}_owner ON {table_name}(owner_id);"),
        (),
    )?;

    Ok(())
}

/// Create all the tables the cashbook needs, inside a single exclusive
/// transaction.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    for table in [RecordTable::Incomes, RecordTable::Expenses] {
        create_record_table(&transaction, table)?;
    }

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    fn table_names(connection: &Connection) -> Vec<String> {
        connection
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn creates_both_record_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        let names = table_names(&connection);

        assert!(names.contains(&"incomes".to_owned()), "got tables {names:?}");
        assert!(
            names.contains(&"expenses".to_owned()),
            "got tables {names:?}"
        );
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        assert_eq!(initialize(&connection), Ok(()));
    }
}
