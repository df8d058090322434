//! Stores ledger records in a SQLite database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, Row};

use crate::{
    Error,
    store::{RecordStore, RecordTable},
    transaction::{NewRecord, StoredRecord},
};

/// Stores ledger records in a SQLite database.
///
/// The store holds a shared connection and takes the lock for the duration
/// of each call, so clones of the store can be used from multiple tasks.
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteRecordStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The tables must have been set up with
    /// [initialize](crate::db::initialize) first.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn fetch_by_owner(
        &self,
        table: RecordTable,
        owner_id: &str,
    ) -> Result<Vec<StoredRecord>, Error> {
        let query_string = format!(
            "SELECT id, owner_id, amount, category, description, date
             FROM {}
             WHERE owner_id = :owner_id
             ORDER BY id ASC",
            table.table_name()
        );

        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let records = connection
            .prepare(&query_string)?
            .query_map(&[(":owner_id", &owner_id)], map_record_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    async fn insert_batch(
        &self,
        table: RecordTable,
        records: Vec<NewRecord>,
    ) -> Result<(), Error> {
        if records.is_empty() {
            return Ok(());
        }

        let record_count = records.len();

        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let tx = connection.unchecked_transaction()?;

        // Prepare the insert statement once for reuse
        let mut statement = tx.prepare(&format!(
            "INSERT INTO {} (owner_id, amount, category, description, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            table.table_name()
        ))?;

        for record in records {
            statement.execute((
                record.owner_id,
                record.amount,
                record.category,
                record.description,
                record.date,
            ))?;
        }

        drop(statement);

        tx.commit()?;

        tracing::debug!(
            "inserted {record_count} records into {}",
            table.table_name()
        );

        Ok(())
    }
}

/// Map a database row to a StoredRecord.
pub fn map_record_row(row: &Row) -> Result<StoredRecord, rusqlite::Error> {
    let id = row.get(0)?;
    let owner_id = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let description = row.get(4)?;
    let date = row.get(5)?;

    Ok(StoredRecord {
        id,
        owner_id,
        amount,
        category,
        description,
        date,
    })
}

#[cfg(test)]
mod sqlite_record_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        db::initialize,
        store::{RecordStore, RecordTable, SqliteRecordStore},
        transaction::NewRecord,
    };

    fn get_test_store() -> SqliteRecordStore {
        let connection = Connection::open_in_memory().expect("could not open database");
        initialize(&connection).expect("could not initialize database");

        SqliteRecordStore::new(Arc::new(Mutex::new(connection)))
    }

    fn record(owner_id: &str, amount: f64, description: &str) -> NewRecord {
        NewRecord::new(owner_id, amount, "Другое", description, "2024-01-05")
            .expect("could not create record")
    }

    #[tokio::test]
    async fn fetch_from_empty_table_returns_no_records() {
        let store = get_test_store();

        let got = store
            .fetch_by_owner(RecordTable::Incomes, "local")
            .await
            .expect("could not fetch records");

        assert!(got.is_empty(), "want no records, got {got:?}");
    }

    #[tokio::test]
    async fn insert_batch_round_trips_through_fetch() {
        let store = get_test_store();
        let records = vec![
            record("local", 1000.0, "Salary"),
            record("local", 250.5, "Bonus"),
        ];

        store
            .insert_batch(RecordTable::Incomes, records.clone())
            .await
            .expect("could not insert records");

        let got = store
            .fetch_by_owner(RecordTable::Incomes, "local")
            .await
            .expect("could not fetch records");

        assert_eq!(got.len(), 2);

        for (want, got) in records.iter().zip(&got) {
            assert_eq!(want.owner_id, got.owner_id);
            assert_eq!(want.amount, got.amount);
            assert_eq!(want.category, got.category);
            assert_eq!(want.description, got.description);
            assert_eq!(want.date, got.date);
        }
    }

    #[tokio::test]
    async fn fetch_preserves_insertion_order() {
        let store = get_test_store();
        let descriptions = ["first", "second", "third"];

        let records = descriptions
            .iter()
            .map(|description| record("local", 1.0, description))
            .collect();

        store
            .insert_batch(RecordTable::Expenses, records)
            .await
            .expect("could not insert records");

        let got = store
            .fetch_by_owner(RecordTable::Expenses, "local")
            .await
            .expect("could not fetch records");

        let got_descriptions: Vec<&str> = got
            .iter()
            .map(|record| record.description.as_str())
            .collect();

        assert_eq!(got_descriptions, descriptions);
    }

    #[tokio::test]
    async fn fetch_only_returns_the_owners_records() {
        let store = get_test_store();

        store
            .insert_batch(
                RecordTable::Incomes,
                vec![record("alice", 100.0, "hers"), record("bob", 200.0, "his")],
            )
            .await
            .expect("could not insert records");

        let got = store
            .fetch_by_owner(RecordTable::Incomes, "alice")
            .await
            .expect("could not fetch records");

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].description, "hers");
    }

    #[tokio::test]
    async fn tables_do_not_share_records() {
        let store = get_test_store();

        store
            .insert_batch(RecordTable::Incomes, vec![record("local", 100.0, "income")])
            .await
            .expect("could not insert records");

        let got = store
            .fetch_by_owner(RecordTable::Expenses, "local")
            .await
            .expect("could not fetch records");

        assert!(got.is_empty(), "want no expenses, got {got:?}");
    }

    #[tokio::test]
    async fn insert_empty_batch_is_a_no_op() {
        let store = get_test_store();

        store
            .insert_batch(RecordTable::Incomes, Vec::new())
            .await
            .expect("could not insert empty batch");

        let got = store
            .fetch_by_owner(RecordTable::Incomes, "local")
            .await
            .expect("could not fetch records");

        assert!(got.is_empty());
    }

    #[tokio::test]
    async fn records_get_sequential_ids() {
        let store = get_test_store();

        store
            .insert_batch(
                RecordTable::Incomes,
                vec![record("local", 1.0, "a"), record("local", 2.0, "b")],
            )
            .await
            .expect("could not insert records");

        let got = store
            .fetch_by_owner(RecordTable::Incomes, "local")
            .await
            .expect("could not fetch records");

        assert_eq!(got[0].id, 1);
        assert_eq!(got[1].id, 2);
    }
}
