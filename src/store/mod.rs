//! Storage for ledger records.
//!
//! Records live in two tables with identical shapes, one per record kind.
//! The [RecordStore] trait is the only way the engine reads or writes them,
//! so the SQLite store can be swapped out for a test double or another
//! backend without touching the ledger logic.

mod sqlite;

use async_trait::async_trait;

pub use sqlite::{SqliteRecordStore, map_record_row};

use crate::{
    Error,
    transaction::{NewRecord, StoredRecord, TransactionKind},
};

/// The tables records are stored in, one per record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTable {
    /// The table holding income records.
    Incomes,
    /// The table holding expense records.
    Expenses,
}

impl RecordTable {
    /// The SQL name of the table.
    pub fn table_name(&self) -> &'static str {
        match self {
            RecordTable::Incomes => "incomes",
            RecordTable::Expenses => "expenses",
        }
    }
}

impl From<TransactionKind> for RecordTable {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => RecordTable::Incomes,
            TransactionKind::Expense => RecordTable::Expenses,
        }
    }
}

/// Reads and writes ledger records for the engine.
#[async_trait]
pub trait RecordStore {
    /// Retrieve all of `owner_id`'s records from `table`, in insertion
    /// order.
    ///
    /// An owner with no records gets an empty list, not an error.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    async fn fetch_by_owner(
        &self,
        table: RecordTable,
        owner_id: &str,
    ) -> Result<Vec<StoredRecord>, Error>;

    /// Insert `records` into `table` atomically.
    ///
    /// Either every record in the batch is inserted or none are. An empty
    /// batch is a no-op.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    async fn insert_batch(&self, table: RecordTable, records: Vec<NewRecord>)
    -> Result<(), Error>;
}
