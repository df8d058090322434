//! Ledger records for the cashbook.
//!
//! This module contains everything related to individual records:
//! - The `Transaction` model that entries take once they join the ledger
//! - The `StoredRecord` and `NewRecord` models for records at rest and
//!   records on their way into the store
//! - The suggested category vocabularies for each record kind

mod core;

pub use core::{
    EXPENSE_CATEGORIES, INCOME_CATEGORIES, NewRecord, RecordId, StoredRecord, Transaction,
    TransactionKind,
};
