//! Cashbook is a command line tool for keeping a personal ledger of
//! incomes and expenses.
//!
//! This library merges per-owner income and expense records into a single
//! [ledger::Ledger] that can be balanced, narrowed with
//! [ledger::FilterCriteria], totalled per calendar month, and exchanged
//! with spreadsheet files through the [sheet] module.

#![warn(missing_docs)]

mod error;

pub mod db;
pub mod ledger;
pub mod session;
pub mod sheet;
pub mod store;
pub mod transaction;

pub use error::Error;
