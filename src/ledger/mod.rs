//! The merged ledger and its derived views.
//!
//! Everything here is a plain function of the ledger value it is handed.
//! Filtering and monthly totals recompute from the entries each time and
//! never cache, so a view always reflects the exact ledger it was given.

mod core;
mod filter;
mod monthly;
mod submit;

pub use core::{Ledger, balance, load_ledger, load_ledger_for_owner};
pub use filter::{FilterCriteria, apply_filter};
pub use monthly::{MonthOrder, MonthlyBucket, aggregate_by_month};
pub use submit::submit_record;
