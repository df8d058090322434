//! Buckets the ledger into calendar month totals.

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::transaction::{Transaction, TransactionKind};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// The calendar year of the bucket.
    pub year: i32,
    /// The calendar month of the bucket, 1 through 12.
    pub month: u8,
    /// The sum of income amounts in this month.
    pub income: f64,
    /// The sum of expense amounts in this month.
    pub expense: f64,
}

/// The order monthly buckets are returned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthOrder {
    /// Buckets appear in the order their month was first seen in the
    /// ledger, matching the order the entries themselves are shown in.
    #[default]
    FirstSeen,
    /// Buckets are sorted by year, then month.
    Chronological,
}

/// Total `transactions` per calendar month.
///
/// A month with entries of only one kind still gets a bucket, with the
/// other total at zero. Entries whose date does not parse as `YYYY-MM-DD`
/// are left out of the totals entirely, and a month seen only through such
/// entries gets no bucket.
pub fn aggregate_by_month(transactions: &[Transaction], order: MonthOrder) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<MonthlyBucket> = Vec::new();

    for transaction in transactions {
        let Ok(date) = Date::parse(&transaction.date, &DATE_FORMAT) else {
            tracing::debug!(
                "leaving \"{}\" out of the monthly totals: \"{}\" is not a calendar date",
                transaction.description,
                transaction.date
            );
            continue;
        };

        let year = date.year();
        let month = u8::from(date.month());

        let position = buckets
            .iter()
            .position(|bucket| bucket.year == year && bucket.month == month)
            .unwrap_or_else(|| {
                buckets.push(MonthlyBucket {
                    year,
                    month,
                    income: 0.0,
                    expense: 0.0,
                });
                buckets.len() - 1
            });

        let bucket = &mut buckets[position];

        match transaction.kind {
            TransactionKind::Income => bucket.income += transaction.amount,
            TransactionKind::Expense => bucket.expense += transaction.amount,
        }
    }

    if order == MonthOrder::Chronological {
        buckets.sort_by_key(|bucket| (bucket.year, bucket.month));
    }

    buckets
}
