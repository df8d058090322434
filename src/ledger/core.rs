//! Builds the merged ledger out of the stored record streams.

use crate::{
    Error,
    session::SessionProvider,
    store::{RecordStore, RecordTable},
    transaction::{StoredRecord, Transaction, TransactionKind},
};

/// The merged view of an owner's records: all incomes followed by all
/// expenses, each stream in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ledger {
    /// The merged entries.
    pub transactions: Vec<Transaction>,
}

impl Ledger {
    /// Merge the two record streams into a single ledger.
    ///
    /// Incomes come first, then expenses, and within each stream the
    /// incoming order is kept, so merging the same streams always produces
    /// the same ledger.
    pub fn merge(incomes: Vec<StoredRecord>, expenses: Vec<StoredRecord>) -> Self {
        let transactions = incomes
            .into_iter()
            .map(|record| record.into_transaction(TransactionKind::Income))
            .chain(
                expenses
                    .into_iter()
                    .map(|record| record.into_transaction(TransactionKind::Expense)),
            )
            .collect();

        Self { transactions }
    }

    /// The running balance over the whole ledger.
    pub fn balance(&self) -> f64 {
        balance(&self.transactions)
    }
}

/// Sum `transactions`, counting incomes for and expenses against.
///
/// An empty slice has a balance of zero. The balance may well be negative;
/// the non-negativity rule applies to individual amounts, not the total.
pub fn balance(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(|transaction| match transaction.kind {
            TransactionKind::Income => transaction.amount,
            TransactionKind::Expense => -transaction.amount,
        })
        .sum()
}

/// Load the current owner's ledger from the store.
///
/// # Errors
/// This function will return a:
/// - [Error::NoSession] if nobody is signed in,
/// - or [Error::DataUnavailable] if either record stream could not be
///   fetched.
pub async fn load_ledger<S, P>(store: &S, session: &P) -> Result<Ledger, Error>
where
    S: RecordStore + Sync,
    P: SessionProvider,
{
    let owner_id = session.current_owner().ok_or(Error::NoSession)?;

    load_ledger_for_owner(store, &owner_id).await
}

/// Load `owner_id`'s ledger from the store.
///
/// A failed fetch fails the whole load. Neither stream silently falls back
/// to an empty list, since a half-loaded ledger would report a wrong
/// balance.
///
/// # Errors
/// This function will return an [Error::DataUnavailable] if either record
/// stream could not be fetched.
pub async fn load_ledger_for_owner<S>(store: &S, owner_id: &str) -> Result<Ledger, Error>
where
    S: RecordStore + Sync,
{
    let incomes = store
        .fetch_by_owner(RecordTable::Incomes, owner_id)
        .await
        .map_err(|error| Error::DataUnavailable(format!("could not fetch incomes: {error}")))?;

    let expenses = store
        .fetch_by_owner(RecordTable::Expenses, owner_id)
        .await
        .map_err(|error| Error::DataUnavailable(format!("could not fetch expenses: {error}")))?;

    Ok(Ledger::merge(incomes, expenses))
}

#[cfg(test)]
mod merge_tests {
    use crate::{
        ledger::{Ledger, balance},
        transaction::{StoredRecord, TransactionKind},
    };

    fn record(id: i64, amount: f64, date: &str) -> StoredRecord {
        StoredRecord {
            id,
            owner_id: "local".to_owned(),
            amount,
            category: "Другое".to_owned(),
            description: String::new(),
            date: date.to_owned(),
        }
    }

    #[test]
    fn merge_keeps_incomes_before_expenses() {
        let incomes = vec![record(1, 1000.0, "2024-01-05"), record(2, 200.0, "2024-02-11")];
        let expenses = vec![record(1, 300.0, "2024-01-20"), record(2, 200.0, "2024-02-14")];

        let ledger = Ledger::merge(incomes, expenses);

        let got_kinds: Vec<TransactionKind> = ledger
            .transactions
            .iter()
            .map(|transaction| transaction.kind)
            .collect();

        assert_eq!(
            got_kinds,
            vec![
                TransactionKind::Income,
                TransactionKind::Income,
                TransactionKind::Expense,
                TransactionKind::Expense,
            ]
        );
    }

    #[test]
    fn merge_keeps_each_streams_order() {
        let incomes = vec![record(1, 1.0, "2024-03-01"), record(2, 2.0, "2024-01-01")];
        let expenses = vec![record(1, 3.0, "2024-02-01")];

        let ledger = Ledger::merge(incomes, expenses);

        let got_dates: Vec<&str> = ledger
            .transactions
            .iter()
            .map(|transaction| transaction.date.as_str())
            .collect();

        // Insertion order wins over date order.
        assert_eq!(got_dates, vec!["2024-03-01", "2024-01-01", "2024-02-01"]);
    }

    #[test]
    fn merge_of_empty_streams_is_empty() {
        let ledger = Ledger::merge(Vec::new(), Vec::new());

        assert!(ledger.transactions.is_empty());
        assert_eq!(ledger.balance(), 0.0);
    }

    #[test]
    fn merge_keeps_unparseable_dates() {
        let incomes = vec![record(1, 10.0, "someday")];

        let ledger = Ledger::merge(incomes, Vec::new());

        assert_eq!(ledger.transactions[0].date, "someday");
    }

    #[test]
    fn balance_counts_expenses_against_incomes() {
        let incomes = vec![record(1, 1000.0, "2024-01-05"), record(2, 200.0, "2024-02-11")];
        let expenses = vec![record(1, 300.0, "2024-01-20"), record(2, 200.0, "2024-02-14")];

        let ledger = Ledger::merge(incomes, expenses);

        assert_eq!(ledger.balance(), 700.0);
    }

    #[test]
    fn balance_can_go_negative() {
        let expenses = vec![record(1, 42.5, "2024-01-01")];

        let ledger = Ledger::merge(Vec::new(), expenses);

        assert_eq!(balance(&ledger.transactions), -42.5);
    }
}
