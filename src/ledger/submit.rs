//! Records a single income or expense for the signed-in owner.

use crate::{
    Error,
    session::SessionProvider,
    store::{RecordStore, RecordTable},
    transaction::{NewRecord, TransactionKind},
};

/// Validate and store one record for the current owner.
///
/// The record goes into the table for `kind`; the ledger picks it up on
/// the next load.
///
/// # Errors
/// This function will return a:
/// - [Error::NoSession] if nobody is signed in,
/// - [Error::ValidationFailure] if `amount` is negative, NaN or infinite,
/// - or [Error::SqlError] if the insert fails.
pub async fn submit_record<S, P>(
    store: &S,
    session: &P,
    kind: TransactionKind,
    amount: f64,
    category: &str,
    description: &str,
    date: &str,
) -> Result<(), Error>
where
    S: RecordStore + Sync,
    P: SessionProvider,
{
    let owner_id = session.current_owner().ok_or(Error::NoSession)?;

    let record = NewRecord::new(&owner_id, amount, category, description, date)?;

    store
        .insert_batch(RecordTable::from(kind), vec![record])
        .await
}

#[cfg(test)]
mod submit_record_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        ledger::{load_ledger, submit_record},
        session::{SessionProvider, SingleUserSession},
        store::{RecordStore, RecordTable, SqliteRecordStore},
        transaction::TransactionKind,
    };

    struct NobodySession;

    impl SessionProvider for NobodySession {
        fn current_owner(&self) -> Option<String> {
            None
        }
    }

    fn get_test_store() -> SqliteRecordStore {
        let connection = Connection::open_in_memory().expect("could not open database");
        initialize(&connection).expect("could not initialize database");

        SqliteRecordStore::new(Arc::new(Mutex::new(connection)))
    }

    #[tokio::test]
    async fn submitted_record_shows_up_in_the_ledger() {
        let store = get_test_store();
        let session = SingleUserSession::new("local");

        submit_record(
            &store,
            &session,
            TransactionKind::Expense,
            300.0,
            "Супермаркеты",
            "Groceries",
            "2024-01-20",
        )
        .await
        .expect("could not submit record");

        let ledger = load_ledger(&store, &session)
            .await
            .expect("could not load ledger");

        assert_eq!(ledger.transactions.len(), 1);
        assert_eq!(ledger.transactions[0].kind, TransactionKind::Expense);
        assert_eq!(ledger.transactions[0].amount, 300.0);
        assert_eq!(ledger.transactions[0].category, "Супермаркеты");
    }

    #[tokio::test]
    async fn negative_amounts_are_rejected_before_the_store() {
        let store = get_test_store();
        let session = SingleUserSession::new("local");

        let got = submit_record(
            &store,
            &session,
            TransactionKind::Income,
            -5.0,
            "Зарплата",
            "",
            "2024-01-05",
        )
        .await;

        assert!(
            matches!(got, Err(Error::ValidationFailure(_))),
            "want validation failure, got {got:?}"
        );

        let stored = store
            .fetch_by_owner(RecordTable::Incomes, "local")
            .await
            .expect("could not fetch records");

        assert!(stored.is_empty(), "rejected record was stored: {stored:?}");
    }

    #[tokio::test]
    async fn submit_fails_without_a_session() {
        let store = get_test_store();

        let got = submit_record(
            &store,
            &NobodySession,
            TransactionKind::Income,
            1.0,
            "Другое",
            "",
            "2024-01-05",
        )
        .await;

        assert_eq!(got, Err(Error::NoSession));
    }
}
