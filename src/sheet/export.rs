//! Serializes ledger entries into the fixed spreadsheet layout.

use crate::{
    ledger::balance,
    sheet::{Cell, Sheet},
    transaction::Transaction,
};

/// The fixed header row of exported sheets, regardless of locale.
pub const EXPORT_HEADER: [&str; 5] = ["Дата", "Тип", "Категория", "Описание", "Сумма"];

/// The label placed next to the trailing balance cell.
pub const BALANCE_LABEL: &str = "Итоговый баланс:";

/// The file name exports are written to when the caller does not pick one.
pub const DEFAULT_EXPORT_FILE: &str = "доходы_расходы.csv";

/// Lay `transactions` out as a single-sheet tabular document.
///
/// The sheet has the fixed header, one row per entry in the order given,
/// and a trailing row carrying the balance of exactly the entries in the
/// sheet. The exporter takes whatever slice it is handed, so exporting a
/// filtered ledger exports the filtered entries and their balance.
pub fn export_sheet(transactions: &[Transaction]) -> Sheet {
    let mut rows = Vec::with_capacity(transactions.len() + 2);

    rows.push(
        EXPORT_HEADER
            .iter()
            .map(|label| Cell::from(*label))
            .collect(),
    );

    for transaction in transactions {
        rows.push(vec![
            Cell::Text(transaction.date.clone()),
            Cell::Text(transaction.kind.to_string()),
            Cell::Text(transaction.category.clone()),
            Cell::Text(transaction.description.clone()),
            Cell::Number(transaction.amount),
        ]);
    }

    rows.push(vec![
        Cell::Empty,
        Cell::Empty,
        Cell::Empty,
        Cell::Text(BALANCE_LABEL.to_owned()),
        Cell::Number(balance(transactions)),
    ]);

    Sheet { rows }
}
