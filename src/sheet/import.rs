//! Turns a decoded spreadsheet grid into validated, stored ledger records.

use std::fmt;

use crate::{
    Error,
    session::SessionProvider,
    sheet::{Cell, Sheet},
    store::{RecordStore, RecordTable},
    transaction::{NewRecord, TransactionKind},
};

// Column positions are fixed. The header language changes the labels, never
// the layout.
const DATE_COLUMN: usize = 0;
const TYPE_COLUMN: usize = 1;
const CATEGORY_COLUMN: usize = 2;
const DESCRIPTION_COLUMN: usize = 3;
const AMOUNT_COLUMN: usize = 4;

/// The number of cells a ledger sheet row must have.
pub const SHEET_COLUMNS: usize = 5;

/// The header language detected on an imported sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetLanguage {
    /// A header containing Cyrillic text.
    Russian,
    /// Any other header.
    English,
}

impl fmt::Display for SheetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetLanguage::Russian => write!(f, "Russian"),
            SheetLanguage::English => write!(f, "English"),
        }
    }
}

/// The validated batches produced from a sheet, ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetBatches {
    /// The detected header language.
    pub language: SheetLanguage,
    /// Income records in sheet order, stamped with the importing owner.
    pub incomes: Vec<NewRecord>,
    /// Expense records in sheet order, stamped with the importing owner.
    pub expenses: Vec<NewRecord>,
    /// How many data rows had a type that is neither income nor expense.
    pub rows_skipped: usize,
}

/// What a successful import did.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    /// The detected header language.
    pub language: SheetLanguage,
    /// How many income records were inserted.
    pub incomes_inserted: usize,
    /// How many expense records were inserted.
    pub expenses_inserted: usize,
    /// How many data rows were skipped because of their type cell. The
    /// trailing balance row of an exported sheet lands here.
    pub rows_skipped: usize,
}

/// Validate `sheet` and split its data rows into owner-stamped income and
/// expense batches.
///
/// Validation is all-or-nothing: every data row is checked for shape and a
/// parseable amount before any row is partitioned, and the first bad row
/// aborts the whole sheet. Rows whose lower-cased type cell is neither
/// `income` nor `expense` are dropped and counted rather than rejected, so
/// exported sheets, whose trailing balance row has an empty type, import
/// cleanly.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidSheet] if the sheet has no data rows,
/// - [Error::MalformedRow] if a data row has fewer than
///   [SHEET_COLUMNS] cells,
/// - or [Error::InvalidAmount] if an amount cell does not parse as a
///   finite number, or a partitioned row carries a negative amount.
pub fn partition_sheet(sheet: &Sheet, owner_id: &str) -> Result<SheetBatches, Error> {
    if sheet.rows.len() < 2 {
        return Err(Error::InvalidSheet(
            "the sheet is empty or has no data rows".to_owned(),
        ));
    }

    let language = detect_language(&sheet.rows[0]);

    let mut incomes = Vec::new();
    let mut expenses = Vec::new();
    let mut rows_skipped = 0;

    for (row_index, row) in sheet.rows.iter().enumerate().skip(1) {
        if row.len() < SHEET_COLUMNS {
            return Err(Error::MalformedRow {
                row_index,
                reason: format!(
                    "expected at least {SHEET_COLUMNS} cells, found {}",
                    row.len()
                ),
            });
        }

        let amount_cell = &row[AMOUNT_COLUMN];
        let Some(amount) = cell_amount(amount_cell) else {
            return Err(Error::InvalidAmount {
                row_index,
                value: amount_cell.text(),
            });
        };

        let type_text = row[TYPE_COLUMN].text().to_lowercase();
        let kind = match type_text.as_str() {
            "income" => TransactionKind::Income,
            "expense" => TransactionKind::Expense,
            other => {
                tracing::debug!("skipping row {row_index}: \"{other}\" is not a record type");
                rows_skipped += 1;
                continue;
            }
        };

        let record = NewRecord::new(
            owner_id,
            amount,
            &row[CATEGORY_COLUMN].text(),
            &row[DESCRIPTION_COLUMN].text(),
            &row[DATE_COLUMN].text(),
        )
        .map_err(|_| Error::InvalidAmount {
            row_index,
            value: amount_cell.text(),
        })?;

        match kind {
            TransactionKind::Income => incomes.push(record),
            TransactionKind::Expense => expenses.push(record),
        }
    }

    Ok(SheetBatches {
        language,
        incomes,
        expenses,
        rows_skipped,
    })
}

/// Import a decoded sheet for the current owner: validate, partition, and
/// persist both batches.
///
/// Incomes are inserted first, then expenses, each batch atomically.
///
/// # Errors
/// This function will return a:
/// - [Error::NoSession] if nobody is signed in,
/// - any error [partition_sheet] returns, before anything is inserted,
/// - or [Error::ImportPersistFailure] if an insert fails.
pub async fn import_sheet<S, P>(
    store: &S,
    session: &P,
    sheet: &Sheet,
) -> Result<ImportSummary, Error>
where
    S: RecordStore + Sync,
    P: SessionProvider,
{
    let owner_id = session.current_owner().ok_or(Error::NoSession)?;

    let SheetBatches {
        language,
        incomes,
        expenses,
        rows_skipped,
    } = partition_sheet(sheet, &owner_id)?;

    let incomes_inserted = incomes.len();
    let expenses_inserted = expenses.len();

    store
        .insert_batch(RecordTable::Incomes, incomes)
        .await
        .map_err(|error| {
            Error::ImportPersistFailure(format!("could not insert incomes: {error}"))
        })?;

    store
        .insert_batch(RecordTable::Expenses, expenses)
        .await
        .map_err(|error| {
            Error::ImportPersistFailure(format!("could not insert expenses: {error}"))
        })?;

    tracing::info!(
        "imported {incomes_inserted} incomes and {expenses_inserted} expenses, \
         skipped {rows_skipped} rows"
    );

    Ok(ImportSummary {
        language,
        incomes_inserted,
        expenses_inserted,
        rows_skipped,
    })
}

/// The amount a cell carries, if it holds a finite number or text that
/// parses as one.
fn cell_amount(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(number) => number.is_finite().then_some(*number),
        Cell::Text(text) => {
            let value: f64 = text.trim().parse().ok()?;
            value.is_finite().then_some(value)
        }
        Cell::Empty => None,
    }
}

fn detect_language(header: &[Cell]) -> SheetLanguage {
    if header.iter().any(Cell::has_cyrillic) {
        SheetLanguage::Russian
    } else {
        SheetLanguage::English
    }
}
