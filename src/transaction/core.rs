//! Defines the core data models for ledger records.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The ID of a stored record.
pub type RecordId = i64;

/// The categories suggested for income records.
///
/// Categories are advisory: records accept any string, including the empty
/// one and labels imported from files that were written with a different
/// vocabulary.
pub const INCOME_CATEGORIES: [&str; 5] =
    ["Зарплата", "Премия", "Подработка", "Проценты", "Другое"];

/// The categories suggested for expense records.
pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "Рестораны",
    "Супермаркеты",
    "Транспорт",
    "Одежда",
    "Развлечения",
    "Коммунальные услуги",
    "Кредиты",
    "Другое",
];

// ============================================================================
// MODELS
// ============================================================================

/// Whether a record describes money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionKind {
    /// The categories suggested for records of this kind.
    pub fn suggested_categories(&self) -> &'static [&'static str] {
        match self {
            TransactionKind::Income => &INCOME_CATEGORIES,
            TransactionKind::Expense => &EXPENSE_CATEGORIES,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` keeps width specifiers working in tabular output.
        match self {
            TransactionKind::Income => f.pad("income"),
            TransactionKind::Expense => f.pad("expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(Error::ValidationFailure(format!(
                "\"{other}\" is not a record kind, expected \"income\" or \"expense\""
            ))),
        }
    }
}

/// An entry in the merged ledger: an income or an expense.
///
/// The date is kept as the text it was recorded with. Dates that do not
/// parse as `YYYY-MM-DD` still belong to the ledger; only the monthly
/// aggregation needs to parse them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the stored record this entry came from.
    pub id: RecordId,
    /// Whether this entry is an income or an expense.
    pub kind: TransactionKind,
    /// The amount of money earned or spent, always non-negative.
    pub amount: f64,
    /// The category label of the record.
    pub category: String,
    /// A text description of what the record was for.
    pub description: String,
    /// When the record happened, as recorded.
    pub date: String,
}

/// A record as it is stored, before it is tagged with a kind.
///
/// Incomes and expenses are stored in separate tables with identical
/// shapes, so the kind is implied by the table a record came from and
/// only attached when the record joins the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// The ID of the record.
    pub id: RecordId,
    /// The owner the record belongs to.
    pub owner_id: String,
    /// The amount of money earned or spent.
    pub amount: f64,
    /// The category label of the record.
    pub category: String,
    /// A text description of what the record was for.
    pub description: String,
    /// When the record happened, as recorded.
    pub date: String,
}

impl StoredRecord {
    /// Tag the record with the kind implied by the table it came from.
    pub fn into_transaction(self, kind: TransactionKind) -> Transaction {
        Transaction {
            id: self.id,
            kind,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
        }
    }
}

/// A validated record that has not been stored yet.
///
/// To create a `NewRecord`, use [NewRecord::new].
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    /// The owner the record will belong to.
    pub owner_id: String,
    /// The amount of money earned or spent, always non-negative.
    pub amount: f64,
    /// The category label of the record.
    pub category: String,
    /// A text description of what the record was for.
    pub description: String,
    /// When the record happened.
    pub date: String,
}

impl NewRecord {
    /// Create a new record after validating the amount.
    ///
    /// Amounts carry no sign, the table a record is inserted into decides
    /// whether it counts for or against the balance.
    ///
    /// # Errors
    /// This function will return a [Error::ValidationFailure] if `amount` is
    /// negative, NaN or infinite.
    pub fn new(
        owner_id: &str,
        amount: f64,
        category: &str,
        description: &str,
        date: &str,
    ) -> Result<Self, Error> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::ValidationFailure(format!(
                "amount must be a non-negative number, got {amount}"
            )));
        }

        Ok(Self {
            owner_id: owner_id.to_owned(),
            amount,
            category: category.to_owned(),
            description: description.to_owned(),
            date: date.to_owned(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod transaction_kind_tests {
    use std::str::FromStr;

    use crate::{Error, transaction::TransactionKind};

    #[test]
    fn display_uses_lowercase_names() {
        assert_eq!(TransactionKind::Income.to_string(), "income");
        assert_eq!(TransactionKind::Expense.to_string(), "expense");
    }

    #[test]
    fn parses_lowercase_names() {
        assert_eq!(
            TransactionKind::from_str("income"),
            Ok(TransactionKind::Income)
        );
        assert_eq!(
            TransactionKind::from_str("expense"),
            Ok(TransactionKind::Expense)
        );
    }

    #[test]
    fn rejects_unknown_names() {
        let got = TransactionKind::from_str("transfer");

        assert!(
            matches!(got, Err(Error::ValidationFailure(_))),
            "want validation failure, got {got:?}"
        );
    }

    #[test]
    fn suggested_categories_differ_by_kind() {
        assert!(
            TransactionKind::Income
                .suggested_categories()
                .contains(&"Зарплата")
        );
        assert!(
            TransactionKind::Expense
                .suggested_categories()
                .contains(&"Рестораны")
        );
    }
}
