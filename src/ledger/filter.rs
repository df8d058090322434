//! Narrows the ledger down to the entries matching a set of criteria.

use serde::{Deserialize, Serialize};

use crate::transaction::{Transaction, TransactionKind};

/// The criteria a ledger entry is matched against.
///
/// Fields that are `None` are not applied. When several fields are set, an
/// entry must match all of them to be kept.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Keep entries whose date text contains this text.
    pub date: Option<String>,
    /// Keep entries of this kind.
    pub kind: Option<TransactionKind>,
    /// Keep entries whose category contains this text.
    pub category: Option<String>,
    /// Keep entries whose description contains this text.
    pub description: Option<String>,
    /// Keep entries whose amount, written in decimal, contains this text.
    pub amount: Option<String>,
}

impl FilterCriteria {
    /// Whether no criteria are set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Whether `transaction` matches every criterion that is set.
    ///
    /// Text criteria are case-sensitive substring matches. The amount is
    /// matched against its shortest decimal representation, so `"00"`
    /// matches an amount of `1000` and `"1000.0"` does not.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(date) = &self.date {
            if !transaction.date.contains(date.as_str()) {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if transaction.kind != kind {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if !transaction.category.contains(category.as_str()) {
                return false;
            }
        }

        if let Some(description) = &self.description {
            if !transaction.description.contains(description.as_str()) {
                return false;
            }
        }

        if let Some(amount) = &self.amount {
            if !transaction.amount.to_string().contains(amount.as_str()) {
                return false;
            }
        }

        true
    }
}

/// Keep the entries of `transactions` that match `criteria`, in their
/// original order.
///
/// The result is a fresh list; the ledger itself is never reordered or
/// mutated, and filtering always starts from the full slice it is given
/// rather than layering on a previous result.
pub fn apply_filter(transactions: &[Transaction], criteria: &FilterCriteria) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| criteria.matches(transaction))
        .cloned()
        .collect()
}
