use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::amount_serde;
use super::record_id::RecordId;

/// Direction of money for a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// Filter applied to transaction listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionFilter {
    #[default]
    All,
    Only(TransactionKind),
}

impl TransactionFilter {
    pub fn matches(self, kind: TransactionKind) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Only(wanted) => wanted == kind,
        }
    }
}

/// A single income or expense entry in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: RecordId,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Always positive; direction comes from `kind`.
    #[serde(deserialize_with = "amount_serde::deserialize")]
    pub amount: f64,

    #[serde(default)]
    pub description: String,

    pub category: String,

    #[serde(default)]
    pub source: String,

    pub date: NaiveDate,
}
