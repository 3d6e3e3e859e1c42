use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::amount_serde;
use super::obligation::{Obligation, ObligationKind};
use super::record_id::RecordId;
use super::transaction::Transaction;

/// The main data container. This is the document that gets serialized
/// under the storage key and written out on export.
///
/// `savings_balance` is the manually entered figure for cash actually set
/// aside. It is never derived from, or reconciled with, the per-obligation
/// savings logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetData {
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub subscriptions: Vec<Obligation>,

    #[serde(default)]
    pub bills: Vec<Obligation>,

    #[serde(default)]
    pub budgets: Vec<Budget>,

    #[serde(default, deserialize_with = "amount_serde::deserialize_or_zero")]
    pub savings_balance: f64,
}

impl BudgetData {
    pub fn obligations(&self, kind: ObligationKind) -> &[Obligation] {
        match kind {
            ObligationKind::Subscription => &self.subscriptions,
            ObligationKind::Bill => &self.bills,
        }
    }

    pub fn obligations_mut(&mut self, kind: ObligationKind) -> &mut Vec<Obligation> {
        match kind {
            ObligationKind::Subscription => &mut self.subscriptions,
            ObligationKind::Bill => &mut self.bills,
        }
    }

    /// Subscriptions followed by bills, each tagged with its kind.
    pub fn all_obligations(&self) -> impl Iterator<Item = (ObligationKind, &Obligation)> {
        self.subscriptions
            .iter()
            .map(|o| (ObligationKind::Subscription, o))
            .chain(self.bills.iter().map(|o| (ObligationKind::Bill, o)))
    }

    /// Obligations that need money set aside ahead of their due date.
    pub fn accruing_obligations(&self) -> impl Iterator<Item = (ObligationKind, &Obligation)> {
        self.all_obligations().filter(|(_, o)| o.accrues())
    }

    pub fn find_obligation(&self, kind: ObligationKind, id: RecordId) -> Option<&Obligation> {
        self.obligations(kind).iter().find(|o| o.id == id)
    }
}

/// Export file layout: the full document plus the time it was taken.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    #[serde(flatten)]
    pub data: &'a BudgetData,
    pub export_date: DateTime<Utc>,
}

/// A user-supplied document to import.
///
/// Every field is optional: collections absent from the document are left
/// as they are, collections present (even empty) replace the current ones.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,

    #[serde(default)]
    pub subscriptions: Option<Vec<Obligation>>,

    #[serde(default)]
    pub bills: Option<Vec<Obligation>>,

    #[serde(default)]
    pub budgets: Option<Vec<Budget>>,

    /// `null` (an unparseable balance in older documents) imports as 0.
    #[serde(default, deserialize_with = "amount_serde::deserialize_present_or_zero")]
    pub savings_balance: Option<f64>,

    #[serde(default)]
    pub export_date: Option<DateTime<Utc>>,
}

impl ImportDocument {
    /// Merge this document into `data` following the leave-unchanged policy.
    pub fn merge_into(self, data: &mut BudgetData) {
        if let Some(transactions) = self.transactions {
            data.transactions = transactions;
        }
        if let Some(subscriptions) = self.subscriptions {
            data.subscriptions = subscriptions;
        }
        if let Some(bills) = self.bills {
            data.bills = bills;
        }
        if let Some(budgets) = self.budgets {
            data.budgets = budgets;
        }
        if let Some(balance) = self.savings_balance {
            data.savings_balance = balance;
        }
    }
}
