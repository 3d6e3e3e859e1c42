use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::errors::CoreError;
use crate::models::budget::Budget;
use crate::models::budget_data::{BudgetData, ImportDocument};
use crate::models::obligation::{Obligation, ObligationKind, SavingsEntry};
use crate::models::record_id::RecordId;
use crate::models::transaction::Transaction;
use crate::validation::{BudgetInput, ObligationInput, TransactionInput};

/// A single user-initiated change to the budget document.
///
/// Ids for new records are chosen by the caller, which keeps applying an
/// action deterministic.
#[derive(Debug, Clone)]
pub enum Action {
    AddTransaction { id: RecordId, input: TransactionInput },
    DeleteTransaction { id: RecordId },
    AddObligation { kind: ObligationKind, id: RecordId, input: ObligationInput },
    EditObligation { kind: ObligationKind, id: RecordId, input: ObligationInput },
    DeleteObligation { kind: ObligationKind, id: RecordId },
    ToggleFlag { kind: ObligationKind, id: RecordId },
    /// Append a contribution to the obligation's savings log.
    LogContribution { kind: ObligationKind, id: RecordId, amount: f64 },
    /// Replace the savings log with one entry holding the new total.
    AdjustSaved { kind: ObligationKind, id: RecordId, amount: f64 },
    AddBudget { id: RecordId, input: BudgetInput },
    DeleteBudget { id: RecordId },
    SetSavingsBalance { amount: f64 },
    Import(ImportDocument),
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddTransaction { .. } => "add_transaction",
            Action::DeleteTransaction { .. } => "delete_transaction",
            Action::AddObligation { .. } => "add_obligation",
            Action::EditObligation { .. } => "edit_obligation",
            Action::DeleteObligation { .. } => "delete_obligation",
            Action::ToggleFlag { .. } => "toggle_flag",
            Action::LogContribution { .. } => "log_contribution",
            Action::AdjustSaved { .. } => "adjust_saved",
            Action::AddBudget { .. } => "add_budget",
            Action::DeleteBudget { .. } => "delete_budget",
            Action::SetSavingsBalance { .. } => "set_savings_balance",
            Action::Import(_) => "import",
        }
    }
}

/// Applies actions to the budget document.
///
/// Pure business logic with no I/O and no clock. `apply` works on a copy and
/// returns it, so a rejected action leaves the caller's state untouched.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// Produce the document that results from applying `action` to `data`.
    /// `now` stamps any savings log entries the action creates.
    pub fn apply(
        &self,
        data: &BudgetData,
        action: Action,
        now: DateTime<Utc>,
    ) -> Result<BudgetData, CoreError> {
        let mut next = data.clone();
        self.apply_in_place(&mut next, action, now)?;
        Ok(next)
    }

    fn apply_in_place(
        &self,
        data: &mut BudgetData,
        action: Action,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        match action {
            Action::AddTransaction { id, input } => {
                if data.transactions.iter().any(|t| t.id == id) {
                    return Err(duplicate_id("Transaction", id));
                }
                data.transactions.push(Transaction {
                    id,
                    kind: input.kind,
                    amount: input.amount,
                    description: input.description,
                    category: input.category,
                    source: input.source,
                    date: input.date,
                });
            }
            Action::DeleteTransaction { id } => {
                let idx = data
                    .transactions
                    .iter()
                    .position(|t| t.id == id)
                    .ok_or_else(|| CoreError::not_found("Transaction", id))?;
                data.transactions.remove(idx);
            }
            Action::AddObligation { kind, id, input } => {
                let items = data.obligations_mut(kind);
                if items.iter().any(|o| o.id == id) {
                    return Err(duplicate_id(kind_label(kind), id));
                }
                let savings_log = input.frequency.accrues().then(Vec::new);
                items.push(Obligation {
                    id,
                    name: input.name,
                    amount: input.amount,
                    frequency: input.frequency,
                    next_payment: input.next_payment,
                    category: input.category,
                    source: input.source,
                    flagged: input.flagged,
                    savings_log,
                });
            }
            Action::EditObligation { kind, id, input } => {
                let obligation = find_obligation(data, kind, id)?;
                obligation.name = input.name;
                obligation.amount = input.amount;
                obligation.frequency = input.frequency;
                obligation.next_payment = input.next_payment;
                obligation.category = input.category;
                obligation.source = input.source;
                obligation.flagged = input.flagged;
            }
            Action::DeleteObligation { kind, id } => {
                let items = data.obligations_mut(kind);
                let idx = items
                    .iter()
                    .position(|o| o.id == id)
                    .ok_or_else(|| CoreError::not_found(kind_label(kind), id))?;
                items.remove(idx);
            }
            Action::ToggleFlag { kind, id } => {
                let obligation = find_obligation(data, kind, id)?;
                obligation.flagged = !obligation.flagged;
            }
            Action::LogContribution { kind, id, amount } => {
                if !amount.is_finite() || amount <= 0.0 {
                    return Err(CoreError::ValidationError(
                        "Contribution must be a positive amount".into(),
                    ));
                }
                let obligation = accruing_obligation(data, kind, id)?;
                obligation
                    .savings_log
                    .get_or_insert_with(Vec::new)
                    .push(SavingsEntry { date: now, amount });
            }
            Action::AdjustSaved { kind, id, amount } => {
                if !amount.is_finite() || amount < 0.0 {
                    return Err(CoreError::ValidationError(
                        "Saved total must not be negative".into(),
                    ));
                }
                let obligation = accruing_obligation(data, kind, id)?;
                obligation.savings_log = Some(vec![SavingsEntry { date: now, amount }]);
            }
            Action::AddBudget { id, input } => {
                if data.budgets.iter().any(|b| b.id == id) {
                    return Err(duplicate_id("Budget", id));
                }
                data.budgets.push(Budget {
                    id,
                    category: input.category,
                    limit: input.limit,
                });
            }
            Action::DeleteBudget { id } => {
                let idx = data
                    .budgets
                    .iter()
                    .position(|b| b.id == id)
                    .ok_or_else(|| CoreError::not_found("Budget", id))?;
                data.budgets.remove(idx);
            }
            Action::SetSavingsBalance { amount } => {
                if !amount.is_finite() || amount < 0.0 {
                    return Err(CoreError::ValidationError(
                        "Savings balance must not be negative".into(),
                    ));
                }
                data.savings_balance = amount;
            }
            Action::Import(document) => {
                check_import(&document)?;
                document.merge_into(data);
            }
        }
        Ok(())
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_label(kind: ObligationKind) -> &'static str {
    match kind {
        ObligationKind::Subscription => "Subscription",
        ObligationKind::Bill => "Bill",
    }
}

fn duplicate_id(kind: &str, id: RecordId) -> CoreError {
    CoreError::ValidationError(format!("{kind} with id {id} already exists"))
}

fn find_obligation(
    data: &mut BudgetData,
    kind: ObligationKind,
    id: RecordId,
) -> Result<&mut Obligation, CoreError> {
    data.obligations_mut(kind)
        .iter_mut()
        .find(|o| o.id == id)
        .ok_or_else(|| CoreError::not_found(kind_label(kind), id))
}

/// Like `find_obligation`, but monthly obligations are rejected: they are
/// paid from income and never accrue savings.
fn accruing_obligation(
    data: &mut BudgetData,
    kind: ObligationKind,
    id: RecordId,
) -> Result<&mut Obligation, CoreError> {
    let obligation = find_obligation(data, kind, id)?;
    if !obligation.accrues() {
        return Err(CoreError::ValidationError(format!(
            "'{}' is paid monthly and does not accrue savings",
            obligation.name
        )));
    }
    Ok(obligation)
}

/// An imported document must satisfy the same rules as records entered
/// through the forms: positive amounts, a non-negative balance, and ids
/// unique within each collection.
fn check_import(document: &ImportDocument) -> Result<(), CoreError> {
    if let Some(balance) = document.savings_balance {
        if balance < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Imported savings balance {balance} must not be negative"
            )));
        }
    }

    if let Some(transactions) = &document.transactions {
        check_records("transactions", transactions.iter().map(|t| (t.id, t.description.as_str(), t.amount)))?;
    }
    for (collection, items) in [
        ("subscriptions", &document.subscriptions),
        ("bills", &document.bills),
    ] {
        let Some(items) = items else { continue };
        check_records(collection, items.iter().map(|o| (o.id, o.name.as_str(), o.amount)))?;
        for o in items {
            let entries = o.savings_log.as_deref().unwrap_or_default();
            if entries.iter().any(|e| e.amount < 0.0) {
                return Err(CoreError::ValidationError(format!(
                    "Imported {collection}: savings log of '{}' has a negative entry",
                    o.name
                )));
            }
        }
    }
    if let Some(budgets) = &document.budgets {
        check_records("budgets", budgets.iter().map(|b| (b.id, b.category.as_str(), b.limit)))?;
    }
    Ok(())
}

fn check_records<'a>(
    collection: &str,
    records: impl Iterator<Item = (RecordId, &'a str, f64)>,
) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for (id, label, amount) in records {
        if amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Imported {collection}: amount of '{label}' must be positive, got {amount}"
            )));
        }
        if !seen.insert(id) {
            return Err(CoreError::ValidationError(format!(
                "Imported {collection}: id {id} appears more than once"
            )));
        }
    }
    Ok(())
}
