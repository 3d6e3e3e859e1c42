use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::frequency::Frequency;
use super::obligation::ObligationKind;
use super::record_id::RecordId;

/// Household savings position at one reference date.
///
/// The three "saved" figures are kept apart on purpose:
/// `total_saved` is what the savings logs record, `total_needed` is what the
/// accrual model says should be set aside by now, and `savings_balance` is
/// what the user says is actually in the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsSummary {
    /// Date every per-item target was evaluated at
    pub reference_date: NaiveDate,

    /// Sum of all logged contributions across accruing obligations
    pub total_saved: f64,

    /// Sum of accrual targets across accruing obligations
    pub total_needed: f64,

    /// Sum of full cycle amounts across accruing obligations
    pub total_full_amount: f64,

    /// Manually entered balance
    pub savings_balance: f64,

    /// savings_balance - total_needed (negative means a shortfall)
    pub surplus: f64,

    /// savings_balance / total_needed × 100, or 0 when nothing is needed
    pub progress_pct: f64,

    /// Per-obligation breakdown, subscriptions first
    pub items: Vec<ObligationProgress>,
}

/// Funding state of a single accruing obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressStatus {
    /// Logged at least 100%, or at least 80% with the due date still far off
    OnTrack,
    /// Between 80% and 100% logged and due within the due-soon window
    DueSoon,
    /// Less than 80% logged
    Behind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObligationProgress {
    pub kind: ObligationKind,
    pub id: RecordId,
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    pub next_payment: NaiveDate,
    pub monthly_slice: f64,
    pub should_have_saved: f64,
    pub logged: f64,
    pub logged_pct: f64,
    /// Negative when overdue
    pub days_until: i64,
    pub status: ProgressStatus,
}

/// An obligation falling due soon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingPayment {
    pub kind: ObligationKind,
    pub id: RecordId,
    pub name: String,
    pub amount: f64,
    pub next_payment: NaiveDate,
    pub days_until: i64,
}

/// Income and expense totals over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    /// income - expenses
    pub balance: f64,
}

/// Monthly-equivalent cost of all recurring obligations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringCost {
    pub subscriptions: f64,
    pub bills: f64,
    pub total: f64,
    /// Cost of every obligation over a full year
    pub yearly_total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetLevel {
    Ok,
    Warning,
    Over,
}

/// Spending against one budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub budget_id: RecordId,
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
    /// spent / limit × 100
    pub pct: f64,
    pub level: BudgetLevel,
}

/// Spending total for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category: String,
    pub amount: f64,
    /// Share of all category spending, 0..=100
    pub share_pct: f64,
}
