use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::amount_serde;
use super::frequency::Frequency;
use super::record_id::RecordId;

/// Which collection a recurring obligation lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObligationKind {
    Subscription,
    Bill,
}

impl ObligationKind {
    /// Category used for spending totals when an obligation has none.
    pub fn fallback_category(self) -> &'static str {
        match self {
            ObligationKind::Subscription => "Subscriptions",
            ObligationKind::Bill => "Bills",
        }
    }
}

impl std::fmt::Display for ObligationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObligationKind::Subscription => write!(f, "Subscription"),
            ObligationKind::Bill => write!(f, "Bill"),
        }
    }
}

/// One manual contribution logged against an obligation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsEntry {
    pub date: DateTime<Utc>,
    #[serde(deserialize_with = "amount_serde::deserialize_or_zero")]
    pub amount: f64,
}

/// A recurring subscription or bill.
///
/// Subscriptions and bills share this shape; only the meaning of `flagged`
/// differs (cancellation vs. review), and that is a display concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obligation {
    pub id: RecordId,

    pub name: String,

    /// Full amount due each cycle.
    #[serde(deserialize_with = "amount_serde::deserialize")]
    pub amount: f64,

    #[serde(default)]
    pub frequency: Frequency,

    /// Due date of the current cycle.
    pub next_payment: NaiveDate,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub source: String,

    #[serde(
        default,
        alias = "flaggedForCancellation",
        alias = "flaggedForReview"
    )]
    pub flagged: bool,

    /// Contributions logged toward this obligation. Only created for
    /// obligations that were non-monthly when added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_log: Option<Vec<SavingsEntry>>,
}

impl Obligation {
    /// Sum of every logged contribution (0 when there is no log).
    pub fn logged_total(&self) -> f64 {
        self.savings_log
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|entry| entry.amount)
            .sum()
    }

    pub fn accrues(&self) -> bool {
        self.frequency.accrues()
    }
}
