use serde::{Deserialize, Serialize};

/// Storage key the whole document lives under.
pub const DEFAULT_STORAGE_KEY: &str = "budgetData";

/// Tracker configuration, supplied when the tracker is opened.
/// Not part of the persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key under which the budget document is stored.
    pub storage_key: String,

    /// Obligations due within this many days show up as upcoming payments.
    pub upcoming_window_days: i64,

    /// An under-funded obligation due within this many days is flagged "due soon".
    pub due_soon_days: i64,

    /// Budget usage (percent of limit) above which a budget is in warning.
    pub budget_warning_pct: f64,

    /// Symbol prefixed to formatted amounts.
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            upcoming_window_days: 7,
            due_soon_days: 30,
            budget_warning_pct: 80.0,
            currency_symbol: "$".to_string(),
        }
    }
}

impl Settings {
    /// Format an amount for display, rounded to cents.
    pub fn format_amount(&self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", self.currency_symbol, -amount)
        } else {
            format!("{}{:.2}", self.currency_symbol, amount)
        }
    }
}
