//! Form-input validation.
//!
//! Raw text from forms is checked here and turned into typed inputs before
//! anything reaches the ledger. A draft that fails validation changes nothing.

use chrono::NaiveDate;

use crate::errors::CoreError;
use crate::models::frequency::Frequency;
use crate::models::transaction::TransactionKind;

const DEFAULT_OBLIGATION_CATEGORY: &str = "Other";

/// Parse a strictly positive money amount, rounded to cents.
pub fn parse_amount(field: &str, raw: &str) -> Result<f64, CoreError> {
    let value = parse_number(field, raw)?;
    if value <= 0.0 {
        return Err(CoreError::ValidationError(format!("{field} must be positive")));
    }
    Ok(round_cents(value))
}

/// Parse a money amount that may be zero, rounded to cents.
pub fn parse_non_negative(field: &str, raw: &str) -> Result<f64, CoreError> {
    let value = parse_number(field, raw)?;
    if value < 0.0 {
        return Err(CoreError::ValidationError(format!("{field} must not be negative")));
    }
    Ok(round_cents(value))
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CoreError> {
    let raw = required(field, raw)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CoreError::ValidationError(format!("{field} '{raw}' is not a YYYY-MM-DD date")))
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn parse_number(field: &str, raw: &str) -> Result<f64, CoreError> {
    let raw = required(field, raw)?;
    let value: f64 = raw
        .parse()
        .map_err(|_| CoreError::ValidationError(format!("{field} '{raw}' is not a number")))?;
    if !value.is_finite() {
        return Err(CoreError::ValidationError(format!("{field} must be a finite number")));
    }
    Ok(value)
}

fn required<'a>(field: &str, raw: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError(format!("{field} is required")));
    }
    Ok(trimmed)
}

// ── Transactions ────────────────────────────────────────────────────

/// Transaction form as typed by the user.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: String,
    pub description: String,
    pub category: String,
    pub source: String,
    /// Empty means today.
    pub date: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            kind: TransactionKind::Expense,
            amount: String::new(),
            description: String::new(),
            category: String::new(),
            source: String::new(),
            date: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub source: String,
    pub date: NaiveDate,
}

impl TransactionDraft {
    /// Amount, category and source are required. A blank description
    /// falls back to the category name.
    pub fn validate(&self, today: NaiveDate) -> Result<TransactionInput, CoreError> {
        let amount = parse_amount("Amount", &self.amount)?;
        let category = required("Category", &self.category)?.to_string();
        let source = required("Source", &self.source)?.to_string();
        let date = if self.date.trim().is_empty() {
            today
        } else {
            parse_date("Date", &self.date)?
        };
        let description = match self.description.trim() {
            "" => category.clone(),
            d => d.to_string(),
        };
        Ok(TransactionInput {
            kind: self.kind,
            amount,
            description,
            category,
            source,
            date,
        })
    }
}

// ── Subscriptions & bills ───────────────────────────────────────────

/// Subscription or bill form as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct ObligationDraft {
    pub name: String,
    pub amount: String,
    /// Empty means Monthly.
    pub frequency: String,
    /// Empty means "Other".
    pub category: String,
    pub source: String,
    pub next_payment: String,
    pub flagged: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObligationInput {
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    pub category: String,
    pub source: String,
    pub next_payment: NaiveDate,
    pub flagged: bool,
}

impl ObligationDraft {
    /// Name, amount, source and next payment date are required.
    pub fn validate(&self) -> Result<ObligationInput, CoreError> {
        let name = required("Name", &self.name)?.to_string();
        let amount = parse_amount("Amount", &self.amount)?;
        let source = required("Source", &self.source)?.to_string();
        let next_payment = parse_date("Next payment", &self.next_payment)?;

        let frequency = match self.frequency.trim() {
            "" => Frequency::Monthly,
            label => Frequency::parse(label).ok_or_else(|| {
                CoreError::ValidationError(format!("Unknown frequency '{label}'"))
            })?,
        };
        let category = match self.category.trim() {
            "" => DEFAULT_OBLIGATION_CATEGORY.to_string(),
            c => c.to_string(),
        };

        Ok(ObligationInput {
            name,
            amount,
            frequency,
            category,
            source,
            next_payment,
            flagged: self.flagged,
        })
    }
}

// ── Budgets ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct BudgetDraft {
    pub category: String,
    pub limit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetInput {
    pub category: String,
    pub limit: f64,
}

impl BudgetDraft {
    pub fn validate(&self) -> Result<BudgetInput, CoreError> {
        Ok(BudgetInput {
            category: required("Category", &self.category)?.to_string(),
            limit: parse_amount("Limit", &self.limit)?,
        })
    }
}
