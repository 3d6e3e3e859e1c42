use crate::models::frequency::Frequency;

/// Spreads a periodic amount over the months of its cycle.
///
/// The result is never rounded; display code rounds, accrual math must not.
pub fn monthly_equivalent(amount: f64, frequency: Frequency) -> f64 {
    amount / f64::from(frequency.period_months())
}

/// Yearly cost of a periodic amount.
pub fn yearly_equivalent(amount: f64, frequency: Frequency) -> f64 {
    monthly_equivalent(amount, frequency) * 12.0
}
