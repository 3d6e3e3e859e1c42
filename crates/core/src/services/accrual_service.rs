use chrono::NaiveDate;

use crate::models::month::YearMonth;
use crate::models::obligation::Obligation;
use crate::services::amortizer;

/// Works out how much should already be set aside toward each
/// non-monthly obligation.
///
/// The target is a step function: one monthly slice is added on the 1st of
/// every month since the inferred cycle start, and the full amount is due
/// once the payment date is reached. Elapsed months are counted on year and
/// month only; the day of month never matters.
///
/// Pure: no clock and no I/O. Every input yields a number, never an error.
pub struct AccrualService;

impl AccrualService {
    pub fn new() -> Self {
        Self
    }

    /// Amount that should be saved toward `obligation`'s current cycle as of `reference`.
    pub fn should_have_saved(&self, obligation: &Obligation, reference: NaiveDate) -> f64 {
        if !obligation.accrues() {
            return 0.0;
        }

        let period_months = obligation.frequency.period_months();
        let monthly_slice = amortizer::monthly_equivalent(obligation.amount, obligation.frequency);

        if obligation.next_payment <= reference {
            return obligation.amount;
        }

        // No record of the last payment exists, so the cycle start is
        // inferred from the next due date and the period length.
        let cycle_start = YearMonth::of(obligation.next_payment).minus_months(period_months);
        let months_elapsed = cycle_start.months_until(YearMonth::of(reference)).max(0);

        let target = months_elapsed as f64 * monthly_slice;
        target.clamp(0.0, obligation.amount.max(0.0))
    }

    /// Sum of accrual targets over the accruing obligations, all at one reference date.
    pub fn total_needed<'a, I>(&self, obligations: I, reference: NaiveDate) -> f64
    where
        I: IntoIterator<Item = &'a Obligation>,
    {
        obligations
            .into_iter()
            .filter(|o| o.accrues())
            .map(|o| self.should_have_saved(o, reference))
            .sum()
    }

    /// Sum of logged contributions over the accruing obligations.
    pub fn total_logged<'a, I>(&self, obligations: I) -> f64
    where
        I: IntoIterator<Item = &'a Obligation>,
    {
        obligations
            .into_iter()
            .filter(|o| o.accrues())
            .map(Obligation::logged_total)
            .sum()
    }

    /// Sum of full cycle amounts over the accruing obligations.
    pub fn total_full_amount<'a, I>(&self, obligations: I) -> f64
    where
        I: IntoIterator<Item = &'a Obligation>,
    {
        obligations
            .into_iter()
            .filter(|o| o.accrues())
            .map(|o| o.amount)
            .sum()
    }
}

impl Default for AccrualService {
    fn default() -> Self {
        Self::new()
    }
}
