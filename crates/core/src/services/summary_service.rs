use chrono::NaiveDate;

use crate::models::analytics::{ObligationProgress, ProgressStatus, SavingsSummary, UpcomingPayment};
use crate::models::budget_data::BudgetData;
use crate::models::obligation::{Obligation, ObligationKind};
use crate::services::accrual_service::AccrualService;
use crate::services::amortizer;

/// Below this share of the full amount logged, an obligation is behind.
const BEHIND_BELOW_PCT: f64 = 80.0;

/// Builds the savings dashboard: the three saved figures, per-obligation
/// progress, and the list of payments coming up.
pub struct SummaryService {
    accrual_service: AccrualService,
}

impl SummaryService {
    pub fn new() -> Self {
        Self {
            accrual_service: AccrualService::new(),
        }
    }

    /// Savings position at `reference`. Every item is evaluated at the same date.
    pub fn savings_summary(
        &self,
        data: &BudgetData,
        reference: NaiveDate,
        due_soon_days: i64,
    ) -> SavingsSummary {
        let accruing: Vec<(ObligationKind, &Obligation)> = data.accruing_obligations().collect();
        let obligations = || accruing.iter().map(|(_, o)| *o);

        let total_saved = self.accrual_service.total_logged(obligations());
        let total_needed = self.accrual_service.total_needed(obligations(), reference);
        let total_full_amount = self.accrual_service.total_full_amount(obligations());

        let items = accruing
            .iter()
            .map(|(kind, o)| self.progress(*kind, o, reference, due_soon_days))
            .collect();

        let progress_pct = if total_needed > 0.0 {
            data.savings_balance / total_needed * 100.0
        } else {
            0.0
        };

        SavingsSummary {
            reference_date: reference,
            total_saved,
            total_needed,
            total_full_amount,
            savings_balance: data.savings_balance,
            surplus: data.savings_balance - total_needed,
            progress_pct,
            items,
        }
    }

    /// Obligations due between today and `window_days` from `reference`, soonest first.
    pub fn upcoming_payments(
        &self,
        data: &BudgetData,
        reference: NaiveDate,
        window_days: i64,
    ) -> Vec<UpcomingPayment> {
        let mut upcoming: Vec<UpcomingPayment> = data
            .all_obligations()
            .map(|(kind, o)| UpcomingPayment {
                kind,
                id: o.id,
                name: o.name.clone(),
                amount: o.amount,
                next_payment: o.next_payment,
                days_until: days_between(reference, o.next_payment),
            })
            .filter(|p| (0..=window_days).contains(&p.days_until))
            .collect();
        upcoming.sort_by_key(|p| p.days_until);
        upcoming
    }

    fn progress(
        &self,
        kind: ObligationKind,
        obligation: &Obligation,
        reference: NaiveDate,
        due_soon_days: i64,
    ) -> ObligationProgress {
        let logged = obligation.logged_total();
        let logged_pct = if obligation.amount > 0.0 {
            logged / obligation.amount * 100.0
        } else {
            0.0
        };
        let days_until = days_between(reference, obligation.next_payment);

        let status = if logged_pct < BEHIND_BELOW_PCT {
            ProgressStatus::Behind
        } else if logged_pct < 100.0 && days_until <= due_soon_days {
            ProgressStatus::DueSoon
        } else {
            ProgressStatus::OnTrack
        };

        ObligationProgress {
            kind,
            id: obligation.id,
            name: obligation.name.clone(),
            amount: obligation.amount,
            frequency: obligation.frequency,
            next_payment: obligation.next_payment,
            monthly_slice: amortizer::monthly_equivalent(obligation.amount, obligation.frequency),
            should_have_saved: self.accrual_service.should_have_saved(obligation, reference),
            logged,
            logged_pct,
            days_until,
            status,
        }
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}

fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
