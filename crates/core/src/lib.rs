pub mod clock;
pub mod errors;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use clock::{Clock, SystemClock};
use errors::CoreError;
use models::{
    analytics::{BudgetStatus, CategorySpending, RecurringCost, SavingsSummary, Totals, UpcomingPayment},
    budget::Budget,
    budget_data::BudgetData,
    month::YearMonth,
    obligation::{Obligation, ObligationKind},
    record_id::RecordId,
    settings::Settings,
    transaction::{Transaction, TransactionFilter},
};
use services::{
    accrual_service::AccrualService,
    ledger_service::{Action, LedgerService},
    spending_service::SpendingService,
    summary_service::SummaryService,
};
use storage::{
    encryption::KdfParams,
    manager::StorageManager,
    store::{KeyValueStore, MemoryStore},
};
use validation::{BudgetDraft, ObligationDraft, TransactionDraft};

/// Main entry point for the Budget Tracker core library.
///
/// Owns the budget document and applies every change through the ledger
/// service, saving the whole document to the store after each one.
#[must_use]
pub struct BudgetTracker {
    data: BudgetData,
    settings: Settings,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    /// When set, used instead of the clock's date for every accrual figure.
    reference_override: Option<NaiveDate>,
    ledger_service: LedgerService,
    accrual_service: AccrualService,
    summary_service: SummaryService,
    spending_service: SpendingService,
    /// True while the latest change has not reached the store.
    dirty: bool,
}

impl std::fmt::Debug for BudgetTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetTracker")
            .field("store", &self.store.name())
            .field("transactions", &self.data.transactions.len())
            .field("subscriptions", &self.data.subscriptions.len())
            .field("bills", &self.data.bills.len())
            .field("budgets", &self.data.budgets.len())
            .field("reference_override", &self.reference_override)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl BudgetTracker {
    /// Empty tracker backed by an in-memory store.
    pub fn in_memory() -> Self {
        Self::build(
            BudgetData::default(),
            Settings::default(),
            Box::new(MemoryStore::new()),
            Box::new(SystemClock),
        )
    }

    /// Load the document stored under `settings.storage_key` (empty if absent).
    pub fn open(store: Box<dyn KeyValueStore>, settings: Settings) -> Result<Self, CoreError> {
        Self::open_with_clock(store, settings, Box::new(SystemClock))
    }

    /// Like [`BudgetTracker::open`], with an explicit clock.
    pub fn open_with_clock(
        store: Box<dyn KeyValueStore>,
        settings: Settings,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CoreError> {
        let data = StorageManager::load(store.as_ref(), &settings.storage_key)?;
        Ok(Self::build(data, settings, store, clock))
    }

    // ── Reference Date ──────────────────────────────────────────────

    /// Date every accrual figure is evaluated at: the override if set, otherwise today.
    #[must_use]
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_override.unwrap_or_else(|| self.clock.today())
    }

    /// Pin accrual figures to `date`, or pass `None` to follow the clock again.
    pub fn set_reference_date(&mut self, date: Option<NaiveDate>) {
        self.reference_override = date;
    }

    // ── Transactions ────────────────────────────────────────────────

    pub fn add_transaction(&mut self, draft: &TransactionDraft) -> Result<RecordId, CoreError> {
        let input = draft.validate(self.clock.today())?;
        let id = RecordId::new();
        self.dispatch(Action::AddTransaction { id, input })?;
        Ok(id)
    }

    pub fn delete_transaction(&mut self, id: RecordId) -> Result<(), CoreError> {
        self.dispatch(Action::DeleteTransaction { id })
    }

    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.data.transactions
    }

    /// Transactions matching `filter` and `query`, newest first.
    #[must_use]
    pub fn search_transactions(
        &self,
        filter: TransactionFilter,
        query: &str,
        month: Option<YearMonth>,
    ) -> Vec<&Transaction> {
        self.spending_service
            .search_transactions(&self.data, filter, query, month)
    }

    // ── Subscriptions & Bills ───────────────────────────────────────

    /// Add a subscription or bill. Non-monthly ones start with an empty savings log.
    pub fn add_obligation(&mut self, kind: ObligationKind, draft: &ObligationDraft) -> Result<RecordId, CoreError> {
        let input = draft.validate()?;
        let id = RecordId::new();
        self.dispatch(Action::AddObligation { kind, id, input })?;
        Ok(id)
    }

    /// Replace every field except the id and the savings log.
    pub fn edit_obligation(
        &mut self,
        kind: ObligationKind,
        id: RecordId,
        draft: &ObligationDraft,
    ) -> Result<(), CoreError> {
        let input = draft.validate()?;
        self.dispatch(Action::EditObligation { kind, id, input })
    }

    pub fn delete_obligation(&mut self, kind: ObligationKind, id: RecordId) -> Result<(), CoreError> {
        self.dispatch(Action::DeleteObligation { kind, id })
    }

    /// Flip the cancellation (subscription) or review (bill) flag.
    pub fn toggle_flag(&mut self, kind: ObligationKind, id: RecordId) -> Result<(), CoreError> {
        self.dispatch(Action::ToggleFlag { kind, id })
    }

    #[must_use]
    pub fn obligations(&self, kind: ObligationKind) -> &[Obligation] {
        self.data.obligations(kind)
    }

    #[must_use]
    pub fn get_obligation(&self, kind: ObligationKind, id: RecordId) -> Option<&Obligation> {
        self.data.find_obligation(kind, id)
    }

    // ── Savings ─────────────────────────────────────────────────────

    /// Log a contribution toward a non-monthly obligation.
    pub fn log_contribution(&mut self, kind: ObligationKind, id: RecordId, amount: f64) -> Result<(), CoreError> {
        let amount = validation::round_cents(amount);
        self.dispatch(Action::LogContribution { kind, id, amount })
    }

    /// Overwrite what has been saved toward an obligation with a single total.
    pub fn adjust_saved(&mut self, kind: ObligationKind, id: RecordId, amount: f64) -> Result<(), CoreError> {
        let amount = validation::round_cents(amount);
        self.dispatch(Action::AdjustSaved { kind, id, amount })
    }

    /// Set the manually tracked savings balance.
    pub fn set_savings_balance(&mut self, amount: f64) -> Result<(), CoreError> {
        let amount = validation::round_cents(amount);
        self.dispatch(Action::SetSavingsBalance { amount })
    }

    #[must_use]
    pub fn savings_balance(&self) -> f64 {
        self.data.savings_balance
    }

    /// What should be saved toward one obligation as of the reference date.
    pub fn should_have_saved(&self, kind: ObligationKind, id: RecordId) -> Result<f64, CoreError> {
        let obligation = self
            .data
            .find_obligation(kind, id)
            .ok_or_else(|| CoreError::not_found("Obligation", id))?;
        Ok(self
            .accrual_service
            .should_have_saved(obligation, self.reference_date()))
    }

    /// Savings position at the reference date.
    #[must_use]
    pub fn savings_summary(&self) -> SavingsSummary {
        self.savings_summary_at(self.reference_date())
    }

    /// Savings position at an explicit date.
    #[must_use]
    pub fn savings_summary_at(&self, reference: NaiveDate) -> SavingsSummary {
        self.summary_service
            .savings_summary(&self.data, reference, self.settings.due_soon_days)
    }

    /// Subscriptions and bills due within the upcoming-payment window.
    #[must_use]
    pub fn upcoming_payments(&self) -> Vec<UpcomingPayment> {
        self.summary_service.upcoming_payments(
            &self.data,
            self.reference_date(),
            self.settings.upcoming_window_days,
        )
    }

    // ── Budgets & Spending ──────────────────────────────────────────

    pub fn add_budget(&mut self, draft: &BudgetDraft) -> Result<RecordId, CoreError> {
        let input = draft.validate()?;
        let id = RecordId::new();
        self.dispatch(Action::AddBudget { id, input })?;
        Ok(id)
    }

    pub fn delete_budget(&mut self, id: RecordId) -> Result<(), CoreError> {
        self.dispatch(Action::DeleteBudget { id })
    }

    #[must_use]
    pub fn budgets(&self) -> &[Budget] {
        &self.data.budgets
    }

    #[must_use]
    pub fn budget_statuses(&self, month: Option<YearMonth>) -> Vec<BudgetStatus> {
        self.spending_service
            .budget_statuses(&self.data, month, self.settings.budget_warning_pct)
    }

    #[must_use]
    pub fn totals(&self, month: Option<YearMonth>) -> Totals {
        self.spending_service.totals(&self.data, month)
    }

    #[must_use]
    pub fn recurring_cost(&self) -> RecurringCost {
        self.spending_service.recurring_cost(&self.data)
    }

    #[must_use]
    pub fn category_spending(&self, category: &str, month: Option<YearMonth>) -> f64 {
        self.spending_service
            .category_spending(&self.data, category, month)
    }

    #[must_use]
    pub fn all_category_spending(&self, month: Option<YearMonth>) -> Vec<CategorySpending> {
        self.spending_service.all_category_spending(&self.data, month)
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Full snapshot as pretty JSON, stamped with `exportDate`.
    pub fn export_json(&self) -> Result<String, CoreError> {
        let json = StorageManager::export_json(&self.data, self.clock.now())?;
        info!(bytes = json.len(), "exported budget document");
        Ok(json)
    }

    /// Full snapshot sealed with `password`.
    pub fn export_encrypted(&self, password: &str) -> Result<Vec<u8>, CoreError> {
        self.export_encrypted_with(password, &KdfParams::default())
    }

    pub fn export_encrypted_with(&self, password: &str, kdf_params: &KdfParams) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::export_encrypted_with(&self.data, self.clock.now(), password, kdf_params)?;
        info!(bytes = bytes.len(), "exported encrypted backup");
        Ok(bytes)
    }

    /// Import a JSON document. Collections missing from it are left unchanged;
    /// if it does not parse, nothing changes.
    pub fn import_json(&mut self, json: &str) -> Result<(), CoreError> {
        let document = StorageManager::parse_import(json).map_err(|e| {
            warn!(error = %e, "rejected import");
            e
        })?;
        info!(exported_at = ?document.export_date, "importing budget document");
        self.dispatch(Action::Import(document))
    }

    /// Import an encrypted backup produced by [`BudgetTracker::export_encrypted`].
    pub fn import_encrypted(&mut self, bytes: &[u8], password: &str) -> Result<(), CoreError> {
        let document = StorageManager::import_encrypted(bytes, password).map_err(|e| {
            warn!(error = %e, "rejected encrypted import");
            e
        })?;
        info!(exported_at = ?document.export_date, "importing encrypted backup");
        self.dispatch(Action::Import(document))
    }

    // ── State & Persistence ─────────────────────────────────────────

    #[must_use]
    pub fn data(&self) -> &BudgetData {
        &self.data
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Format an amount with the configured currency symbol.
    #[must_use]
    pub fn format_amount(&self, amount: f64) -> String {
        self.settings.format_amount(amount)
    }

    /// Returns `true` if the last change could not be written to the store.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Write the document to the store now. Useful to retry after a failed save.
    pub fn save(&mut self) -> Result<(), CoreError> {
        StorageManager::save(self.store.as_mut(), &self.settings.storage_key, &self.data)?;
        self.dirty = false;
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) -> Result<(), CoreError> {
        let name = action.name();
        let next = self
            .ledger_service
            .apply(&self.data, action, self.clock.now())
            .map_err(|e| {
                debug!(action = name, error = %e, "action rejected");
                e
            })?;
        self.data = next;
        self.dirty = true;
        debug!(action = name, "action applied");

        // The in-memory document stays authoritative if the store fails.
        if let Err(e) = self.save() {
            warn!(action = name, error = %e, "failed to save budget document");
        }
        Ok(())
    }

    fn build(
        data: BudgetData,
        settings: Settings,
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            data,
            settings,
            store,
            clock,
            reference_override: None,
            ledger_service: LedgerService::new(),
            accrual_service: AccrualService::new(),
            summary_service: SummaryService::new(),
            spending_service: SpendingService::new(),
            dirty: false,
        }
    }
}
