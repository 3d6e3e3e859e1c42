use std::collections::HashMap;

use crate::models::analytics::{BudgetLevel, BudgetStatus, CategorySpending, RecurringCost, Totals};
use crate::models::budget_data::BudgetData;
use crate::models::month::YearMonth;
use crate::models::obligation::Obligation;
use crate::models::transaction::{Transaction, TransactionFilter, TransactionKind};
use crate::services::amortizer;

/// Spending figures over transactions and recurring obligations.
///
/// Transactions can be narrowed to one calendar month; recurring obligations
/// always contribute their monthly-equivalent cost.
pub struct SpendingService;

impl SpendingService {
    pub fn new() -> Self {
        Self
    }

    /// Income, expenses and their difference.
    pub fn totals(&self, data: &BudgetData, month: Option<YearMonth>) -> Totals {
        let mut totals = Totals::default();
        for t in in_month(&data.transactions, month) {
            match t.kind {
                TransactionKind::Income => totals.income += t.amount,
                TransactionKind::Expense => totals.expenses += t.amount,
            }
        }
        totals.balance = totals.income - totals.expenses;
        totals
    }

    /// Monthly-equivalent cost of subscriptions and bills, plus the yearly total.
    pub fn recurring_cost(&self, data: &BudgetData) -> RecurringCost {
        let monthly = |items: &[Obligation]| -> f64 {
            items
                .iter()
                .map(|o| amortizer::monthly_equivalent(o.amount, o.frequency))
                .sum()
        };
        let subscriptions = monthly(&data.subscriptions);
        let bills = monthly(&data.bills);
        let yearly_total = data
            .all_obligations()
            .map(|(_, o)| amortizer::yearly_equivalent(o.amount, o.frequency))
            .sum();
        RecurringCost {
            subscriptions,
            bills,
            total: subscriptions + bills,
            yearly_total,
        }
    }

    /// Spending in one category: expenses tagged with it plus the monthly
    /// cost of every obligation filed under it.
    pub fn category_spending(&self, data: &BudgetData, category: &str, month: Option<YearMonth>) -> f64 {
        self.spending_by_category(data, month)
            .get(category)
            .copied()
            .unwrap_or(0.0)
    }

    /// Every category's spending, largest first.
    pub fn all_category_spending(&self, data: &BudgetData, month: Option<YearMonth>) -> Vec<CategorySpending> {
        let spending = self.spending_by_category(data, month);
        let total: f64 = spending.values().sum();

        let mut rows: Vec<CategorySpending> = spending
            .into_iter()
            .map(|(category, amount)| CategorySpending {
                share_pct: if total > 0.0 { amount / total * 100.0 } else { 0.0 },
                category,
                amount,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        rows
    }

    /// Spending against each budget, in budget order.
    pub fn budget_statuses(
        &self,
        data: &BudgetData,
        month: Option<YearMonth>,
        warning_pct: f64,
    ) -> Vec<BudgetStatus> {
        let spending = self.spending_by_category(data, month);
        data.budgets
            .iter()
            .map(|budget| {
                let spent = spending.get(&budget.category).copied().unwrap_or(0.0);
                let pct = if budget.limit > 0.0 {
                    spent / budget.limit * 100.0
                } else {
                    0.0
                };
                let level = if pct > 100.0 {
                    BudgetLevel::Over
                } else if pct > warning_pct {
                    BudgetLevel::Warning
                } else {
                    BudgetLevel::Ok
                };
                BudgetStatus {
                    budget_id: budget.id,
                    category: budget.category.clone(),
                    limit: budget.limit,
                    spent,
                    remaining: budget.limit - spent,
                    pct,
                    level,
                }
            })
            .collect()
    }

    /// Transactions matching `filter` whose description or category contains
    /// `query` (case-insensitive), newest first.
    pub fn search_transactions<'a>(
        &self,
        data: &'a BudgetData,
        filter: TransactionFilter,
        query: &str,
        month: Option<YearMonth>,
    ) -> Vec<&'a Transaction> {
        let q = query.trim().to_lowercase();
        let mut found: Vec<&Transaction> = in_month(&data.transactions, month)
            .filter(|t| filter.matches(t.kind))
            .filter(|t| {
                q.is_empty()
                    || t.description.to_lowercase().contains(&q)
                    || t.category.to_lowercase().contains(&q)
            })
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        found
    }

    fn spending_by_category(&self, data: &BudgetData, month: Option<YearMonth>) -> HashMap<String, f64> {
        let mut spending: HashMap<String, f64> = HashMap::new();

        for t in in_month(&data.transactions, month).filter(|t| t.kind == TransactionKind::Expense) {
            *spending.entry(t.category.clone()).or_insert(0.0) += t.amount;
        }

        for (kind, o) in data.all_obligations() {
            let category = if o.category.trim().is_empty() {
                kind.fallback_category().to_string()
            } else {
                o.category.clone()
            };
            *spending.entry(category).or_insert(0.0) +=
                amortizer::monthly_equivalent(o.amount, o.frequency);
        }

        spending
    }
}

impl Default for SpendingService {
    fn default() -> Self {
        Self::new()
    }
}

fn in_month(
    transactions: &[Transaction],
    month: Option<YearMonth>,
) -> impl Iterator<Item = &Transaction> {
    transactions
        .iter()
        .filter(move |t| month.map_or(true, |m| m.contains(t.date)))
}
