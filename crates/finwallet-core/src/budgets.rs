//! Budget aggregation service
//!
//! Per-category spend-vs-limit tracking over the ledger. `spent` is derived
//! fresh from expense transactions on every read, never stored; deleting or
//! creating one budget never touches the others.

use tracing::debug;

use crate::error::{Error, Result};
use crate::ledger::{BudgetRow, BudgetStore, LedgerReader};
use crate::models::{Budget, BudgetStatus, BudgetSummary, NewBudget, Period, TransactionType};

/// Budget service over injected store and ledger capabilities
pub struct Budgets<'a> {
    store: &'a dyn BudgetStore,
    ledger: &'a dyn LedgerReader,
}

impl<'a> Budgets<'a> {
    pub fn new(store: &'a dyn BudgetStore, ledger: &'a dyn LedgerReader) -> Self {
        Self { store, ledger }
    }

    /// Attach the derived spend to a stored row
    fn with_spent(&self, row: BudgetRow) -> Result<Budget> {
        let period = Period::new(row.month, row.year)?;
        let spent = self.ledger.sum_amount_for_category(
            TransactionType::Expense,
            row.category_id,
            period.date_range(),
        )?;

        Ok(Budget {
            id: row.id,
            category_id: row.category_id,
            category_name: row.category_name,
            category_color: row.category_color,
            category_icon: row.category_icon,
            amount: row.amount,
            spent,
            month: row.month,
            year: row.year,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    /// All budgets for a month with derived spend, highest spend first
    pub fn list(&self, period: Period) -> Result<Vec<Budget>> {
        let rows = self.store.list_budget_rows(period)?;
        let mut budgets = rows
            .into_iter()
            .map(|row| self.with_spent(row))
            .collect::<Result<Vec<_>>>()?;
        budgets.sort_by(|a, b| b.spent.cmp(&a.spent));
        Ok(budgets)
    }

    /// One budget with derived spend
    pub fn get(&self, id: i64) -> Result<Option<Budget>> {
        match self.store.get_budget_row(id)? {
            Some(row) => Ok(Some(self.with_spent(row)?)),
            None => Ok(None),
        }
    }

    /// Create a budget for `(category_id, month, year)`.
    ///
    /// The existence check here is only a fast path; the store's uniqueness
    /// constraint is the authoritative guard, so a concurrent create racing
    /// past the check still fails with [`Error::DuplicateBudget`].
    pub fn create(&self, budget: &NewBudget) -> Result<Budget> {
        if self.store.budget_exists(budget.category_id, budget.period)? {
            return Err(Error::DuplicateBudget {
                category_id: budget.category_id,
                month: budget.period.month(),
                year: budget.period.year(),
            });
        }

        let id = self.store.insert_budget(budget)?;
        debug!(id, category_id = budget.category_id, period = %budget.period, "Created budget");

        self.get(id)?
            .ok_or_else(|| Error::NotFound(format!("Budget {} after insert", id)))
    }

    /// Change a budget's limit, returning the refreshed budget
    pub fn update_amount(&self, id: i64, amount: i64) -> Result<Option<Budget>> {
        if !self.store.update_budget_amount(id, amount)? {
            return Ok(None);
        }
        self.get(id)
    }

    /// Delete a budget. Returns false when the id does not exist.
    pub fn delete(&self, id: i64) -> Result<bool> {
        self.store.delete_budget(id)
    }

    /// Roll-up of all budgets for a month.
    ///
    /// `over_limit_count` and `near_limit_count` are disjoint buckets:
    /// exceeded requires percentage >= 100, near-limit requires < 100.
    pub fn summary(&self, period: Period) -> Result<BudgetSummary> {
        let budgets = self.list(period)?;

        let total_budget = budgets.iter().map(|b| b.amount).sum();
        let total_spent = budgets.iter().map(|b| b.spent).sum();
        let over_limit_count = budgets
            .iter()
            .filter(|b| b.amount > 0 && b.spent >= b.amount)
            .count() as i64;
        let near_limit_count = budgets
            .iter()
            .filter(|b| b.status() == BudgetStatus::Warning)
            .count() as i64;

        Ok(BudgetSummary {
            total_budget,
            total_spent,
            budgets_count: budgets.len() as i64,
            over_limit_count,
            near_limit_count,
        })
    }

    /// Budgets at or above 80% of their limit (inclusive)
    pub fn alerts(&self, period: Period) -> Result<Vec<Budget>> {
        let budgets = self.list(period)?;
        Ok(budgets.into_iter().filter(|b| b.should_alert()).collect())
    }

    /// Copy the previous month's budgets into `period`, skipping categories
    /// that already have one. Returns the number copied.
    pub fn copy_from_previous_month(&self, period: Period) -> Result<usize> {
        let previous = self.store.list_budget_rows(period.prev())?;

        let mut copied = 0;
        for row in previous {
            if self.store.budget_exists(row.category_id, period)? {
                continue;
            }
            self.store.insert_budget(&NewBudget {
                category_id: row.category_id,
                amount: row.amount,
                period,
            })?;
            copied += 1;
        }

        debug!(period = %period, copied, "Copied budgets from previous month");
        Ok(copied)
    }
}
