//! Ledger query boundary
//!
//! The analytics and budget services never touch SQL directly. They are
//! constructed with these capabilities and see only typed result rows, so a
//! test double (or a different store) can stand in for the SQLite ledger.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::models::{DateRange, NewBudget, Period, TransactionType};

/// Read-only aggregate queries over the transaction ledger.
///
/// Every method is a pure query: no mutation, safe to call concurrently and
/// repeatedly. Storage failures are propagated unchanged; the core never
/// retries.
pub trait LedgerReader: Send + Sync {
    /// Sum of amounts (cents) for one transaction type within the range
    fn sum_amount(&self, kind: TransactionType, range: DateRange) -> Result<i64>;

    /// Sum of amounts (cents) for one type and category within the range
    fn sum_amount_for_category(
        &self,
        kind: TransactionType,
        category_id: i64,
        range: DateRange,
    ) -> Result<i64>;

    /// Number of transactions of any type within the range
    fn count_transactions(&self, range: DateRange) -> Result<i64>;

    /// Per-category sums for one type within the range, descending by
    /// total, truncated to `limit` rows
    fn sum_by_category(
        &self,
        kind: TransactionType,
        range: DateRange,
        limit: u32,
    ) -> Result<Vec<CategoryTotal>>;
}

/// One row of a grouped-by-category sum
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category_id: i64,
    pub name: String,
    pub color: String,
    /// Sum in cents
    pub total: i64,
}

/// Persisted budget rows and their mutations.
///
/// The store must enforce at most one budget per `(category_id, month,
/// year)` as a hard constraint; [`BudgetStore::budget_exists`] is only an
/// advisory fast-path check for callers that want to pre-validate.
pub trait BudgetStore: Send + Sync {
    /// Budget rows for a month with joined category display fields,
    /// without derived spend
    fn list_budget_rows(&self, period: Period) -> Result<Vec<BudgetRow>>;

    fn get_budget_row(&self, id: i64) -> Result<Option<BudgetRow>>;

    /// Advisory existence check for `(category_id, month, year)`
    fn budget_exists(&self, category_id: i64, period: Period) -> Result<bool>;

    /// Insert a budget row, failing with
    /// [`crate::Error::DuplicateBudget`] when the uniqueness constraint is
    /// violated. Returns the new row id.
    fn insert_budget(&self, budget: &NewBudget) -> Result<i64>;

    /// Update a budget's limit. Returns false when the id does not exist.
    fn update_budget_amount(&self, id: i64, amount: i64) -> Result<bool>;

    /// Delete a budget row. Returns false when the id does not exist.
    fn delete_budget(&self, id: i64) -> Result<bool>;
}

/// A stored budget row as returned by the ledger, before spend derivation
#[derive(Debug, Clone)]
pub struct BudgetRow {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub category_color: String,
    pub category_icon: String,
    /// Limit in cents
    pub amount: i64,
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
