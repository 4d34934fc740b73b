//! FinWallet Core Library
//!
//! Analytics and reporting engine for the FinWallet personal finance app:
//! - SQLite-backed ledger with pooled connections and migrations
//! - Monthly income/expense/balance reports with category breakdowns
//! - Month-over-month comparison with explicit no-baseline handling
//! - Rule-based financial insights
//! - Rolling income/expense trend series
//! - Per-category budgets with derived spend tracking and alerts
//!
//! All monetary values are integer cents. Monthly windows are the half-open
//! range `[startOfMonth, startOfNextMonth)`.

pub mod analytics;
pub mod budgets;
pub mod db;
pub mod error;
pub mod ledger;
pub mod models;

pub use analytics::{percent_change, Analytics};
pub use budgets::Budgets;
pub use db::{Database, TransactionFilter};
pub use error::{Error, Result};
pub use ledger::{BudgetRow, BudgetStore, CategoryTotal, LedgerReader};
pub use models::{
    Budget, BudgetStatus, BudgetSummary, Category, CategorySpending, CategoryType, DateRange,
    Insight, InsightKind, MonthComparison, MonthlyReport, NewBudget, NewTransaction, Period,
    Transaction, TransactionType, TrendPoint,
};
