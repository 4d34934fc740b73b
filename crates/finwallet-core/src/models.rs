//! Domain models for FinWallet
//!
//! All money amounts are integer minor units (cents). The sign of a
//! transaction is carried by its [`TransactionType`], never by the stored
//! amount, so `amount >= 0` everywhere.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{Error, Result};

/// Whether a transaction adds to or subtracts from the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which transaction types a category may be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expense,
    Both,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Both => "both",
        }
    }
}

impl std::str::FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "both" => Ok(Self::Both),
            _ => Err(format!("Unknown category type: {}", s)),
        }
    }
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A spending/income category (read-only reference data for the core)
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Symbolic icon name rendered by the UI layer
    pub icon: String,
    /// Hex color
    pub color: String,
    pub kind: CategoryType,
    pub is_custom: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A ledger transaction
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub kind: TransactionType,
    /// Amount in cents, always >= 0
    pub amount: i64,
    pub description: String,
    pub category_id: i64,
    pub date: NaiveDate,
    pub is_recurring: bool,
    /// Day of month (1-31) for recurring entries
    pub recurring_day: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Joined category fields for display
    pub category_name: Option<String>,
    pub category_icon: Option<String>,
    pub category_color: Option<String>,
}

/// Insert payload for a new transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub amount: i64,
    pub description: String,
    pub category_id: i64,
    pub date: NaiveDate,
    pub is_recurring: bool,
    pub recurring_day: Option<u32>,
}

/// Half-open date range `[start, end)` — includes start, excludes end.
///
/// Month ranges are always expressed this way to avoid end-of-month
/// day-count ambiguity (28/29/30/31).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Portuguese 3-letter month abbreviations, used for trend chart labels
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// A calendar month, validated at construction.
///
/// The month is checked against 1-12 before any query is issued, so every
/// downstream date computation can assume a valid period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    month: u32,
    year: i32,
}

impl Period {
    /// Create a period, failing fast on an out-of-range month
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidPeriod(month));
        }
        Ok(Self { month, year })
    }

    /// The current calendar month in local time
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            month: today.month(),
            year: today.year(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The previous calendar month (January wraps to December of year - 1)
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                month: 12,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }

    /// The next calendar month (December wraps to January of year + 1)
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                month: 1,
                year: self.year + 1,
            }
        } else {
            Self {
                month: self.month + 1,
                year: self.year,
            }
        }
    }

    /// Half-open range `[startOfMonth, startOfNextMonth)` covering this month
    pub fn date_range(&self) -> DateRange {
        let next = self.next();
        // Month is validated at construction and day 1 always exists
        let start = NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(next.year, next.month, 1).unwrap();
        DateRange { start, end }
    }

    /// Localized 3-letter month abbreviation (e.g. "Fev")
    pub fn label(&self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.month - 1) as usize]
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// One entry of a report's top-category breakdown
#[derive(Debug, Clone, Serialize)]
pub struct CategorySpending {
    pub category_id: i64,
    pub name: String,
    pub color: String,
    /// Spent in this category over the period, in cents
    pub total: i64,
    /// Share of the period's total expenses, 0.0 when there were none
    pub percentage: f64,
}

/// Income/expense/balance summary for one calendar month.
///
/// Built fresh from the ledger on every call; never cached or persisted.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub month: u32,
    pub year: i32,
    pub total_income: i64,
    pub total_expense: i64,
    /// `total_income - total_expense`, may be negative
    pub balance: i64,
    /// Top 5 expense categories, descending by total
    pub top_categories: Vec<CategorySpending>,
    pub transaction_count: i64,
}

/// A month's report alongside its predecessor and the percentage deltas.
///
/// `previous` is `None` when the preceding month had zero transactions.
/// That distinguishes "no baseline" from "zero change" and suppresses
/// comparison-dependent insights. The raw percentage changes are still
/// computed from the preceding month's totals either way.
#[derive(Debug, Clone, Serialize)]
pub struct MonthComparison {
    pub current: MonthlyReport,
    pub previous: Option<MonthlyReport>,
    pub income_change: f64,
    pub expense_change: f64,
    pub balance_change: f64,
}

/// Visual weight of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Success,
    Info,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rule-derived observation about a month's financial behavior.
///
/// Stateless: regenerated on every call, never persisted or deduplicated.
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    /// Symbolic icon name rendered by the UI layer
    pub icon: &'static str,
    pub title: String,
    pub description: String,
}

/// One point of the rolling income/expense trend series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// 3-letter month label (e.g. "Set")
    pub month: &'static str,
    pub income: i64,
    pub expense: i64,
}

/// Classification of a budget's spend against its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Ok,
    /// At or above 80% of the limit, below 100%
    Warning,
    /// At or above 100% of the limit
    Exceeded,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Exceeded => "exceeded",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spent-at-or-above-this share of the limit triggers a warning/alert
const NEAR_LIMIT_PERCENTAGE: f64 = 80.0;

/// A per-category monthly spending limit with its derived spend.
///
/// `spent` is computed from the ledger on every read, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct Budget {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub category_color: String,
    pub category_icon: String,
    /// Limit in cents
    pub amount: i64,
    /// Expense total for the category in this month, in cents (derived)
    pub spent: i64,
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Share of the limit already spent, 0.0 for zero-limit budgets
    pub fn percentage(&self) -> f64 {
        if self.amount > 0 {
            self.spent as f64 / self.amount as f64 * 100.0
        } else {
            0.0
        }
    }

    /// `Ok -> Warning (at 80%) -> Exceeded (at 100%)`, monotonic in `spent`
    /// for a fixed positive limit. Zero-limit budgets are always `Ok`.
    pub fn status(&self) -> BudgetStatus {
        let percentage = self.percentage();
        if percentage >= 100.0 {
            BudgetStatus::Exceeded
        } else if percentage >= NEAR_LIMIT_PERCENTAGE {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Ok
        }
    }

    /// Alert at 80% of the limit, inclusive
    pub fn should_alert(&self) -> bool {
        self.percentage() >= NEAR_LIMIT_PERCENTAGE
    }

    /// Cents left before the limit; negative once exceeded
    pub fn remaining(&self) -> i64 {
        self.amount - self.spent
    }
}

/// Insert payload for a new budget
#[derive(Debug, Clone)]
pub struct NewBudget {
    pub category_id: i64,
    /// Limit in cents
    pub amount: i64,
    pub period: Period,
}

/// Roll-up of all budgets for a month, recomputed on every call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetSummary {
    pub total_budget: i64,
    pub total_spent: i64,
    pub budgets_count: i64,
    /// Budgets with `amount > 0` and `spent >= amount`
    pub over_limit_count: i64,
    /// Budgets at 80-99% of their limit
    pub near_limit_count: i64,
}
