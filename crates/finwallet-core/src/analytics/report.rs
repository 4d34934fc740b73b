//! Monthly report builder

use tracing::debug;

use super::Analytics;
use crate::error::Result;
use crate::models::{CategorySpending, MonthlyReport, Period, TransactionType};

/// Top-N truncation for the category breakdown
const TOP_CATEGORIES_LIMIT: u32 = 5;

impl<'a> Analytics<'a> {
    /// Build the income/expense/balance report for one calendar month.
    ///
    /// Queries the ledger over the half-open `[startOfMonth,
    /// startOfNextMonth)` range. Fails only when the ledger fails; storage
    /// errors are propagated unchanged.
    pub fn monthly_report(&self, period: Period) -> Result<MonthlyReport> {
        let range = period.date_range();

        let total_income = self.ledger().sum_amount(TransactionType::Income, range)?;
        let total_expense = self.ledger().sum_amount(TransactionType::Expense, range)?;
        let transaction_count = self.ledger().count_transactions(range)?;

        let totals =
            self.ledger()
                .sum_by_category(TransactionType::Expense, range, TOP_CATEGORIES_LIMIT)?;

        let top_categories = totals
            .into_iter()
            .map(|c| CategorySpending {
                category_id: c.category_id,
                name: c.name,
                color: c.color,
                percentage: if total_expense > 0 {
                    c.total as f64 / total_expense as f64 * 100.0
                } else {
                    0.0
                },
                total: c.total,
            })
            .collect();

        debug!(
            period = %period,
            total_income,
            total_expense,
            transaction_count,
            "Built monthly report"
        );

        Ok(MonthlyReport {
            month: period.month(),
            year: period.year(),
            total_income,
            total_expense,
            balance: total_income - total_expense,
            top_categories,
            transaction_count,
        })
    }
}
