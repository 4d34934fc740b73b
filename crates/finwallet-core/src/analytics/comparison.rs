//! Month-over-month comparison

use super::Analytics;
use crate::error::Result;
use crate::models::{MonthComparison, Period};

/// Percentage change from `previous` to `current`.
///
/// A zero baseline returns 100 for any activity and 0 for none, so new
/// activity reads as a full swing instead of undefined/infinite. Callers can
/// rely on the result always being finite.
pub fn percent_change(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        if current > 0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) as f64 / previous as f64 * 100.0
    }
}

impl<'a> Analytics<'a> {
    /// Compare a month's report against the preceding month.
    ///
    /// `previous` is `None` when the preceding month had zero transactions,
    /// which signals "no baseline" rather than "zero change". The raw
    /// percentage deltas are computed from the preceding report's totals
    /// either way; insight rules decide whether they are meaningful.
    pub fn compare_months(&self, period: Period) -> Result<MonthComparison> {
        let current = self.monthly_report(period)?;
        let previous = self.monthly_report(period.prev())?;

        let income_change = percent_change(current.total_income, previous.total_income);
        let expense_change = percent_change(current.total_expense, previous.total_expense);
        let balance_change = percent_change(current.balance, previous.balance);

        Ok(MonthComparison {
            current,
            previous: (previous.transaction_count > 0).then_some(previous),
            income_change,
            expense_change,
            balance_change,
        })
    }
}
