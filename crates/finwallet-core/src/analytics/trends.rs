//! Rolling income/expense trend series

use super::Analytics;
use crate::error::Result;
use crate::models::{Period, TrendPoint};

/// Default window for the dashboard chart
pub const DEFAULT_TREND_MONTHS: usize = 6;

impl<'a> Analytics<'a> {
    /// Income/expense series for the `n` months ending at `ending`,
    /// oldest first.
    ///
    /// Each point is a fresh monthly report projected to its totals; there
    /// is no incremental computation or caching, every call re-derives all
    /// `n` months from the ledger.
    pub fn last_months_summary(&self, ending: Period, n: usize) -> Result<Vec<TrendPoint>> {
        let mut periods = Vec::with_capacity(n);
        let mut period = ending;
        for _ in 0..n {
            periods.push(period);
            period = period.prev();
        }
        periods.reverse();

        let mut points = Vec::with_capacity(n);
        for period in periods {
            let report = self.monthly_report(period)?;
            points.push(TrendPoint {
                month: period.label(),
                income: report.total_income,
                expense: report.total_expense,
            });
        }

        Ok(points)
    }

    /// Six-month series ending at the current calendar month
    pub fn recent_trend(&self) -> Result<Vec<TrendPoint>> {
        self.last_months_summary(Period::current(), DEFAULT_TREND_MONTHS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{NewTransaction, TransactionType};
    use chrono::NaiveDate;

    fn insert(db: &Database, kind: TransactionType, amount: i64, category: i64, date: NaiveDate) {
        db.insert_transaction(&NewTransaction {
            kind,
            amount,
            description: "test".to_string(),
            category_id: category,
            date,
            is_recurring: false,
            recurring_day: None,
        })
        .unwrap();
    }

    #[test]
    fn test_trend_is_oldest_first_with_year_rollover() {
        let db = Database::in_memory().unwrap();
        db.seed_default_categories().unwrap();
        let food = db.find_category_id("Alimentação").unwrap().unwrap();

        // One expense per month from Nov 2024 through Feb 2025
        for (year, month, amount) in [
            (2024, 11, 10_000),
            (2024, 12, 20_000),
            (2025, 1, 30_000),
            (2025, 2, 40_000),
        ] {
            insert(
                &db,
                TransactionType::Expense,
                amount,
                food,
                NaiveDate::from_ymd_opt(year, month, 15).unwrap(),
            );
        }

        let analytics = Analytics::new(&db);
        let points = analytics
            .last_months_summary(Period::new(2, 2025).unwrap(), 4)
            .unwrap();

        assert_eq!(points.len(), 4);
        let labels: Vec<&str> = points.iter().map(|p| p.month).collect();
        assert_eq!(labels, vec!["Nov", "Dez", "Jan", "Fev"]);
        let expenses: Vec<i64> = points.iter().map(|p| p.expense).collect();
        assert_eq!(expenses, vec![10_000, 20_000, 30_000, 40_000]);
    }

    #[test]
    fn test_latest_point_matches_monthly_report() {
        let db = Database::in_memory().unwrap();
        db.seed_default_categories().unwrap();
        let food = db.find_category_id("Alimentação").unwrap().unwrap();
        let salary = db.find_category_id("Salário").unwrap().unwrap();

        insert(
            &db,
            TransactionType::Income,
            250_000,
            salary,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );
        insert(
            &db,
            TransactionType::Expense,
            90_000,
            food,
            NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
        );

        let analytics = Analytics::new(&db);
        let ending = Period::new(6, 2025).unwrap();
        let points = analytics
            .last_months_summary(ending, DEFAULT_TREND_MONTHS)
            .unwrap();
        let report = analytics.monthly_report(ending).unwrap();

        let latest = points.last().unwrap();
        assert_eq!(latest.income, report.total_income);
        assert_eq!(latest.expense, report.total_expense);
        assert_eq!(latest.month, ending.label());
    }

    #[test]
    fn test_months_without_data_are_zero_points() {
        let db = Database::in_memory().unwrap();
        db.seed_default_categories().unwrap();

        let analytics = Analytics::new(&db);
        let points = analytics
            .last_months_summary(Period::new(6, 2025).unwrap(), 3)
            .unwrap();

        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.income == 0 && p.expense == 0));
    }
}
