//! Ledger trait implementations for the SQLite database

use rusqlite::params;

use super::Database;
use crate::error::Result;
use crate::ledger::{BudgetRow, BudgetStore, CategoryTotal, LedgerReader};
use crate::models::{DateRange, NewBudget, Period, TransactionType};

impl LedgerReader for Database {
    fn sum_amount(&self, kind: TransactionType, range: DateRange) -> Result<i64> {
        let conn = self.conn()?;
        let total: i64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM transactions
             WHERE type = ? AND date >= ? AND date < ?",
            params![kind.as_str(), range.start.to_string(), range.end.to_string()],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    fn sum_amount_for_category(
        &self,
        kind: TransactionType,
        category_id: i64,
        range: DateRange,
    ) -> Result<i64> {
        let conn = self.conn()?;
        let total: i64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM transactions
             WHERE type = ? AND category_id = ? AND date >= ? AND date < ?",
            params![
                kind.as_str(),
                category_id,
                range.start.to_string(),
                range.end.to_string()
            ],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    fn count_transactions(&self, range: DateRange) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE date >= ? AND date < ?",
            params![range.start.to_string(), range.end.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn sum_by_category(
        &self,
        kind: TransactionType,
        range: DateRange,
        limit: u32,
    ) -> Result<Vec<CategoryTotal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT c.id, c.name, c.color, COALESCE(SUM(t.amount), 0) as total
             FROM transactions t
             JOIN categories c ON t.category_id = c.id
             WHERE t.type = ? AND t.date >= ? AND t.date < ?
             GROUP BY c.id
             ORDER BY total DESC
             LIMIT ?",
        )?;

        let totals = stmt
            .query_map(
                params![
                    kind.as_str(),
                    range.start.to_string(),
                    range.end.to_string(),
                    limit
                ],
                |row| {
                    Ok(CategoryTotal {
                        category_id: row.get(0)?,
                        name: row.get(1)?,
                        color: row.get(2)?,
                        total: row.get(3)?,
                    })
                },
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(totals)
    }
}

impl BudgetStore for Database {
    fn list_budget_rows(&self, period: Period) -> Result<Vec<BudgetRow>> {
        self.list_budget_rows_impl(period)
    }

    fn get_budget_row(&self, id: i64) -> Result<Option<BudgetRow>> {
        self.get_budget_row_impl(id)
    }

    fn budget_exists(&self, category_id: i64, period: Period) -> Result<bool> {
        self.budget_exists_impl(category_id, period)
    }

    fn insert_budget(&self, budget: &NewBudget) -> Result<i64> {
        self.insert_budget_impl(budget)
    }

    fn update_budget_amount(&self, id: i64, amount: i64) -> Result<bool> {
        self.update_budget_amount_impl(id, amount)
    }

    fn delete_budget(&self, id: i64) -> Result<bool> {
        self.delete_budget_impl(id)
    }
}
