//! Persisted budget rows
//!
//! Raw row access only; spend derivation and status classification live in
//! [`crate::budgets::Budgets`].

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::ledger::BudgetRow;
use crate::models::{NewBudget, Period};

const BUDGET_COLUMNS: &str = "b.id, b.category_id, c.name, c.color, c.icon, \
     b.amount, b.month, b.year, b.created_at, b.updated_at";

fn map_budget_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BudgetRow> {
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;
    Ok(BudgetRow {
        id: row.get(0)?,
        category_id: row.get(1)?,
        category_name: row.get(2)?,
        category_color: row.get(3)?,
        category_icon: row.get(4)?,
        amount: row.get(5)?,
        month: row.get(6)?,
        year: row.get(7)?,
        created_at: parse_datetime(&created_at),
        updated_at: parse_datetime(&updated_at),
    })
}

impl Database {
    pub(crate) fn list_budget_rows_impl(&self, period: Period) -> Result<Vec<BudgetRow>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM budgets b JOIN categories c ON b.category_id = c.id \
             WHERE b.month = ? AND b.year = ? ORDER BY b.id",
            BUDGET_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![period.month(), period.year()], map_budget_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub(crate) fn get_budget_row_impl(&self, id: i64) -> Result<Option<BudgetRow>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM budgets b JOIN categories c ON b.category_id = c.id WHERE b.id = ?",
            BUDGET_COLUMNS
        );
        let row = conn.query_row(&sql, params![id], map_budget_row).optional()?;
        Ok(row)
    }

    pub(crate) fn budget_exists_impl(&self, category_id: i64, period: Period) -> Result<bool> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM budgets WHERE category_id = ? AND month = ? AND year = ?",
            params![category_id, period.month(), period.year()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub(crate) fn insert_budget_impl(&self, budget: &NewBudget) -> Result<i64> {
        let conn = self.conn()?;
        let result = conn.execute(
            "INSERT INTO budgets (category_id, amount, month, year) VALUES (?, ?, ?, ?)",
            params![
                budget.category_id,
                budget.amount,
                budget.period.month(),
                budget.period.year(),
            ],
        );

        match result {
            Ok(_) => Ok(conn.last_insert_rowid()),
            // The UNIQUE(category_id, month, year) index is the
            // authoritative duplicate guard; surface it as its own error so
            // callers can tell "already budgeted" from storage failure.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(Error::DuplicateBudget {
                    category_id: budget.category_id,
                    month: budget.period.month(),
                    year: budget.period.year(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn update_budget_amount_impl(&self, id: i64, amount: i64) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE budgets SET amount = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
            params![amount, id],
        )?;
        Ok(changed > 0)
    }

    pub(crate) fn delete_budget_impl(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM budgets WHERE id = ?", params![id])?;
        Ok(changed > 0)
    }
}
