//! Transaction operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{DateRange, NewTransaction, Transaction, TransactionType};

/// Optional filters for transaction listing
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionType>,
    pub category_id: Option<i64>,
    pub range: Option<DateRange>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

const TRANSACTION_COLUMNS: &str = "t.id, t.type, t.amount, t.description, t.category_id, t.date, \
     t.is_recurring, t.recurring_day, t.created_at, t.updated_at, \
     c.name, c.icon, c.color";

fn map_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    let kind: String = row.get(1)?;
    let date: String = row.get(5)?;
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;
    Ok(Transaction {
        id: row.get(0)?,
        kind: kind.parse().unwrap_or(TransactionType::Expense),
        amount: row.get(2)?,
        description: row.get(3)?,
        category_id: row.get(4)?,
        date: chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .unwrap_or_else(|_| chrono::Utc::now().date_naive()),
        is_recurring: row.get(6)?,
        recurring_day: row.get(7)?,
        created_at: parse_datetime(&created_at),
        updated_at: parse_datetime(&updated_at),
        category_name: row.get(10)?,
        category_icon: row.get(11)?,
        category_color: row.get(12)?,
    })
}

impl Database {
    /// Insert a transaction, returning its id
    ///
    /// Amounts must be non-negative cents; the sign lives in the type.
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        if tx.amount < 0 {
            return Err(Error::InvalidData(format!(
                "Transaction amount must be >= 0, got {}",
                tx.amount
            )));
        }
        if let Some(day) = tx.recurring_day {
            if !(1..=31).contains(&day) {
                return Err(Error::InvalidData(format!(
                    "Recurring day must be 1-31, got {}",
                    day
                )));
            }
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO transactions (type, amount, description, category_id, date, is_recurring, recurring_day)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                tx.kind.as_str(),
                tx.amount,
                tx.description,
                tx.category_id,
                tx.date.to_string(),
                tx.is_recurring,
                tx.recurring_day,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a transaction by id with joined category fields
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        use rusqlite::OptionalExtension;

        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions t JOIN categories c ON t.category_id = c.id WHERE t.id = ?",
            TRANSACTION_COLUMNS
        );
        let tx = conn
            .query_row(&sql, params![id], map_transaction)
            .optional()?;
        Ok(tx)
    }

    /// List transactions with optional filters, newest first
    pub fn list_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut sql = format!(
            "SELECT {} FROM transactions t JOIN categories c ON t.category_id = c.id WHERE 1=1",
            TRANSACTION_COLUMNS
        );
        let mut query_params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(kind) = filter.kind {
            sql.push_str(" AND t.type = ?");
            query_params.push(Box::new(kind.as_str()));
        }
        if let Some(category_id) = filter.category_id {
            sql.push_str(" AND t.category_id = ?");
            query_params.push(Box::new(category_id));
        }
        if let Some(range) = filter.range {
            sql.push_str(" AND t.date >= ? AND t.date < ?");
            query_params.push(Box::new(range.start.to_string()));
            query_params.push(Box::new(range.end.to_string()));
        }
        if let Some(search) = &filter.search {
            sql.push_str(" AND t.description LIKE ? COLLATE NOCASE");
            query_params.push(Box::new(format!("%{}%", search)));
        }

        sql.push_str(" ORDER BY t.date DESC, t.created_at DESC");

        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            query_params.push(Box::new(limit));
            if let Some(offset) = filter.offset {
                sql.push_str(" OFFSET ?");
                query_params.push(Box::new(offset));
            }
        }

        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> =
            query_params.iter().map(|p| p.as_ref()).collect();

        let transactions = stmt
            .query_map(param_refs.as_slice(), map_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Delete a transaction. Returns false when the id does not exist.
    pub fn delete_transaction(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        Ok(changed > 0)
    }
}
