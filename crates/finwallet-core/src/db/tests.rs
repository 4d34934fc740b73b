//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_tx(kind: TransactionType, amount: i64, category_id: i64, date: &str) -> NewTransaction {
        NewTransaction {
            kind,
            amount,
            description: "test".to_string(),
            category_id,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            is_recurring: false,
            recurring_day: None,
        }
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        let categories = db.list_categories(true).unwrap();
        assert!(categories.is_empty());
    }

    #[test]
    fn test_schema_tables_exist() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('categories') WHERE name IN ('id', 'name', 'icon', 'color', 'type', 'is_custom', 'is_active', 'created_at')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 8, "categories table should have 8 expected columns");

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('transactions') WHERE name IN ('id', 'type', 'amount', 'description', 'category_id', 'date', 'is_recurring', 'recurring_day', 'created_at', 'updated_at')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(
            result, 10,
            "transactions table should have 10 expected columns"
        );

        let result: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('budgets') WHERE name IN ('id', 'category_id', 'amount', 'month', 'year', 'created_at', 'updated_at')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(result, 7, "budgets table should have 7 expected columns");
    }

    #[test]
    fn test_seed_default_categories_is_idempotent() {
        let db = Database::in_memory().unwrap();

        let seeded = db.seed_default_categories().unwrap();
        assert_eq!(seeded, 15);

        // Second seed is a no-op
        let seeded = db.seed_default_categories().unwrap();
        assert_eq!(seeded, 0);

        let categories = db.list_categories(true).unwrap();
        assert_eq!(categories.len(), 15);
        assert!(categories.iter().any(|c| c.name == "Alimentação"));
        assert!(categories.iter().any(|c| c.name == "Salário"));
    }

    #[test]
    fn test_transaction_crud() {
        let db = Database::in_memory().unwrap();
        db.seed_default_categories().unwrap();
        let food = db.find_category_id("Alimentação").unwrap().unwrap();

        let id = db
            .insert_transaction(&new_tx(TransactionType::Expense, 12_345, food, "2025-06-10"))
            .unwrap();
        assert!(id > 0);

        let tx = db.get_transaction(id).unwrap().unwrap();
        assert_eq!(tx.amount, 12_345);
        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.category_name.as_deref(), Some("Alimentação"));

        assert!(db.delete_transaction(id).unwrap());
        assert!(db.get_transaction(id).unwrap().is_none());
        assert!(!db.delete_transaction(id).unwrap());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let db = Database::in_memory().unwrap();
        db.seed_default_categories().unwrap();
        let food = db.find_category_id("Alimentação").unwrap().unwrap();

        let err = db
            .insert_transaction(&new_tx(TransactionType::Expense, -1, food, "2025-06-10"))
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidData(_)));
    }

    #[test]
    fn test_list_transactions_filters() {
        let db = Database::in_memory().unwrap();
        db.seed_default_categories().unwrap();
        let food = db.find_category_id("Alimentação").unwrap().unwrap();
        let salary = db.find_category_id("Salário").unwrap().unwrap();

        db.insert_transaction(&new_tx(TransactionType::Expense, 10_000, food, "2025-06-05"))
            .unwrap();
        db.insert_transaction(&new_tx(TransactionType::Expense, 20_000, food, "2025-06-20"))
            .unwrap();
        db.insert_transaction(&new_tx(
            TransactionType::Income,
            500_000,
            salary,
            "2025-06-01",
        ))
        .unwrap();

        let all = db.list_transactions(&TransactionFilter::default()).unwrap();
        assert_eq!(all.len(), 3);
        // Newest first
        assert_eq!(all[0].date, NaiveDate::from_ymd_opt(2025, 6, 20).unwrap());

        let expenses = db
            .list_transactions(&TransactionFilter {
                kind: Some(TransactionType::Expense),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(expenses.len(), 2);

        let limited = db
            .list_transactions(&TransactionFilter {
                limit: Some(1),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_budgets_unique_constraint_at_storage_level() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        conn.execute(
            "INSERT INTO categories (name, icon, color, type) VALUES ('Food', 'utensils', '#F97316', 'expense')",
            [],
        )
        .unwrap();
        let category_id = conn.last_insert_rowid();

        conn.execute(
            "INSERT INTO budgets (category_id, amount, month, year) VALUES (?, 100, 6, 2025)",
            [category_id],
        )
        .unwrap();

        // Same category/month/year rejected by the unique index
        let result = conn.execute(
            "INSERT INTO budgets (category_id, amount, month, year) VALUES (?, 200, 6, 2025)",
            [category_id],
        );
        assert!(
            result.is_err(),
            "Duplicate (category, month, year) budget should fail"
        );

        // Different month is fine
        conn.execute(
            "INSERT INTO budgets (category_id, amount, month, year) VALUES (?, 200, 7, 2025)",
            [category_id],
        )
        .unwrap();
    }

    #[test]
    fn test_budgets_month_range_check() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        conn.execute(
            "INSERT INTO categories (name, icon, color, type) VALUES ('Food', 'utensils', '#F97316', 'expense')",
            [],
        )
        .unwrap();
        let category_id = conn.last_insert_rowid();

        let result = conn.execute(
            "INSERT INTO budgets (category_id, amount, month, year) VALUES (?, 100, 13, 2025)",
            [category_id],
        );
        assert!(result.is_err(), "Month 13 should violate the CHECK");

        let result = conn.execute(
            "INSERT INTO budgets (category_id, amount, month, year) VALUES (?, 100, 0, 2025)",
            [category_id],
        );
        assert!(result.is_err(), "Month 0 should violate the CHECK");
    }

    #[test]
    fn test_ledger_aggregates_match_inserted_rows() {
        use crate::ledger::LedgerReader;

        let db = Database::in_memory().unwrap();
        db.seed_default_categories().unwrap();
        let food = db.find_category_id("Alimentação").unwrap().unwrap();
        let transport = db.find_category_id("Transporte").unwrap().unwrap();

        db.insert_transaction(&new_tx(TransactionType::Expense, 30_000, food, "2025-06-05"))
            .unwrap();
        db.insert_transaction(&new_tx(TransactionType::Expense, 20_000, food, "2025-06-15"))
            .unwrap();
        db.insert_transaction(&new_tx(
            TransactionType::Expense,
            10_000,
            transport,
            "2025-06-25",
        ))
        .unwrap();

        let range = Period::new(6, 2025).unwrap().date_range();

        assert_eq!(db.sum_amount(TransactionType::Expense, range).unwrap(), 60_000);
        assert_eq!(db.sum_amount(TransactionType::Income, range).unwrap(), 0);
        assert_eq!(db.count_transactions(range).unwrap(), 3);
        assert_eq!(
            db.sum_amount_for_category(TransactionType::Expense, food, range)
                .unwrap(),
            50_000
        );

        let totals = db
            .sum_by_category(TransactionType::Expense, range, 10)
            .unwrap();
        assert_eq!(totals.len(), 2);
        // Descending by total
        assert_eq!(totals[0].total, 50_000);
        assert_eq!(totals[0].name, "Alimentação");
        assert_eq!(totals[1].total, 10_000);
    }

    #[test]
    fn test_reopen_preserves_data() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("wallet.db");
        let path = path.to_str().unwrap();

        {
            let db = Database::new(path).unwrap();
            db.seed_default_categories().unwrap();
            let food = db.find_category_id("Alimentação").unwrap().unwrap();
            db.insert_transaction(&new_tx(TransactionType::Expense, 10_000, food, "2025-06-05"))
                .unwrap();
        }

        // Reopening runs migrations again and sees the same rows
        let db = Database::new(path).unwrap();
        assert_eq!(db.path(), path);
        let all = db.list_transactions(&TransactionFilter::default()).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(db.seed_default_categories().unwrap(), 0);
    }

    #[test]
    fn test_parse_datetime_roundtrip() {
        let parsed = parse_datetime("2025-06-15 12:30:45");
        assert_eq!(parsed.format("%Y-%m-%d %H:%M:%S").to_string(), "2025-06-15 12:30:45");
    }
}
