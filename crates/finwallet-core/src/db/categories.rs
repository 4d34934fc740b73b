//! Category reference data

use rusqlite::params;
use tracing::info;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{Category, CategoryType};

/// Default categories shipped with a fresh wallet (name, icon, color, type)
const DEFAULT_CATEGORIES: &[(&str, &str, &str, CategoryType)] = &[
    // Expenses
    ("Alimentação", "utensils", "#F97316", CategoryType::Expense),
    ("Transporte", "car", "#3B82F6", CategoryType::Expense),
    ("Moradia", "home", "#8B5CF6", CategoryType::Expense),
    ("Saúde", "heart-pulse", "#EF4444", CategoryType::Expense),
    ("Educação", "graduation-cap", "#14B8A6", CategoryType::Expense),
    ("Lazer", "gamepad-2", "#EC4899", CategoryType::Expense),
    ("Compras", "shopping-bag", "#F59E0B", CategoryType::Expense),
    ("Serviços", "wrench", "#6366F1", CategoryType::Expense),
    ("Pets", "paw-print", "#84CC16", CategoryType::Expense),
    ("Outros", "more-horizontal", "#64748B", CategoryType::Expense),
    // Income
    ("Salário", "banknote", "#22C55E", CategoryType::Income),
    ("Freelance", "laptop", "#06B6D4", CategoryType::Income),
    ("Investimentos", "trending-up", "#10B981", CategoryType::Income),
    ("Presente", "gift", "#A855F7", CategoryType::Income),
    ("Outros", "plus-circle", "#64748B", CategoryType::Income),
];

impl Database {
    /// Insert a custom category, returning its id
    pub fn insert_category(
        &self,
        name: &str,
        icon: &str,
        color: &str,
        kind: CategoryType,
    ) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO categories (name, icon, color, type, is_custom) VALUES (?, ?, ?, ?, 1)",
            params![name, icon, color, kind.as_str()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Seed the default category set on an empty table
    ///
    /// Returns the number of categories inserted (0 when already seeded).
    pub fn seed_default_categories(&self) -> Result<usize> {
        let conn = self.conn()?;

        let existing: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }

        let mut stmt = conn.prepare(
            "INSERT INTO categories (name, icon, color, type, is_custom) VALUES (?, ?, ?, ?, 0)",
        )?;
        for (name, icon, color, kind) in DEFAULT_CATEGORIES {
            stmt.execute(params![name, icon, color, kind.as_str()])?;
        }

        info!(count = DEFAULT_CATEGORIES.len(), "Seeded default categories");
        Ok(DEFAULT_CATEGORIES.len())
    }

    /// List categories, optionally only active ones
    pub fn list_categories(&self, active_only: bool) -> Result<Vec<Category>> {
        let conn = self.conn()?;

        let sql = if active_only {
            "SELECT id, name, icon, color, type, is_custom, is_active, created_at
             FROM categories WHERE is_active = 1 ORDER BY name"
        } else {
            "SELECT id, name, icon, color, type, is_custom, is_active, created_at
             FROM categories ORDER BY name"
        };

        let mut stmt = conn.prepare(sql)?;
        let categories = stmt
            .query_map([], |row| {
                let kind: String = row.get(4)?;
                let created_at: String = row.get(7)?;
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    icon: row.get(2)?,
                    color: row.get(3)?,
                    kind: kind.parse().unwrap_or(CategoryType::Expense),
                    is_custom: row.get(5)?,
                    is_active: row.get(6)?,
                    created_at: parse_datetime(&created_at),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Look up a category by name (exact match), returning its id
    pub fn find_category_id(&self, name: &str) -> Result<Option<i64>> {
        use rusqlite::OptionalExtension;

        let conn = self.conn()?;
        let id = conn
            .query_row(
                "SELECT id FROM categories WHERE name = ? LIMIT 1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }
}
