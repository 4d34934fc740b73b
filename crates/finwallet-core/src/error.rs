//! Error types for FinWallet Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidPeriod(u32),

    #[error("A budget already exists for category {category_id} in {month:02}/{year}")]
    DuplicateBudget {
        category_id: i64,
        month: u32,
        year: i32,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
