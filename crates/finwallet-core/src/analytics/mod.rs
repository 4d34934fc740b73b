//! Analytics and reporting engine
//!
//! Derives monthly reports, month-over-month comparisons, rule-based
//! insights, and rolling trend series from the ledger. Everything here is a
//! pure function of ledger state at call time: no caching, no invalidation,
//! no write-back. Repeated calls re-derive from scratch, which keeps results
//! fresh at the cost of repeated queries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finwallet_core::{Analytics, Database, Period};
//!
//! let db = Database::new("wallet.db")?;
//! let analytics = Analytics::new(&db);
//! let report = analytics.monthly_report(Period::new(6, 2025)?)?;
//! let insights = analytics.generate_insights(Period::new(6, 2025)?)?;
//! ```

mod comparison;
mod insights;
mod report;
mod trends;

pub use comparison::percent_change;

use crate::ledger::LedgerReader;

/// Analytics service over an injected ledger capability.
///
/// Holds no state of its own; safe to construct per call or share.
pub struct Analytics<'a> {
    ledger: &'a dyn LedgerReader,
}

impl<'a> Analytics<'a> {
    pub fn new(ledger: &'a dyn LedgerReader) -> Self {
        Self { ledger }
    }

    pub(crate) fn ledger(&self) -> &dyn LedgerReader {
        self.ledger
    }
}
