//! Rule-based insight generation
//!
//! A fixed rule set over a month comparison. Every rule is an independent
//! boolean predicate over already-computed numbers; multiple rules can fire
//! for the same month and the output order is the evaluation order below,
//! not a severity sort.

use tracing::debug;

use super::Analytics;
use crate::error::Result;
use crate::models::{Insight, InsightKind, Period};

/// Expense growth (%) above which the spike warning fires
const EXPENSE_SPIKE_THRESHOLD: f64 = 20.0;
/// Expense reduction (%) below which the savings success fires
const EXPENSE_DROP_THRESHOLD: f64 = -10.0;
/// Income growth (%) above which the income success fires
const INCOME_SPIKE_THRESHOLD: f64 = 10.0;
/// Share (%) of total expenses above which one category dominates
const CATEGORY_DOMINANCE_THRESHOLD: f64 = 40.0;
/// Savings rate (%) above which the month is celebrated
const SAVINGS_RATE_THRESHOLD: f64 = 20.0;

impl<'a> Analytics<'a> {
    /// Generate the insight list for one month.
    ///
    /// Pure function of the comparator's output for that period. The three
    /// comparison rules are suppressed when the previous month has no data
    /// (no baseline); the remaining rules only need the current report.
    pub fn generate_insights(&self, period: Period) -> Result<Vec<Insight>> {
        let comparison = self.compare_months(period)?;
        let current = &comparison.current;
        let has_baseline = comparison.previous.is_some();

        let mut insights = Vec::new();

        // Expenses grew sharply versus last month
        if has_baseline && comparison.expense_change > EXPENSE_SPIKE_THRESHOLD {
            insights.push(Insight {
                kind: InsightKind::Warning,
                icon: "TrendingUp",
                title: "Gastos aumentaram".to_string(),
                description: format!(
                    "Você gastou {:.0}% mais que no mês passado.",
                    comparison.expense_change.abs()
                ),
            });
        }

        // Expenses dropped meaningfully
        if has_baseline && comparison.expense_change < EXPENSE_DROP_THRESHOLD {
            insights.push(Insight {
                kind: InsightKind::Success,
                icon: "TrendingDown",
                title: "Ótimo trabalho!".to_string(),
                description: format!(
                    "Você economizou {:.0}% comparado ao mês passado.",
                    comparison.expense_change.abs()
                ),
            });
        }

        // Income grew
        if has_baseline && comparison.income_change > INCOME_SPIKE_THRESHOLD {
            insights.push(Insight {
                kind: InsightKind::Success,
                icon: "Wallet",
                title: "Renda em alta".to_string(),
                description: format!(
                    "Sua renda aumentou {:.0}% este mês!",
                    comparison.income_change
                ),
            });
        }

        // One category dominates the month's spending
        if let Some(top) = current.top_categories.first() {
            if top.percentage > CATEGORY_DOMINANCE_THRESHOLD {
                insights.push(Insight {
                    kind: InsightKind::Info,
                    icon: "Target",
                    title: format!("{} domina seus gastos", top.name),
                    description: format!(
                        "{:.0}% do total de despesas foi em {}.",
                        top.percentage, top.name
                    ),
                });
            }
        }

        // Healthy savings rate (balance > 0 implies income > 0, but the
        // denominator guard stays explicit)
        if current.balance > 0 && current.total_income > 0 {
            let savings_rate = current.balance as f64 / current.total_income as f64 * 100.0;
            if savings_rate > SAVINGS_RATE_THRESHOLD {
                insights.push(Insight {
                    kind: InsightKind::Success,
                    icon: "PartyPopper",
                    title: "Excelente taxa de economia!".to_string(),
                    description: format!(
                        "Você está guardando {:.0}% da sua renda.",
                        savings_rate
                    ),
                });
            }
        }

        // Spent more than earned
        if current.balance < 0 {
            insights.push(Insight {
                kind: InsightKind::Warning,
                icon: "AlertTriangle",
                title: "Atenção: Saldo negativo".to_string(),
                description: format!(
                    "Você gastou R$ {:.2} a mais do que ganhou.",
                    current.balance.abs() as f64 / 100.0
                ),
            });
        }

        // Nothing recorded this month
        if current.transaction_count == 0 {
            insights.push(Insight {
                kind: InsightKind::Info,
                icon: "FileText",
                title: "Sem registros este mês".to_string(),
                description: "Comece a registrar suas transações para ver insights!".to_string(),
            });
        }

        debug!(period = %period, count = insights.len(), "Generated insights");
        Ok(insights)
    }
}
