//! Per-category and per-month totals derived from the transaction list.

use crate::model::category::{category_name, UNKNOWN_CATEGORY};
use crate::model::{Category, Transaction, TransactionType};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The summed amount for one resolved category name. Recomputed on every fetch and
/// filter change, never stored.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub(crate) category: String,
    pub(crate) amount: Decimal,
}

impl CategoryTotal {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Income and expense sums for one calendar month of the selected year.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// 1-based month number, January = 1.
    pub(crate) month: u32,
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl MonthlyTotal {
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn label(&self) -> &'static str {
        MONTH_LABELS[(self.month - 1) as usize]
    }

    pub fn income(&self) -> Decimal {
        self.income
    }

    pub fn expense(&self) -> Decimal {
        self.expense
    }
}

/// Groups transactions by resolved category name and sums their amounts.
///
/// Category names are emitted in first-seen order among the input transactions, not
/// sorted. A `category_id` that does not resolve is grouped under "Unknown". Empty
/// input yields empty output; the presentation layer is responsible for rendering a
/// "no data" placeholder in that case.
pub fn by_category(transactions: &[Transaction], categories: &[Category]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for tx in transactions {
        let name = category_name(categories, tx.category_id).unwrap_or(UNKNOWN_CATEGORY);
        match index.get(name) {
            Some(&ix) => totals[ix].amount += tx.amount,
            None => {
                index.insert(name.to_string(), totals.len());
                totals.push(CategoryTotal {
                    category: name.to_string(),
                    amount: tx.amount,
                });
            }
        }
    }
    totals
}

/// Sums income and expense per calendar month for the requested year.
///
/// Always returns exactly 12 entries (Jan through Dec) regardless of data sparsity;
/// months with no matching transactions are zero. The transaction's UTC year and
/// month are used.
pub fn by_month(transactions: &[Transaction], year: i32) -> [MonthlyTotal; 12] {
    let mut months: [MonthlyTotal; 12] = std::array::from_fn(|ix| MonthlyTotal {
        month: ix as u32 + 1,
        income: Decimal::ZERO,
        expense: Decimal::ZERO,
    });

    for tx in transactions {
        if tx.created_at.year() != year {
            continue;
        }
        let slot = &mut months[(tx.created_at.month() - 1) as usize];
        match tx.transaction_type {
            TransactionType::Income => slot.income += tx.amount,
            TransactionType::Expense => slot.expense += tx.amount,
        }
    }
    months
}

/// Sum of a list of category totals, e.g. for the total-income / total-expense
/// headline figures.
pub fn total(totals: &[CategoryTotal]) -> Decimal {
    totals.iter().map(|t| t.amount).sum()
}

/// The per-transaction breakdown behind one category of one type: the data for the
/// drill-down chart opened by clicking a slice in the original dashboard.
pub fn drill_down(
    transactions: &[Transaction],
    categories: &[Category],
    category: &str,
    transaction_type: TransactionType,
) -> Vec<CategoryTotal> {
    transactions
        .iter()
        .filter(|tx| {
            tx.transaction_type == transaction_type
                && category_name(categories, tx.category_id) == Some(category)
        })
        .map(|tx| CategoryTotal {
            category: tx.name.clone(),
            amount: tx.amount,
        })
        .collect()
}
