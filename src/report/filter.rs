//! Multi-field filtering and page slicing for the transaction table.

use crate::model::category::category_name;
use crate::model::{Category, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Rows shown per page of the transaction table.
pub const PAGE_SIZE: usize = 7;

/// The active filter predicate. Every field is optional; an unset field does not
/// constrain the result. All comparisons are exact after parsing, there is no
/// partial or fuzzy matching.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Filters {
    /// Matches against the transaction's resolved category name.
    pub(crate) category: Option<String>,
    pub(crate) min_amount: Option<Decimal>,
    pub(crate) max_amount: Option<Decimal>,
    /// Matches against the UTC calendar day of `created_at`.
    pub(crate) date: Option<NaiveDate>,
}

impl Filters {
    pub fn new(
        category: Option<String>,
        min_amount: Option<Decimal>,
        max_amount: Option<Decimal>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            category,
            min_amount,
            max_amount,
            date,
        }
    }

    /// True when no field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.min_amount.is_none()
            && self.max_amount.is_none()
            && self.date.is_none()
    }

    fn matches(&self, tx: &Transaction, categories: &[Category]) -> bool {
        if let Some(category) = &self.category {
            if category_name(categories, tx.category_id) != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.min_amount {
            if tx.amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if tx.amount > max {
                return false;
            }
        }
        if let Some(date) = self.date {
            if tx.created_at.date_naive() != date {
                return false;
            }
        }
        true
    }
}

/// Applies the predicate to the full transaction list. The result is always a subset
/// of the input, in input order, and filtering an already-filtered list with the
/// same predicate yields the same list.
pub fn apply(
    transactions: &[Transaction],
    categories: &[Category],
    filters: &Filters,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| filters.matches(tx, categories))
        .cloned()
        .collect()
}

/// The number of pages needed for `len` filtered transactions.
pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Returns the slice for the given 1-based page number. Out-of-range page numbers,
/// including zero, yield an empty slice rather than an error.
pub fn page(filtered: &[Transaction], page_number: usize) -> &[Transaction] {
    let start = match page_number
        .checked_sub(1)
        .and_then(|n| n.checked_mul(PAGE_SIZE))
    {
        Some(start) if start < filtered.len() => start,
        _ => return &[],
    };
    let end = (start + PAGE_SIZE).min(filtered.len());
    &filtered[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionType;
    use crate::test::{cat, tx};
    use std::str::FromStr;

    fn fixture() -> (Vec<Transaction>, Vec<Category>) {
        let categories = vec![cat(1, "Food"), cat(2, "Rent")];
        let transactions = vec![
            tx(1, TransactionType::Expense, 1, "A", "50", "2025-05-01T23:30:00Z"),
            tx(2, TransactionType::Expense, 1, "B", "30", "2025-05-02T00:15:00Z"),
            tx(3, TransactionType::Expense, 2, "C", "700", "2025-05-02T12:00:00Z"),
            tx(4, TransactionType::Income, 9, "D", "120", "2025-05-03T12:00:00Z"),
        ];
        (transactions, categories)
    }

    #[test]
    fn test_min_amount_example() {
        let (transactions, categories) = fixture();
        let filters = Filters::new(None, Some(Decimal::from(40)), None, None);
        let out = apply(&transactions[..2], &categories, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id(), 1);
    }

    #[test]
    fn test_all_fields_and_together() {
        let (transactions, categories) = fixture();
        let filters = Filters::new(
            Some("Food".to_string()),
            Some(Decimal::from(40)),
            Some(Decimal::from(60)),
            Some(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()),
        );
        let out = apply(&transactions, &categories, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id(), 1);
    }

    #[test]
    fn test_date_is_utc_calendar_day() {
        let (transactions, categories) = fixture();
        // 2025-05-01T23:30:00Z is May 1 in UTC even though it is already May 2 in
        // timezones east of UTC+0:30.
        let filters = Filters::new(
            None,
            None,
            None,
            Some(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()),
        );
        let out = apply(&transactions, &categories, &filters);
        let ids: Vec<u64> = out.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_unresolved_category_never_matches_a_name() {
        let (transactions, categories) = fixture();
        let filters = Filters::new(Some("Food".to_string()), None, None, None);
        let out = apply(&transactions, &categories, &filters);
        assert!(out.iter().all(|t| t.category_id() == 1));
    }

    #[test]
    fn test_filter_idempotent() {
        let (transactions, categories) = fixture();
        let filters = Filters::new(None, Some(Decimal::from_str("50").unwrap()), None, None);
        let once = apply(&transactions, &categories, &filters);
        let twice = apply(&once, &categories, &filters);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_filters_pass_everything() {
        let (transactions, categories) = fixture();
        let filters = Filters::default();
        assert!(filters.is_empty());
        assert_eq!(apply(&transactions, &categories, &filters), transactions);
    }

    #[test]
    fn test_page_slicing() {
        let (mut transactions, _) = fixture();
        // Grow the list to 10 entries so there are two pages.
        for ix in 5..=10 {
            transactions.push(tx(
                ix,
                TransactionType::Expense,
                1,
                "X",
                "1",
                "2025-05-04T12:00:00Z",
            ));
        }
        assert_eq!(page_count(transactions.len()), 2);
        assert_eq!(page(&transactions, 1).len(), PAGE_SIZE);
        assert_eq!(page(&transactions, 2).len(), 3);
        assert_eq!(page(&transactions, 2)[0].id(), 8);
    }

    #[test]
    fn test_page_out_of_range_is_empty() {
        let (transactions, _) = fixture();
        assert!(page(&transactions, 0).is_empty());
        assert!(page(&transactions, 2).is_empty());
        assert!(page(&transactions, usize::MAX / PAGE_SIZE).is_empty());
        // Page numbers whose start index would overflow are just empty pages.
        assert!(page(&transactions, usize::MAX).is_empty());
        assert!(page(&[], 1).is_empty());
        assert_eq!(page_count(0), 0);
    }
}
