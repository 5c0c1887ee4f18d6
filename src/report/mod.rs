//! Client-side derivations over the fetched data: per-category and per-month
//! aggregation, predicate filtering and page slicing. Everything here is a pure
//! function of the transaction and category lists; nothing is cached or stored.
pub(crate) mod aggregate;
pub(crate) mod filter;

pub use aggregate::{by_category, by_month, drill_down, total, CategoryTotal, MonthlyTotal};
pub use filter::{apply, page, page_count, Filters, PAGE_SIZE};
