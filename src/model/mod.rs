//! Types that represent the core data model, such as `Transaction` and `Category`.
pub(crate) mod category;
mod transaction;
pub(crate) mod wire;

pub use category::Category;
pub use transaction::{Transaction, TransactionDraft, TransactionType};
