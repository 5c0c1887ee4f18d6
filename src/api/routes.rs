//! The route table of the remote store, relative to the configured base URL.

use crate::model::TransactionType;

pub(crate) const CATEGORY: &str = "category/";
pub(crate) const INCOME: &str = "income/";
pub(crate) const EXPENSES: &str = "expenses/";
pub(crate) const LOGIN: &str = "login/";
pub(crate) const LOGOUT: &str = "logout/";

/// The sub-resource collection for a transaction type. Income and expense records
/// live in separate collections on the server.
pub(crate) fn collection(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Income => "income",
        TransactionType::Expense => "expenses",
    }
}

pub(crate) fn create(transaction_type: TransactionType) -> String {
    format!("{}/create/", collection(transaction_type))
}

pub(crate) fn update(transaction_type: TransactionType, id: u64) -> String {
    format!("{}/update/{id}/", collection(transaction_type))
}

pub(crate) fn delete(transaction_type: TransactionType, id: u64) -> String {
    format!("{}/delete/{id}/", collection(transaction_type))
}
