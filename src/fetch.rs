//! Fetches the dashboard working set from the remote store.
//!
//! Categories are fetched first because everything downstream needs category names
//! and ids; the income and expense lists are then fetched concurrently and merged
//! into one transaction list. The result is keyed to the session token it was
//! fetched under so a response from a superseded session is never displayed or used
//! to look up a transaction's type.

use crate::api::DynApi;
use crate::model::{Category, Transaction};
use crate::Result;
use tracing::debug;

/// The client-side read-through cache: the category and transaction lists as of the
/// last fetch. Always replaced wholesale, never patched incrementally.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    session: String,
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
}

impl Dashboard {
    /// An empty working set, used when a fetch fails and the caller renders with
    /// whatever partial state exists (here: none).
    pub fn empty(session_token: &str) -> Self {
        Self {
            session: session_token.to_string(),
            ..Self::default()
        }
    }

    /// True when this data was fetched under `session_token`. Data from a fetch
    /// issued under a now-inactive session must be discarded by the caller.
    pub fn is_current(&self, session_token: &str) -> bool {
        self.session == session_token
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Looks up a transaction by id in the merged list.
    pub fn find(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }
}

/// Fetches categories plus the merged income/expense list.
pub async fn dashboard(api: &DynApi, session_token: &str) -> Result<Dashboard> {
    // Category names and ids gate the rest, so this await comes first.
    let categories = api.categories().await?;
    let (incomes, expenses) = tokio::try_join!(api.incomes(), api.expenses())?;

    debug!(
        "fetched {} categories, {} incomes, {} expenses",
        categories.len(),
        incomes.len(),
        expenses.len()
    );

    let mut transactions = incomes;
    transactions.extend(expenses);
    Ok(Dashboard {
        session: session_token.to_string(),
        categories,
        transactions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestApi;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_dashboard_merges_income_then_expense() {
        let api: DynApi = Arc::new(TestApi::seeded());
        let dash = dashboard(&api, "tok").await.unwrap();

        assert_eq!(dash.categories().len(), 4);
        assert_eq!(dash.transactions().len(), 8);
        // Income entries come before expense entries in the merged list.
        assert_eq!(dash.transactions()[0].id(), 1);
        assert_eq!(dash.transactions()[1].id(), 5);
        assert!(dash.find(3).is_some());
        assert!(dash.find(99).is_none());
    }

    #[tokio::test]
    async fn test_dashboard_is_keyed_to_session() {
        let api: DynApi = Arc::new(TestApi::seeded());
        let dash = dashboard(&api, "tok-a").await.unwrap();
        assert!(dash.is_current("tok-a"));
        // A session change invalidates the fetched data.
        assert!(!dash.is_current("tok-b"));
        assert!(!Dashboard::empty("tok-a").is_current(""));
    }
}
