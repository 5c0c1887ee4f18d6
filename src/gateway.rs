//! The mutation gateway: create, update and delete transactions, then refetch.
//!
//! The remote store owns the data, so the client never patches its local list after
//! a write. Every successful mutation batch ends with a full refetch of categories
//! and transactions; the refetched working set is returned to the caller and the
//! batch input (the selection) is consumed.

use crate::api::DynApi;
use crate::fetch::{self, Dashboard};
use crate::model::TransactionDraft;
use crate::Result;
use anyhow::Context;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Creates or updates a single transaction, then refetches.
///
/// A draft with an id updates the income or expense sub-resource matching the
/// draft's `transaction_type`; a draft without an id creates a new record. Returns
/// the refetched working set.
pub async fn submit(api: &DynApi, session_token: &str, draft: &TransactionDraft) -> Result<Dashboard> {
    let body = draft.body();
    match draft.id {
        Some(id) => api
            .update(draft.transaction_type, id, &body)
            .await
            .context("Failed to save the transaction")?,
        None => api
            .create(draft.transaction_type, &body)
            .await
            .context("Failed to save the transaction")?,
    }
    refetch(api, session_token).await
}

/// Deletes a batch of transactions by id, then refetches.
///
/// Each id's transaction type is looked up in the current in-memory list, never
/// taken from the caller, so income and expense entries are routed to their
/// respective sub-resource endpoints. The requests fan out concurrently and the
/// batch is all-or-nothing: the first failure aborts the remaining requests.
/// The id list (the caller's selection) is consumed by the call.
pub async fn delete(
    api: &DynApi,
    session_token: &str,
    dashboard: &Dashboard,
    ids: Vec<u64>,
) -> Result<(usize, Dashboard)> {
    // Resolve every id before anything is dispatched so a bad selection cannot
    // leave the batch half-done.
    let mut targets = Vec::with_capacity(ids.len());
    for id in ids {
        let tx = dashboard
            .find(id)
            .with_context(|| format!("Transaction {id} is not in the current list"))?;
        targets.push((tx.transaction_type, id));
    }

    let count = targets.len();
    let mut requests = JoinSet::new();
    for (transaction_type, id) in targets {
        let api = Arc::clone(api);
        requests.spawn(async move { api.delete(transaction_type, id).await });
    }

    while let Some(joined) = requests.join_next().await {
        // An early return drops the JoinSet, which aborts the unfinished requests.
        joined
            .context("A delete task panicked")?
            .context("Failed to delete")?;
    }

    let dashboard = refetch(api, session_token).await?;
    Ok((count, dashboard))
}

/// Full refetch after a successful mutation batch. A refetch failure does not undo
/// the mutation; it is logged and an empty working set is returned.
async fn refetch(api: &DynApi, session_token: &str) -> Result<Dashboard> {
    match fetch::dashboard(api, session_token).await {
        Ok(dashboard) => {
            debug!("refetched {} transactions", dashboard.transactions().len());
            Ok(dashboard)
        }
        Err(e) => {
            warn!("The mutation succeeded but the refetch failed: {e:#}");
            Ok(Dashboard::empty(session_token))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestApi;
    use crate::model::{TransactionDraft, TransactionType};
    use rust_decimal::Decimal;

    fn seeded() -> (DynApi, Arc<TestApi>) {
        let api = Arc::new(TestApi::seeded());
        (api.clone() as DynApi, api)
    }

    #[tokio::test]
    async fn test_submit_create_refetches() {
        let (api, raw) = seeded();
        let draft = TransactionDraft::new(
            None,
            TransactionType::Expense,
            1,
            "Coffee",
            Decimal::new(450, 2),
        );
        let dash = submit(&api, "tok", &draft).await.unwrap();
        // The refetched list already contains the new record.
        assert_eq!(dash.transactions().len(), 9);
        assert!(dash.transactions().iter().any(|t| t.name() == "Coffee"));
        assert_eq!(raw.snapshot().transactions.len(), 9);
    }

    #[tokio::test]
    async fn test_submit_update_routes_by_type() {
        let (api, raw) = seeded();
        // id 2 is an expense; the draft's type selects the expense endpoint.
        let draft = TransactionDraft::new(
            Some(2),
            TransactionType::Expense,
            2,
            "March rent (corrected)",
            Decimal::from(1150),
        );
        submit(&api, "tok", &draft).await.unwrap();
        let state = raw.snapshot();
        let tx = state.transactions.iter().find(|t| t.id() == 2).unwrap();
        assert_eq!(tx.name(), "March rent (corrected)");
        assert_eq!(tx.amount(), Decimal::from(1150));
    }

    #[tokio::test]
    async fn test_delete_partitions_by_type_from_current_list() {
        let (api, raw) = seeded();
        let dash = fetch::dashboard(&api, "tok").await.unwrap();
        // One income (id 1) and one expense (id 3) in a single batch.
        let (count, refetched) = delete(&api, "tok", &dash, vec![1, 3]).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(refetched.transactions().len(), 6);
        let state = raw.snapshot();
        assert!(state.transactions.iter().all(|t| t.id() != 1 && t.id() != 3));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_fails_before_dispatch() {
        let (api, raw) = seeded();
        let dash = fetch::dashboard(&api, "tok").await.unwrap();
        let result = delete(&api, "tok", &dash, vec![3, 999]).await;
        assert!(result.is_err());
        // Nothing was deleted: the batch failed validation before any request ran.
        assert_eq!(raw.snapshot().transactions.len(), 8);
    }
}
