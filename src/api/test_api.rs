//! Implements the `Api` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can
//! run the whole app, top-to-bottom, without a remote service (see `Mode::from_env`).

use crate::api::Api;
use crate::model::wire::TransactionBody;
use crate::model::{Category, Transaction, TransactionType};
use crate::Result;
use anyhow::{bail, Context};
use chrono::Utc;
use std::str::FromStr;
use std::sync::Mutex;

/// The token handed out by the in-memory login endpoint.
pub(crate) const TEST_TOKEN: &str = "test-token-0001";

/// The mutable server-side state of the in-memory service.
#[derive(Debug, Clone)]
pub(crate) struct TestState {
    pub(crate) categories: Vec<Category>,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) next_id: u64,
}

/// An implementation of the `Api` trait that does not talk to the network. It can
/// hold any data in memory and, by default, is seeded with some existing data.
pub(crate) struct TestApi {
    state: Mutex<TestState>,
}

impl TestApi {
    pub(crate) fn new(state: TestState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Creates a `TestApi` holding the seed data from this module.
    pub(crate) fn seeded() -> Self {
        Self::new(seed_state())
    }

    /// A snapshot of the current in-memory transactions, for assertions.
    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> TestState {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Api for TestApi {
    async fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.state.lock().unwrap().categories.clone())
    }

    async fn incomes(&self) -> Result<Vec<Transaction>> {
        Ok(of_type(&self.state, TransactionType::Income))
    }

    async fn expenses(&self) -> Result<Vec<Transaction>> {
        Ok(of_type(&self.state, TransactionType::Expense))
    }

    async fn create(
        &self,
        transaction_type: TransactionType,
        body: &TransactionBody,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.transactions.push(Transaction {
            id,
            transaction_type,
            category_id: body.category_id,
            name: body.name.clone(),
            amount: body.amount,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn update(
        &self,
        transaction_type: TransactionType,
        id: u64,
        body: &TransactionBody,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let tx = state
            .transactions
            .iter_mut()
            .find(|t| t.id == id && t.transaction_type == transaction_type)
            .with_context(|| format!("{transaction_type} {id} not found"))?;
        tx.name = body.name.clone();
        tx.category_id = body.category_id;
        tx.amount = body.amount;
        Ok(())
    }

    async fn delete(&self, transaction_type: TransactionType, id: u64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.transactions.len();
        state
            .transactions
            .retain(|t| !(t.id == id && t.transaction_type == transaction_type));
        if state.transactions.len() == before {
            bail!("{transaction_type} {id} not found");
        }
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<String> {
        if username.is_empty() || password.is_empty() {
            bail!("Invalid credentials");
        }
        Ok(TEST_TOKEN.to_string())
    }

    async fn logout(&self) -> Result<()> {
        Ok(())
    }
}

fn of_type(state: &Mutex<TestState>, transaction_type: TransactionType) -> Vec<Transaction> {
    state
        .lock()
        .unwrap()
        .transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type)
        .cloned()
        .collect()
}

/// Seed data: a small household ledger spanning a few months.
fn seed_state() -> TestState {
    let categories = vec![
        Category::new(1, "Food"),
        Category::new(2, "Rent"),
        Category::new(3, "Utilities"),
        Category::new(4, "Salary"),
    ];
    let rows: [(u64, TransactionType, u64, &str, &str, &str); 8] = [
        (1, TransactionType::Income, 4, "March salary", "3200.00", "2025-03-01T09:00:00Z"),
        (2, TransactionType::Expense, 2, "March rent", "1100.00", "2025-03-02T08:00:00Z"),
        (3, TransactionType::Expense, 1, "Groceries", "84.20", "2025-03-05T17:30:00Z"),
        (4, TransactionType::Expense, 3, "Electricity", "62.75", "2025-03-10T07:00:00Z"),
        (5, TransactionType::Income, 4, "April salary", "3200.00", "2025-04-01T09:00:00Z"),
        (6, TransactionType::Expense, 2, "April rent", "1100.00", "2025-04-02T08:00:00Z"),
        (7, TransactionType::Expense, 1, "Groceries", "91.40", "2025-04-06T18:10:00Z"),
        (8, TransactionType::Expense, 1, "Takeout", "27.90", "2025-04-12T20:45:00Z"),
    ];
    let transactions = rows
        .into_iter()
        .map(|(id, transaction_type, category_id, name, amount, created_at)| Transaction {
            id,
            transaction_type,
            category_id,
            name: name.to_string(),
            amount: rust_decimal::Decimal::from_str(amount).unwrap(),
            created_at: chrono::DateTime::parse_from_rfc3339(created_at)
                .unwrap()
                .with_timezone(&Utc),
        })
        .collect();

    TestState {
        categories,
        transactions,
        next_id: 9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_seeded_lists_split_by_type() {
        let api = TestApi::seeded();
        let incomes = api.incomes().await.unwrap();
        let expenses = api.expenses().await.unwrap();
        assert_eq!(incomes.len(), 2);
        assert_eq!(expenses.len(), 6);
        assert!(incomes
            .iter()
            .all(|t| t.transaction_type() == TransactionType::Income));
    }

    #[tokio::test]
    async fn test_create_assigns_new_id() {
        let api = TestApi::seeded();
        let body = TransactionBody {
            name: "Bonus".to_string(),
            category_id: 4,
            amount: Decimal::from(500),
        };
        api.create(TransactionType::Income, &body).await.unwrap();
        let incomes = api.incomes().await.unwrap();
        assert_eq!(incomes.len(), 3);
        assert!(incomes.iter().any(|t| t.id() == 9 && t.name() == "Bonus"));
    }

    #[tokio::test]
    async fn test_update_and_delete_miss_on_wrong_type() {
        let api = TestApi::seeded();
        let body = TransactionBody {
            name: "x".to_string(),
            category_id: 1,
            amount: Decimal::ONE,
        };
        // id 2 is an expense; addressing it through the income sub-resource fails.
        assert!(api.update(TransactionType::Income, 2, &body).await.is_err());
        assert!(api.delete(TransactionType::Income, 2).await.is_err());
        api.delete(TransactionType::Expense, 2).await.unwrap();
    }

    #[tokio::test]
    async fn test_login_rejects_blank_credentials() {
        let api = TestApi::seeded();
        assert!(api.login("", "pw").await.is_err());
        let token = api.login("demo", "pw").await.unwrap();
        assert_eq!(token, TEST_TOKEN);
    }
}
