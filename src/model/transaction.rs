use crate::model::wire::TransactionBody;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a transaction is money in or money out. The remote store keeps income and
/// expense records in separate sub-resource collections, so this enum also selects
/// which endpoints a transaction's mutations go to.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// A single income or expense record fetched from the remote store.
///
/// The wire format sends `amount` as a decimal string and `created_at` as an RFC 3339
/// timestamp; audit fields that accompany them are ignored. The client never patches
/// these records in place, the whole list is replaced after every successful mutation.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    pub(crate) id: u64,
    /// Not sent by the server; the list fetchers stamp it from the endpoint the
    /// record came from.
    #[serde(default)]
    pub(crate) transaction_type: TransactionType,
    pub(crate) category_id: u64,
    pub(crate) name: String,
    pub(crate) amount: Decimal,
    pub(crate) created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn category_id(&self) -> u64 {
        self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A transaction being created or edited through the form. `id: None` means create,
/// `id: Some` means update the existing record.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransactionDraft {
    pub(crate) id: Option<u64>,
    pub(crate) transaction_type: TransactionType,
    pub(crate) category_id: u64,
    pub(crate) name: String,
    pub(crate) amount: Decimal,
}

impl TransactionDraft {
    pub fn new(
        id: Option<u64>,
        transaction_type: TransactionType,
        category_id: u64,
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id,
            transaction_type,
            category_id,
            name: name.into(),
            amount,
        }
    }

    /// The request body for create and update calls.
    pub(crate) fn body(&self) -> TransactionBody {
        TransactionBody {
            name: self.name.clone(),
            category_id: self.category_id,
            amount: self.amount,
        }
    }
}
