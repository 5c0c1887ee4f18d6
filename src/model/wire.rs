//! Request and response shapes for the remote store.
//!
//! The service wraps list responses in a `{ status, payload }` envelope and reports
//! most application failures inside an HTTP-200 body rather than via the HTTP status
//! code, so both layers have to be checked.

use crate::Result;
use anyhow::bail;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body for create and update calls on the income/expense sub-resources.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub(crate) struct TransactionBody {
    pub(crate) name: String,
    pub(crate) category_id: u64,
    pub(crate) amount: Decimal,
}

/// Envelope for `GET category/`, `GET income/` and `GET expenses/`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    #[serde(default = "default_status")]
    pub(crate) status: u16,
    pub(crate) payload: Vec<T>,
}

/// Envelope for mutation and logout responses. Some endpoints omit the `status`
/// field entirely and only send a message.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Ack {
    #[serde(default = "default_status")]
    pub(crate) status: u16,
    #[serde(default)]
    pub(crate) message: Option<String>,
}

/// Successful `POST login/` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginResponse {
    pub(crate) token: String,
}

/// Body for `POST login/`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

fn default_status() -> u16 {
    200
}

fn is_ok(status: u16) -> bool {
    (200..300).contains(&status)
}

impl<T> ListEnvelope<T> {
    /// Returns the payload, or an error when the envelope carries a failure status.
    pub(crate) fn into_payload(self, what: &str) -> Result<Vec<T>> {
        if !is_ok(self.status) {
            bail!("The {what} request failed with status {}", self.status);
        }
        Ok(self.payload)
    }
}

impl Ack {
    /// Returns an error when the envelope carries a failure status.
    pub(crate) fn check(&self, what: &str) -> Result<()> {
        if !is_ok(self.status) {
            bail!(
                "The {what} request failed with status {}: {}",
                self.status,
                self.message.as_deref().unwrap_or("no message")
            );
        }
        Ok(())
    }
}
