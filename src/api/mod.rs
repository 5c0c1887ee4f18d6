//! The seam between the rest of the app and the remote DotProduct REST service.
//!
//! Everything downstream talks to the `Api` trait. The production implementation is
//! `HttpApi` (reqwest with the session token attached to every request); `TestApi`
//! is an in-memory implementation that is compiled into the production binary so the
//! whole app can be run, top-to-bottom, without a remote service.

mod http;
pub(crate) mod routes;
mod test_api;

use crate::model::wire::TransactionBody;
use crate::model::{Category, Transaction, TransactionType};
use crate::{Config, Result, Session};
use std::sync::Arc;

pub(crate) use http::HttpApi;
pub(crate) use test_api::TestApi;
#[cfg(test)]
pub(crate) use test_api::TEST_TOKEN;

/// A shared handle to an API client. Fan-out tasks each hold a clone.
pub type DynApi = Arc<dyn Api + Send + Sync>;

/// Operations the remote store exposes. One implementor wraps all requests and
/// injects the session credential, so no call site ever touches headers.
#[async_trait::async_trait]
pub trait Api {
    async fn categories(&self) -> Result<Vec<Category>>;
    async fn incomes(&self) -> Result<Vec<Transaction>>;
    async fn expenses(&self) -> Result<Vec<Transaction>>;
    async fn create(&self, transaction_type: TransactionType, body: &TransactionBody)
        -> Result<()>;
    async fn update(
        &self,
        transaction_type: TransactionType,
        id: u64,
        body: &TransactionBody,
    ) -> Result<()>;
    async fn delete(&self, transaction_type: TransactionType, id: u64) -> Result<()>;
    /// Exchanges credentials for a session token.
    async fn login(&self, username: &str, password: &str) -> Result<String>;
    /// Best-effort server-side session invalidation.
    async fn logout(&self) -> Result<()>;
}

/// Selects the real service or the in-memory test service.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Remote,
    Test,
}

impl Mode {
    /// When DOTP_IN_TEST_MODE is set and non-zero in length the mode will be
    /// `Mode::Test`, otherwise `Mode::Remote`.
    pub fn from_env() -> Self {
        match std::env::var("DOTP_IN_TEST_MODE") {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Remote,
        }
    }
}

/// Creates the API client for the given mode. `session` is `None` before login; the
/// login and logout flows are the only callers that construct token-less clients on
/// purpose.
pub(crate) fn client(config: &Config, session: Option<&Session>, mode: Mode) -> Result<DynApi> {
    let api: DynApi = match mode {
        Mode::Remote => Arc::new(HttpApi::new(
            config.api_base_url(),
            session.map(|s| s.token().to_string()),
        )?),
        Mode::Test => Arc::new(TestApi::seeded()),
    };
    Ok(api)
}
