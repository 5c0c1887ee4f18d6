//! Implements the `Api` trait against the real remote store over HTTPS.

use crate::api::{routes, Api};
use crate::model::wire::{Ack, ListEnvelope, LoginRequest, LoginResponse, TransactionBody};
use crate::model::{Category, Transaction, TransactionType};
use crate::Result;
use anyhow::{bail, Context};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::trace;
use url::Url;

/// The single authenticated-client abstraction: holds the base URL and the session
/// token, and injects `Authorization: Token <value>` on every request. Constructed
/// once per command invocation.
pub(crate) struct HttpApi {
    base: Url,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpApi {
    pub(crate) fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        // A trailing slash matters for Url::join; "api" would be dropped otherwise.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized)
            .with_context(|| format!("Invalid API base URL '{base_url}'"))?;
        Ok(Self {
            base,
            token,
            client: reqwest::Client::new(),
        })
    }

    fn request(&self, method: Method, route: &str) -> Result<reqwest::RequestBuilder> {
        let url = self
            .base
            .join(route)
            .with_context(|| format!("Unable to join route '{route}' onto the base URL"))?;
        trace!("{method} {url}");
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Token {token}"));
        }
        Ok(builder)
    }

    /// Sends the request and parses the JSON body, failing on transport-level errors.
    async fn send<T>(&self, builder: reqwest::RequestBuilder, what: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = builder
            .send()
            .await
            .with_context(|| format!("The {what} request could not be sent"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("The {what} request failed with HTTP status {status}");
        }
        response
            .json::<T>()
            .await
            .with_context(|| format!("The {what} response could not be parsed"))
    }

    async fn get_list<T>(&self, route: &'static str, what: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let envelope: ListEnvelope<T> = self.send(self.request(Method::GET, route)?, what).await?;
        envelope.into_payload(what)
    }

    async fn mutate(
        &self,
        method: Method,
        route: &str,
        body: Option<&TransactionBody>,
        what: &str,
    ) -> Result<()> {
        let mut builder = self.request(method, route)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let ack: Ack = self.send(builder, what).await?;
        ack.check(what)
    }
}

#[async_trait::async_trait]
impl Api for HttpApi {
    async fn categories(&self) -> Result<Vec<Category>> {
        self.get_list(routes::CATEGORY, "category list").await
    }

    async fn incomes(&self) -> Result<Vec<Transaction>> {
        let mut list: Vec<Transaction> = self.get_list(routes::INCOME, "income list").await?;
        // The server implies the type by endpoint; stamp it for the merged list.
        for tx in &mut list {
            tx.transaction_type = TransactionType::Income;
        }
        Ok(list)
    }

    async fn expenses(&self) -> Result<Vec<Transaction>> {
        let mut list: Vec<Transaction> = self.get_list(routes::EXPENSES, "expense list").await?;
        for tx in &mut list {
            tx.transaction_type = TransactionType::Expense;
        }
        Ok(list)
    }

    async fn create(
        &self,
        transaction_type: TransactionType,
        body: &TransactionBody,
    ) -> Result<()> {
        self.mutate(
            Method::POST,
            &routes::create(transaction_type),
            Some(body),
            "create",
        )
        .await
    }

    async fn update(
        &self,
        transaction_type: TransactionType,
        id: u64,
        body: &TransactionBody,
    ) -> Result<()> {
        self.mutate(
            Method::PUT,
            &routes::update(transaction_type, id),
            Some(body),
            "update",
        )
        .await
    }

    async fn delete(&self, transaction_type: TransactionType, id: u64) -> Result<()> {
        self.mutate(
            Method::DELETE,
            &routes::delete(transaction_type, id),
            None,
            "delete",
        )
        .await
    }

    async fn login(&self, username: &str, password: &str) -> Result<String> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .request(Method::POST, routes::LOGIN)?
            .json(&body)
            .send()
            .await
            .context("The login request could not be sent")?;

        // Login is the one endpoint that uses real HTTP status codes.
        if response.status() == StatusCode::UNAUTHORIZED
            || response.status() == StatusCode::BAD_REQUEST
        {
            bail!("Invalid credentials");
        }
        let status = response.status();
        if !status.is_success() {
            bail!("The login request failed with HTTP status {status}");
        }
        let login: LoginResponse = response
            .json()
            .await
            .context("The login response could not be parsed")?;
        Ok(login.token)
    }

    async fn logout(&self) -> Result<()> {
        let ack: Ack = self
            .send(
                self.request(Method::POST, routes::LOGOUT)?
                    .json(&serde_json::json!({})),
                "logout",
            )
            .await?;
        ack.check("logout")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let api = HttpApi::new("http://localhost:8000/api", None).unwrap();
        let url = api.base.join(routes::CATEGORY).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/category/");

        let api = HttpApi::new("http://localhost:8000/api/", None).unwrap();
        let url = api.base.join("income/update/3/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/income/update/3/");
    }

    #[test]
    fn test_bad_base_url() {
        assert!(HttpApi::new("not a url", None).is_err());
    }
}
