//! Command handlers for the dotp CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod auth;
mod delete;
mod init;
mod insert;
mod list;
mod monthly;
mod summary;
mod update;

use crate::api::DynApi;
use crate::fetch::{self, Dashboard};
use crate::{Config, Result, Session};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, error, info, warn};

pub use auth::{login, logout};
pub use delete::delete;
pub use init::init;
pub use insert::add;
pub use list::list;
pub use monthly::monthly;
pub use summary::summary;
pub use update::update;

/// The output type for a command. This allows the command to return a consistent
/// message and, optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command
    /// execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to
    /// `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Formats an amount for display, e.g. `1,100.00`.
pub(crate) fn fmt_amount(amount: Decimal) -> String {
    format_num::format_num!(",.2", amount.to_f64().unwrap_or_default())
}

/// Fetches the working set for a data command.
///
/// A fetch failure is not fatal: it is logged and the command renders with an empty
/// working set (stale-or-empty beats crashing, and there is no retry). Data fetched
/// under a session that is no longer the active one is discarded the same way.
pub(crate) async fn load_dashboard(
    config: &Config,
    api: &DynApi,
    session: &Session,
) -> Dashboard {
    let dashboard = match fetch::dashboard(api, session.token()).await {
        Ok(dashboard) => dashboard,
        Err(e) => {
            error!("Failed to fetch dashboard data: {e:#}");
            return Dashboard::empty(session.token());
        }
    };

    // The session may have been cleared or replaced while the fetch was in flight.
    let active = Session::load(config).await.ok().flatten();
    match active {
        Some(active) if dashboard.is_current(active.token()) => dashboard,
        _ => {
            warn!("Discarding data fetched under a superseded session");
            Dashboard::empty(session.token())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use std::str::FromStr;

    #[test]
    fn test_fmt_amount() {
        assert_eq!(fmt_amount(Decimal::from_str("1100").unwrap()), "1,100.00");
        assert_eq!(fmt_amount(Decimal::from_str("4.5").unwrap()), "4.50");
    }

    #[test]
    fn test_out_message_only() {
        let out: Out<()> = Out::from("hello");
        assert_eq!(out.message(), "hello");
        assert!(out.structure().is_none());
    }

    #[tokio::test]
    async fn test_load_dashboard_discards_superseded_session() {
        let env = TestEnv::new().await;
        let config = env.config();
        let api = env.api();

        let session = Session::new("tok-a");
        session.save(&config).await.unwrap();
        let dashboard = load_dashboard(&config, &api, &session).await;
        assert_eq!(dashboard.transactions().len(), 8);

        // Another process replaced the session; the fetched data must be dropped.
        Session::new("tok-b").save(&config).await.unwrap();
        let dashboard = load_dashboard(&config, &api, &session).await;
        assert!(dashboard.transactions().is_empty());

        // Session cleared entirely: same outcome.
        Session::clear(&config).await.unwrap();
        let dashboard = load_dashboard(&config, &api, &session).await;
        assert!(dashboard.transactions().is_empty());
    }
}
