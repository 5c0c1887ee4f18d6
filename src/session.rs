//! The session holder: a single opaque token persisted across runs.
//!
//! The token is stored at `$DOTP_HOME/.secrets/token.json`. Its presence is the sole
//! switch between "logged out" (only `init` and `login` work) and "logged in" (data
//! commands work). Logout clears the file unconditionally, whether or not the remote
//! store acknowledged the logout.

use crate::{utils, Config, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// An active session: the opaque credential issued by `POST login/`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Loads the persisted session, or `None` when no session exists.
    pub async fn load(config: &Config) -> Result<Option<Self>> {
        let path = config.token_path();
        if !path.is_file() {
            return Ok(None);
        }
        let session: Session = utils::deserialize(&path).await?;
        Ok(Some(session))
    }

    /// Loads the persisted session, failing with a login hint when absent.
    pub async fn require(config: &Config) -> Result<Self> {
        Self::load(config)
            .await?
            .context("You are not logged in. Run 'dotp login' first.")
    }

    /// Persists the session to durable storage.
    pub async fn save(&self, config: &Config) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize session")?;
        utils::write(config.token_path(), data)
            .await
            .context("Unable to write the session token file")
    }

    /// Removes the persisted session. Clearing an absent session is not an error.
    pub async fn clear(config: &Config) -> Result<()> {
        utils::remove_file(&config.token_path()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_session_roundtrip() {
        let env = TestEnv::new().await;
        let config = env.config();

        assert!(Session::load(&config).await.unwrap().is_none());
        assert!(Session::require(&config).await.is_err());

        let session = Session::new("abc123");
        session.save(&config).await.unwrap();

        let loaded = Session::require(&config).await.unwrap();
        assert_eq!(loaded.token(), "abc123");

        Session::clear(&config).await.unwrap();
        assert!(Session::load(&config).await.unwrap().is_none());

        // Clearing again is fine.
        Session::clear(&config).await.unwrap();
    }
}
