//! Handlers for the `dotp login` and `dotp logout` commands.

use crate::api::{self, Mode};
use crate::commands::Out;
use crate::{Config, Result, Session};
use anyhow::Context;
use tracing::debug;

/// Exchanges a username and password for a session token and persists it.
///
/// When `password` is `None` the user is prompted on the terminal so the password
/// does not end up in shell history. A rejected login surfaces as
/// "Invalid credentials" without writing anything.
pub async fn login(
    config: &Config,
    mode: Mode,
    username: &str,
    password: Option<String>,
) -> Result<Out<()>> {
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ").context("Unable to read the password")?,
    };

    // No session exists yet, so the client carries no token.
    let api = api::client(config, None, mode)?;
    let token = api.login(username, &password).await?;

    Session::new(token).save(config).await?;
    Ok(Out::new_message(format!("Logged in as {username}")))
}

/// Notifies the remote store, then clears the local session unconditionally.
///
/// The server notification is best-effort: a failure (expired token, network down)
/// is logged and otherwise ignored, and the local credential is cleared regardless.
pub async fn logout(config: &Config, mode: Mode) -> Result<Out<()>> {
    match Session::load(config).await? {
        Some(session) => {
            let api = api::client(config, Some(&session), mode)?;
            if let Err(e) = api.logout().await {
                debug!("Logout notification failed (ignored): {e:#}");
            }
        }
        None => debug!("No active session to notify the server about"),
    }
    Session::clear(config).await?;
    Ok(Out::new_message("Logged out"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_login_stores_session() {
        let env = TestEnv::new().await;
        let config = env.config();

        login(&config, Mode::Test, "demo", Some("pw".to_string()))
            .await
            .unwrap();
        let session = Session::require(&config).await.unwrap();
        assert_eq!(session.token(), crate::api::TEST_TOKEN);
    }

    #[tokio::test]
    async fn test_login_failure_stores_nothing() {
        let env = TestEnv::new().await;
        let config = env.config();

        let result = login(&config, Mode::Test, "demo", Some(String::new())).await;
        assert!(result.is_err());
        assert!(Session::load(&config).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_without_one() {
        let env = TestEnv::new().await;
        let config = env.config();

        // Logged in, then out.
        Session::new("tok").save(&config).await.unwrap();
        logout(&config, Mode::Test).await.unwrap();
        assert!(Session::load(&config).await.unwrap().is_none());

        // Logging out again is fine.
        logout(&config, Mode::Test).await.unwrap();
    }
}
