//! Configuration file handling.
//!
//! The configuration file is stored at `$DOTP_HOME/config.json` and holds the base
//! URL of the remote DotProduct API. The session token lives separately under
//! `$DOTP_HOME/.secrets/token.json` so that `config.json` stays shareable.

use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "dotp";
const CONFIG_VERSION: u8 = 1;
const SECRETS: &str = ".secrets";
const TOKEN_JSON: &str = "token.json";
const CONFIG_JSON: &str = "config.json";

/// The default service URL, used by `dotp init` when `--api-url` is not given.
pub(crate) const DEFAULT_API_URL: &str = "https://dotproduct-02kn.onrender.com/api/";

/// Represents the data directory of the app. You instantiate it by providing the
/// path to `$DOTP_HOME` and from there it loads `$DOTP_HOME/config.json` and provides
/// paths to the other items expected inside the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    secrets: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory and its subdirectories and writes an initial
    /// `config.json` pointing at `api_base_url`.
    ///
    /// # Errors
    /// Returns an error if any file operations fail or if the URL does not parse.
    pub async fn create(dir: impl Into<PathBuf>, api_base_url: &str) -> Result<Self> {
        // Validate the URL before writing anything.
        let _ = url::Url::parse(api_base_url)
            .with_context(|| format!("Invalid API base URL '{api_base_url}'"))?;

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the dotp home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let secrets = root.join(SECRETS);
        utils::make_dir(&secrets).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            api_base_url: api_base_url.to_string(),
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            secrets,
            config_path,
            config_file,
        })
    }

    /// Validates that `$DOTP_HOME` and `config.json` exist, loads the config file and
    /// returns the configuration object.
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The dotp home directory is missing. Run 'dotp init' first.")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let config = Self {
            root: root.clone(),
            secrets: root.join(SECRETS),
            config_path,
            config_file,
        };
        if !config.secrets.is_dir() {
            bail!(
                "The secrets directory is missing '{}'",
                config.secrets.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn secrets(&self) -> &Path {
        &self.secrets
    }

    pub fn api_base_url(&self) -> &str {
        &self.config_file.api_base_url
    }

    /// Where the session token is persisted between runs.
    pub fn token_path(&self) -> PathBuf {
        self.secrets.join(TOKEN_JSON)
    }
}

/// Represents the serialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "dotp",
///   "config_version": 1,
///   "api_base_url": "https://dotproduct-02kn.onrender.com/api/"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "dotp".
    app_name: String,

    /// Configuration file version.
    config_version: u8,

    /// Base URL of the remote DotProduct API. Routes are joined onto this.
    api_base_url: String,
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: ConfigFile = utils::deserialize(path.as_ref()).await?;
        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path.as_ref(), data)
            .await
            .context("Unable to write config file")
    }
}
