//! Handler for the `dotp init` command.

use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the data directory and writes an initial `config.json` pointing at the
/// remote service.
pub async fn init(home: &Path, api_url: &str) -> Result<Out<()>> {
    let config = Config::create(home, api_url).await?;
    Ok(Out::new_message(format!(
        "Initialized '{}' for {}",
        config.root().display(),
        config.api_base_url()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_home() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("dotp");
        let out = init(&home, "http://localhost:8000/api/").await.unwrap();
        assert!(out.message().contains("http://localhost:8000/api/"));
        Config::load(&home).await.unwrap();
    }
}
