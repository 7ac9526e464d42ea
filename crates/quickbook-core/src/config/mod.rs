mod env;
mod types;


pub use types::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to built-in defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Reject values that would make any AWS call meaningless.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.aws.region.trim().is_empty() {
            bail!("aws.region must not be empty");
        }
        if self.index.collection.trim().is_empty() {
            bail!("index.collection must not be empty");
        }
        if self.index.name.trim().is_empty() {
            bail!("index.name must not be empty");
        }
        if self.index.timeout_secs == 0 {
            bail!("index.timeout_secs must be greater than 0");
        }
        if self.agent.fallback_question.trim().is_empty() {
            bail!("agent.fallback_question must not be empty");
        }
        if self
            .agent
            .session_id
            .as_deref()
            .is_some_and(|id| id.trim().is_empty())
        {
            bail!("agent.session_id must not be blank when set");
        }
        Ok(())
    }
}

/// Resolve the config path: explicit flag, then `QUICKBOOK_CONFIG`, then the default.
#[must_use]
pub fn resolve_config_path(cli_path: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_path {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("QUICKBOOK_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_CONFIG_PATH)
}
