use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_REGION: &str = "eu-west-1";
pub const DEFAULT_COLLECTION: &str = "quickbook-vectors";
pub const DEFAULT_INDEX: &str = "textbook-index";
pub const DEFAULT_FALLBACK_QUESTION: &str = "What is a derivative?";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub agent: AgentConfig,
}

fn default_region() -> String {
    DEFAULT_REGION.into()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.into()
}

fn default_index_name() -> String {
    DEFAULT_INDEX.into()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_fallback_question() -> String {
    DEFAULT_FALLBACK_QUESTION.into()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AwsConfig {
    /// Region used for both the collection lookup and the agent runtime.
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct IndexConfig {
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_index_name")]
    pub name: String,
    /// Request timeout for the index admin call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl IndexConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            name: default_index_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AgentConfig {
    #[serde(default = "default_fallback_question")]
    pub fallback_question: String,
    /// Pin every invocation to one session. A fresh id is generated per run when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            fallback_question: default_fallback_question(),
            session_id: None,
        }
    }
}
