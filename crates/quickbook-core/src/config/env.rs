use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("QUICKBOOK_REGION") {
            self.aws.region = v;
        }
        if let Ok(v) = std::env::var("QUICKBOOK_COLLECTION") {
            self.index.collection = v;
        }
        if let Ok(v) = std::env::var("QUICKBOOK_INDEX") {
            self.index.name = v;
        }
        if let Ok(v) = std::env::var("QUICKBOOK_INDEX_TIMEOUT") {
            if let Ok(secs) = v.parse::<u64>() {
                self.index.timeout_secs = secs;
            } else {
                tracing::warn!("ignoring invalid QUICKBOOK_INDEX_TIMEOUT value: {v}");
            }
        }
        if let Ok(v) = std::env::var("QUICKBOOK_FALLBACK_QUESTION") {
            self.agent.fallback_question = v;
        }
        if let Ok(v) = std::env::var("QUICKBOOK_SESSION_ID") {
            self.agent.session_id = Some(v);
        }
    }
}
