use std::future::Future;
use std::pin::Pin;

use futures_core::Stream;

use crate::error::AgentError;

/// Lazy, finite, non-restartable sequence of events produced by one invocation.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<AgentEvent, AgentError>> + Send>>;

/// One event of an agent's streamed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    /// Completion fragment. `bytes` carries UTF-8 text when present.
    Chunk { bytes: Option<Vec<u8>> },
    /// Any event kind that carries no completion text (trace, return control, ...).
    Other { kind: &'static str },
}

impl AgentEvent {
    #[must_use]
    pub fn text(fragment: &str) -> Self {
        Self::Chunk {
            bytes: Some(fragment.as_bytes().to_vec()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeRequest {
    pub agent_id: String,
    pub alias_id: String,
    pub session_id: String,
    pub input_text: String,
}

impl InvokeRequest {
    /// Build a request in a fresh session.
    #[must_use]
    pub fn new(
        agent_id: impl Into<String>,
        alias_id: impl Into<String>,
        input_text: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            alias_id: alias_id.into(),
            session_id: uuid::Uuid::new_v4().to_string(),
            input_text: input_text.into(),
        }
    }

    /// Reuse an existing session so the agent keeps earlier conversation context.
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }
}

pub trait AgentRuntime: Send + Sync {
    /// Invoke the agent and return its response as an event stream.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Invoke` if the invocation is rejected or cannot be sent.
    fn invoke(
        &self,
        request: InvokeRequest,
    ) -> impl Future<Output = Result<EventStream, AgentError>> + Send;

    fn name(&self) -> &'static str;
}
