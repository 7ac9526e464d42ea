//! Test-only agent runtime that replays scripted events.

use std::sync::{Arc, Mutex};

use crate::error::AgentError;
use crate::runtime::{AgentEvent, AgentRuntime, EventStream, InvokeRequest};

#[derive(Debug, Clone, Default)]
pub struct MockRuntime {
    events: Vec<AgentEvent>,
    fail_invoke: bool,
    /// Yield this many events, then fail the stream.
    fail_after: Option<usize>,
    requests: Arc<Mutex<Vec<InvokeRequest>>>,
}

impl MockRuntime {
    #[must_use]
    pub fn with_events(events: Vec<AgentEvent>) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fragments(fragments: &[&str]) -> Self {
        Self::with_events(fragments.iter().map(|f| AgentEvent::text(f)).collect())
    }

    /// Reject every invocation before any event is produced.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_invoke: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn fail_after(mut self, events: usize) -> Self {
        self.fail_after = Some(events);
        self
    }

    /// Requests received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the request log mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<InvokeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl AgentRuntime for MockRuntime {
    async fn invoke(&self, request: InvokeRequest) -> Result<EventStream, AgentError> {
        self.requests.lock().unwrap().push(request);
        if self.fail_invoke {
            return Err(AgentError::Invoke("mock invoke error".into()));
        }

        let mut items: Vec<Result<AgentEvent, AgentError>> = self
            .events
            .iter()
            .take(self.fail_after.unwrap_or(usize::MAX))
            .cloned()
            .map(Ok)
            .collect();
        if self.fail_after.is_some() {
            items.push(Err(AgentError::Stream("mock stream error".into())));
        }
        Ok(Box::pin(tokio_stream::iter(items)))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
