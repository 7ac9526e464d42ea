//! Bedrock Agent Runtime backend.

use aws_config::SdkConfig;
use aws_sdk_bedrockagentruntime::Client;
use aws_sdk_bedrockagentruntime::error::DisplayErrorContext;
use aws_sdk_bedrockagentruntime::primitives::Blob;
use aws_sdk_bedrockagentruntime::primitives::event_stream::EventReceiver;
use aws_sdk_bedrockagentruntime::types::ResponseStream;
use aws_sdk_bedrockagentruntime::types::error::ResponseStreamError;

use crate::error::AgentError;
use crate::runtime::{AgentEvent, AgentRuntime, EventStream, InvokeRequest};

#[derive(Clone)]
pub struct BedrockAgentRuntime {
    client: Client,
}

impl std::fmt::Debug for BedrockAgentRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedrockAgentRuntime").finish_non_exhaustive()
    }
}

impl BedrockAgentRuntime {
    #[must_use]
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

impl AgentRuntime for BedrockAgentRuntime {
    async fn invoke(&self, request: InvokeRequest) -> Result<EventStream, AgentError> {
        tracing::info!(
            agent_id = %request.agent_id,
            alias_id = %request.alias_id,
            session_id = %request.session_id,
            "invoking agent"
        );
        let output = self
            .client
            .invoke_agent()
            .agent_id(request.agent_id)
            .agent_alias_id(request.alias_id)
            .session_id(request.session_id)
            .input_text(request.input_text)
            .send()
            .await
            .map_err(|e| AgentError::Invoke(DisplayErrorContext(&e).to_string()))?;

        Ok(receiver_to_stream(output.completion))
    }

    fn name(&self) -> &'static str {
        "bedrock"
    }
}

/// Adapt the SDK's pull-based receiver into an `EventStream`.
///
/// The stream ends on the provider's end-of-stream signal, or right after the first
/// receive error.
fn receiver_to_stream(
    receiver: EventReceiver<ResponseStream, ResponseStreamError>,
) -> EventStream {
    let stream = futures::stream::unfold(Some(receiver), |state| async move {
        let mut receiver = state?;
        match receiver.recv().await {
            Ok(Some(event)) => Some((Ok(map_event(event)), Some(receiver))),
            Ok(None) => None,
            Err(e) => Some((
                Err(AgentError::Stream(DisplayErrorContext(&e).to_string())),
                None,
            )),
        }
    });
    Box::pin(stream)
}

fn map_event(event: ResponseStream) -> AgentEvent {
    match event {
        ResponseStream::Chunk(part) => AgentEvent::Chunk {
            bytes: part.bytes.map(Blob::into_inner),
        },
        ResponseStream::Trace(_) => AgentEvent::Other { kind: "trace" },
        ResponseStream::ReturnControl(_) => AgentEvent::Other {
            kind: "return_control",
        },
        _ => AgentEvent::Other { kind: "unknown" },
    }
}
