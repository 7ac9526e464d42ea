use std::io::Write;

use crate::completion::stream_completion;
use crate::error::AgentError;
use crate::runtime::{AgentRuntime, InvokeRequest};

/// Sends one question to an agent and prints the streamed answer.
#[derive(Debug)]
pub struct AgentTester<R> {
    runtime: R,
}

impl<R: AgentRuntime> AgentTester<R> {
    #[must_use]
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    /// Invoke the agent, echo fragments to `out` as they arrive, then print the full text.
    ///
    /// # Errors
    ///
    /// Returns the first invocation, stream, decode, or write error.
    pub async fn run<W: Write>(
        &self,
        request: InvokeRequest,
        out: &mut W,
    ) -> Result<String, AgentError> {
        writeln!(
            out,
            "Testing agent {} (alias {})...",
            request.agent_id, request.alias_id
        )?;
        writeln!(out, "Question: {}\n", request.input_text)?;

        let events = self.runtime.invoke(request).await?;

        writeln!(out, "Response:")?;
        let completion = stream_completion(events, out).await?;
        writeln!(out, "\n\nFull response:\n{completion}")?;
        out.flush()?;

        tracing::debug!(
            runtime = self.runtime.name(),
            chars = completion.chars().count(),
            "completion received"
        );
        Ok(completion)
    }
}
