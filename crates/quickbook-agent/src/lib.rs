//! Agent runtime abstraction, Bedrock backend, and streamed completion handling.

pub mod bedrock;
pub mod completion;
pub mod error;
#[cfg(feature = "mock")]
pub mod mock;
pub mod runtime;
pub mod tester;

pub use bedrock::BedrockAgentRuntime;
pub use completion::stream_completion;
pub use error::AgentError;
pub use runtime::{AgentEvent, AgentRuntime, EventStream, InvokeRequest};
pub use tester::AgentTester;
