#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("agent invocation failed: {0}")]
    Invoke(String),

    #[error("response stream failed: {0}")]
    Stream(String),

    #[error("response chunk is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("output write failed: {0}")]
    Io(#[from] std::io::Error),
}
