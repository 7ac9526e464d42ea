use std::io::Write;
use std::string::FromUtf8Error;

use tokio_stream::StreamExt;

use crate::error::AgentError;
use crate::runtime::{AgentEvent, EventStream};

/// Drain `events`, echoing each text fragment to `out` as soon as it arrives.
///
/// Returns the concatenation of all fragments once the stream ends. A multi-byte
/// character split across two chunks is held back until it is complete.
///
/// # Errors
///
/// Stops at and returns the first stream error, undecodable chunk, or write failure.
/// Fragments received before the failure have already been written to `out`.
pub async fn stream_completion<W: Write>(
    mut events: EventStream,
    out: &mut W,
) -> Result<String, AgentError> {
    let mut completion = String::new();
    let mut pending = Vec::new();
    while let Some(event) = events.next().await {
        match event? {
            AgentEvent::Chunk { bytes: Some(bytes) } => {
                pending.extend_from_slice(&bytes);
                let fragment = take_complete(&mut pending)?;
                if fragment.is_empty() {
                    continue;
                }
                out.write_all(fragment.as_bytes())?;
                out.flush()?;
                completion.push_str(&fragment);
            }
            AgentEvent::Chunk { bytes: None } => {
                tracing::debug!("skipping chunk without payload");
            }
            AgentEvent::Other { kind } => {
                tracing::debug!(kind, "skipping non-text event");
            }
        }
    }
    if !pending.is_empty() {
        // stream ended inside a character
        String::from_utf8(pending)?;
    }
    Ok(completion)
}

/// Split off the longest decodable prefix of `pending`, keeping an incomplete
/// trailing sequence for the next chunk. Invalid bytes fail immediately.
fn take_complete(pending: &mut Vec<u8>) -> Result<String, FromUtf8Error> {
    let complete = match std::str::from_utf8(pending) {
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        _ => pending.len(),
    };
    let tail = pending.split_off(complete);
    String::from_utf8(std::mem::replace(pending, tail))
}
