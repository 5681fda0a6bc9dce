//! Server-Sent Events relay for streamed chat answers.
//!
//! Each upstream text delta becomes one `data: {"content": ...}` event.
//! A spawned task owns the upstream stream; when the client goes away the
//! channel closes, the task stops reading, and the upstream body is dropped.
//!
//! An upstream failure after the response has started is forwarded as a
//! stream error, so the body ends abruptly instead of closing cleanly and
//! clients can tell a broken answer from a complete one.

use axum::response::sse::{Event, KeepAlive, Sse};
use futures_core::Stream;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

use evh_oi_llm::audit::{LlmAuditEntry, LlmOperation};
use evh_oi_llm::sse::content_frame;
use evh_oi_llm::{LlmError, TextStream};

use crate::state::SharedState;

const RELAY_BUFFER: usize = 32;

/// Relay `upstream` to the client and audit the accumulated answer when it ends.
pub fn relay_chat(
    state: SharedState,
    mut upstream: TextStream,
    started: Instant,
) -> Sse<impl Stream<Item = Result<Event, LlmError>>> {
    let (tx, rx) = mpsc::channel::<Result<Event, LlmError>>(RELAY_BUFFER);

    tokio::spawn(async move {
        let mut answer = String::new();
        let mut failure = None;

        while let Some(item) = upstream.next().await {
            match item {
                Ok(fragment) => {
                    answer.push_str(&fragment);
                    if tx.send(Ok(Event::default().data(content_frame(&fragment)))).await.is_err() {
                        tracing::debug!(chars = answer.len(), "Chat client disconnected; dropping upstream");
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Chat stream failed mid-response");
                    failure = Some(e);
                    break;
                }
            }
        }

        let latency_ms = started.elapsed().as_millis() as u64;
        let succeeded = failure.is_none();
        tracing::info!(
            model = state.llm.model_id(),
            backend = state.llm.backend_name(),
            latency_ms,
            chars = answer.chars().count(),
            succeeded,
            "Chat stream finished"
        );
        state
            .audit
            .record(LlmAuditEntry::new(
                LlmOperation::ChatDocument,
                state.llm.model_id().to_string(),
                state.llm.backend_name().to_string(),
                0,
                0,
                &answer,
                latency_ms,
                succeeded,
            ))
            .await;

        if let Some(e) = failure {
            let _ = tx.send(Err(e)).await;
        }
    });

    Sse::new(ReceiverStream::new(rx)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}
