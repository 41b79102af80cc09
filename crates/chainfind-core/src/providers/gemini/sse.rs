//! Gemini SSE stream parser.
//!
//! Parses Server-Sent Events from the streaming chat endpoint and converts
//! them to normalized `StreamEvent`s. Gemini resends the accumulated
//! candidate text in each chunk, so the parser computes rolling deltas and
//! only ever emits the appended portion.

use std::collections::VecDeque;
use std::pin::Pin;

use eventsource_stream::{EventStream, Eventsource};
use futures_util::Stream;
use serde_json::Value;

use crate::providers::{ProviderError, ProviderErrorKind, ProviderResult, StreamEvent};

pub struct GeminiSseParser<S> {
    inner: EventStream<S>,
    pending: VecDeque<StreamEvent>,
    /// Accumulated reply text for delta calculation.
    last_text: String,
    emitted_done: bool,
}

impl<S> GeminiSseParser<S> {
    pub fn new(stream: S) -> Self
    where
        S: Eventsource,
    {
        Self {
            inner: stream.eventsource(),
            pending: VecDeque::new(),
            last_text: String::new(),
            emitted_done: false,
        }
    }

    fn handle_event_data(&mut self, data: &str) -> ProviderResult<()> {
        let trimmed = data.trim();
        if trimmed.is_empty() || trimmed == "[DONE]" {
            return Ok(());
        }

        let value = serde_json::from_str::<Value>(trimmed).map_err(|err| {
            ProviderError::new(
                ProviderErrorKind::Parse,
                format!("Failed to parse SSE JSON: {err}"),
            )
        })?;
        self.handle_chunk(&value);
        Ok(())
    }

    fn handle_chunk(&mut self, value: &Value) {
        let payload = value.get("response").unwrap_or(value);

        if let Some(error) = value.get("error").or_else(|| payload.get("error")) {
            let error_type = error
                .get("status")
                .or_else(|| error.get("code"))
                .and_then(|v| v.as_str())
                .unwrap_or("error")
                .to_string();
            let message = error
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            self.pending.push_back(StreamEvent::Error {
                error_type,
                message,
            });
            return;
        }

        let Some(candidate) = payload
            .get("candidates")
            .and_then(|v| v.as_array())
            .and_then(|candidates| candidates.first())
        else {
            return;
        };

        if let Some(parts) = candidate
            .get("content")
            .and_then(|content| content.get("parts"))
            .and_then(|v| v.as_array())
        {
            // Thought parts are model-internal; only surface plain text.
            let mut combined_text = String::new();
            for part in parts {
                let is_thought = part
                    .get("thought")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                if !is_thought && let Some(text) = part.get("text").and_then(|v| v.as_str()) {
                    combined_text.push_str(text);
                }
            }

            if !combined_text.is_empty() {
                let delta = if combined_text.starts_with(&self.last_text) {
                    combined_text[self.last_text.len()..].to_string()
                } else {
                    combined_text.clone()
                };
                self.last_text = combined_text;
                if !delta.is_empty() {
                    self.pending.push_back(StreamEvent::TextDelta { text: delta });
                }
            }
        }

        if candidate.get("finishReason").and_then(|v| v.as_str()).is_some()
            && !self.emitted_done
        {
            self.emitted_done = true;
            self.pending.push_back(StreamEvent::MessageCompleted);
        }
    }
}

impl<S, E> Stream for GeminiSseParser<S>
where
    S: Stream<Item = std::result::Result<bytes::Bytes, E>> + Unpin,
    E: std::error::Error + Send + Sync + 'static,
{
    type Item = ProviderResult<StreamEvent>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        use std::task::Poll;

        loop {
            if let Some(event) = self.pending.pop_front() {
                return Poll::Ready(Some(Ok(event)));
            }

            let inner = Pin::new(&mut self.inner);
            match inner.poll_next(cx) {
                Poll::Ready(Some(Ok(event))) => {
                    if let Err(err) = self.handle_event_data(&event.data) {
                        return Poll::Ready(Some(Err(err)));
                    }
                }
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(ProviderError::new(
                        ProviderErrorKind::Parse,
                        format!("SSE stream error: {e}"),
                    ))));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
