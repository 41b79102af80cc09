//! Remote conversation channel implementations.

pub mod gemini;
pub mod shared;

use anyhow::Result;
use futures_util::future::BoxFuture;

pub use shared::{
    ProviderError, ProviderErrorKind, ProviderResult, ProviderStream, StreamEvent, USER_AGENT,
    resolve_api_key, resolve_base_url,
};

/// A reusable handle to an ongoing remote conversation.
///
/// The channel owns the cumulative conversation context. `send_stream`
/// produces a lazy, ordered, finite stream of events for one reply; the
/// stream is non-restartable and cancellation is cooperative (the consumer
/// simply stops pulling). Successful turns are committed to the context via
/// `record_turn`; failed turns leave it untouched.
pub trait ConversationChannel: Send {
    /// Submits one user turn and returns the streamed reply.
    fn send_stream(&mut self, text: &str) -> BoxFuture<'_, Result<ProviderStream>>;

    /// Records a completed turn in the conversation context.
    fn record_turn(&mut self, user: &str, reply: &str);
}
