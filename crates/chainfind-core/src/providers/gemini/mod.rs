//! Gemini conversation channel (Generative Language API).

mod api;
mod sse;

pub use api::{GeminiChannel, GeminiConfig};
pub use sse::GeminiSseParser;
