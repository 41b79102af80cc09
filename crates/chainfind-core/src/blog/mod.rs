//! Blog post ("system log") storage.
//!
//! Posts live behind the `PostStore` trait so callers are independent of
//! the backend: a local JSON file or the chainfind HTTP API.

mod file_store;
mod http_store;
mod post;
mod seed;
mod store;

pub use file_store::FilePostStore;
pub use http_store::HttpPostStore;
pub use post::{Category, Post};
pub use seed::seed_posts;
pub use store::PostStore;
