use anyhow::Result;
use futures_util::future::BoxFuture;

use super::Post;

/// Backend-independent post storage.
///
/// `save` is create-or-update keyed by `Post::id`; `delete` reports
/// whether the id existed; `reset` restores the seed data (and is not
/// available on every backend).
pub trait PostStore: Send + Sync {
    /// All posts, newest first.
    fn list(&self) -> BoxFuture<'_, Result<Vec<Post>>>;

    fn get(&self, id: &str) -> BoxFuture<'_, Result<Option<Post>>>;

    fn save(&self, post: &Post) -> BoxFuture<'_, Result<()>>;

    fn delete(&self, id: &str) -> BoxFuture<'_, Result<bool>>;

    fn reset(&self) -> BoxFuture<'_, Result<()>>;
}
