//! Posts command handlers.

use anyhow::{Context, Result, bail};

use chainfind_core::blog::{FilePostStore, HttpPostStore, PostStore};
use chainfind_core::config::{Config, PostsBackend};

/// Picks the store: `--remote` forces the HTTP backend, otherwise the
/// configured one.
pub fn resolve_store(config: &Config, remote: bool) -> Box<dyn PostStore> {
    if remote || config.posts.backend == PostsBackend::Http {
        Box::new(HttpPostStore::new(config.posts.base_url.clone()))
    } else {
        Box::new(FilePostStore::open_default())
    }
}

pub async fn list(store: &dyn PostStore) -> Result<()> {
    let posts = store.list().await.context("list posts")?;
    if posts.is_empty() {
        println!("No log entries found.");
        return Ok(());
    }

    for post in posts {
        println!(
            "{:<10} {}  [{}]  {}",
            post.id,
            post.date,
            post.category.display_name(),
            post.title
        );
    }
    Ok(())
}

pub async fn show(store: &dyn PostStore, id: &str) -> Result<()> {
    let Some(post) = store.get(id).await.context("fetch post")? else {
        bail!("No log entry with id '{id}'");
    };

    println!("ID:       {}", post.id);
    println!("TITLE:    {}", post.title);
    println!("DATE:     {}", post.date);
    println!("CATEGORY: {}", post.category.display_name());
    println!("AUTHOR:   {}", post.author);
    println!("READ:     {}", post.read_time);
    println!();
    println!("{}", post.content);
    Ok(())
}

pub async fn delete(store: &dyn PostStore, id: &str) -> Result<()> {
    if store.delete(id).await.context("delete post")? {
        println!("Log entry purged: {id}");
        Ok(())
    } else {
        bail!("No log entry with id '{id}'");
    }
}

pub async fn reset(store: &dyn PostStore) -> Result<()> {
    store.reset().await.context("reset posts")?;
    println!("Log store restored to seed entries.");
    Ok(())
}
