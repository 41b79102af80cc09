//! Local JSON-file post store.
//!
//! Posts are kept as a JSON object keyed by post id so create, update and
//! delete touch one key instead of rewriting an ordered array. Writes are
//! atomic (temp file + rename). Single-writer use.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures_util::future::BoxFuture;

use super::{Post, PostStore, seed_posts};

pub struct FilePostStore {
    path: PathBuf,
}

impl FilePostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the store at the default location under CHAINFIND_HOME.
    pub fn open_default() -> Self {
        Self::new(crate::config::paths::posts_path())
    }

    fn read_map(&self) -> Result<BTreeMap<String, Post>> {
        if !self.path.exists() {
            // First access seeds the original log entries.
            let map: BTreeMap<String, Post> = seed_posts()
                .into_iter()
                .map(|post| (post.id.clone(), post))
                .collect();
            self.write_map(&map)?;
            return Ok(map);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read posts from {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse posts from {}", self.path.display()))
    }

    fn write_map(&self, map: &BTreeMap<String, Post>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(map).context("Failed to serialize posts")?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)
            .with_context(|| format!("Failed to write posts to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PostStore for FilePostStore {
    fn list(&self) -> BoxFuture<'_, Result<Vec<Post>>> {
        Box::pin(async move {
            let mut posts: Vec<Post> = self.read_map()?.into_values().collect();
            Post::sort_newest_first(&mut posts);
            Ok(posts)
        })
    }

    fn get(&self, id: &str) -> BoxFuture<'_, Result<Option<Post>>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.read_map()?.remove(&id)) })
    }

    fn save(&self, post: &Post) -> BoxFuture<'_, Result<()>> {
        let post = post.clone();
        Box::pin(async move {
            let mut map = self.read_map()?;
            map.insert(post.id.clone(), post);
            self.write_map(&map)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, Result<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut map = self.read_map()?;
            let removed = map.remove(&id).is_some();
            if removed {
                self.write_map(&map)?;
            }
            Ok(removed)
        })
    }

    fn reset(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let map: BTreeMap<String, Post> = seed_posts()
                .into_iter()
                .map(|post| (post.id.clone(), post))
                .collect();
            self.write_map(&map)
        })
    }
}
