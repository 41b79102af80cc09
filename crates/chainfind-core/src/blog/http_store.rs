//! CRUD client for the chainfind post API.

use anyhow::{Context, Result, bail};
use futures_util::future::BoxFuture;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{Post, PostStore};
use crate::providers::USER_AGENT;

pub struct HttpPostStore {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SaveResponse {
    #[allow(dead_code)]
    message: String,
    id: String,
}

impl HttpPostStore {
    /// `base_url` points at the API root, e.g. `http://host:8080/api/v1`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    fn post_url(&self, id: &str) -> String {
        format!("{}/posts/{id}", self.base_url)
    }
}

impl PostStore for HttpPostStore {
    fn list(&self) -> BoxFuture<'_, Result<Vec<Post>>> {
        Box::pin(async move {
            let response = self
                .http
                .get(self.posts_url())
                .header("user-agent", USER_AGENT)
                .send()
                .await
                .context("Failed to reach post API")?
                .error_for_status()
                .context("Post API returned an error")?;
            response.json().await.context("Failed to parse post list")
        })
    }

    fn get(&self, id: &str) -> BoxFuture<'_, Result<Option<Post>>> {
        let url = self.post_url(id);
        Box::pin(async move {
            let response = self
                .http
                .get(url)
                .header("user-agent", USER_AGENT)
                .send()
                .await
                .context("Failed to reach post API")?;

            if response.status() == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            let response = response
                .error_for_status()
                .context("Post API returned an error")?;
            Ok(Some(response.json().await.context("Failed to parse post")?))
        })
    }

    fn save(&self, post: &Post) -> BoxFuture<'_, Result<()>> {
        let post = post.clone();
        Box::pin(async move {
            let response = self
                .http
                .post(self.posts_url())
                .header("user-agent", USER_AGENT)
                .json(&post)
                .send()
                .await
                .context("Failed to reach post API")?
                .error_for_status()
                .context("Post API rejected the post")?;

            let saved: SaveResponse =
                response.json().await.context("Failed to parse save reply")?;
            if saved.id != post.id {
                bail!("Post API echoed unexpected id {}", saved.id);
            }
            Ok(())
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, Result<bool>> {
        let url = self.post_url(id);
        Box::pin(async move {
            let response = self
                .http
                .delete(url)
                .header("user-agent", USER_AGENT)
                .send()
                .await
                .context("Failed to reach post API")?;

            if response.status() == StatusCode::NOT_FOUND {
                return Ok(false);
            }
            response
                .error_for_status()
                .context("Post API returned an error")?;
            Ok(true)
        })
    }

    fn reset(&self) -> BoxFuture<'_, Result<()>> {
        // The API intentionally exposes only list/get/save/delete.
        Box::pin(async move { bail!("the HTTP backend does not support reset") })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::blog::{Category, seed_posts};

    fn store_for(server: &MockServer) -> HttpPostStore {
        HttpPostStore::new(format!("{}/api/v1", server.uri()))
    }

    #[tokio::test]
    async fn test_list_parses_wire_posts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(seed_posts()))
            .mount(&server)
            .await;

        let posts = store_for(&server).list().await.unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].category, Category::AiWeb3);
    }

    #[tokio::test]
    async fn test_get_missing_maps_404_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/posts/LOG_404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "Post not found" })),
            )
            .mount(&server)
            .await;

        let post = store_for(&server).get("LOG_404").await.unwrap();
        assert!(post.is_none());
    }

    #[tokio::test]
    async fn test_save_posts_wire_shape_and_checks_echoed_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/posts"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Log entry saved successfully",
                "id": "LOG_001"
            })))
            .mount(&server)
            .await;

        let post = seed_posts().remove(0);
        store_for(&server).save(&post).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_returns_true_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/posts/LOG_001"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "message": "Log entry purged" })),
            )
            .mount(&server)
            .await;

        assert!(store_for(&server).delete("LOG_001").await.unwrap());
    }

    #[tokio::test]
    async fn test_reset_is_unsupported() {
        let server = MockServer::start().await;
        assert!(store_for(&server).reset().await.is_err());
    }
}
