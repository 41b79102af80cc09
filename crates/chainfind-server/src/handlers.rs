//! Request handlers for the post API.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::info;

use chainfind_core::blog::Post;

use crate::error::AppError;
use crate::state::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/v1/posts
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let posts = state.store.list().await?;
    Ok(Json(posts))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, AppError> {
    match state.store.get(&id).await? {
        Some(post) => Ok(Json(post)),
        None => Err(AppError::PostNotFound),
    }
}

/// POST /api/v1/posts
///
/// Create-or-update keyed by the id in the body.
pub async fn save_post(
    State(state): State<AppState>,
    Json(post): Json<Post>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    info!(id = %post.id, "saving log entry");
    state.store.save(&post).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Log entry saved successfully", "id": post.id })),
    ))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    info!(id = %id, "purging log entry");
    if state.store.delete(&id).await? {
        Ok(Json(json!({ "message": "Log entry purged" })))
    } else {
        Err(AppError::PostNotFound)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use chainfind_core::blog::{Category, FilePostStore, Post};

    use crate::router::build_router;
    use crate::state::AppState;

    fn test_app() -> (Router, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FilePostStore::new(dir.path().join("posts.json"));
        let app = build_router(AppState::new(Arc::new(store)));
        (app, dir)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_returns_seed_newest_first() {
        let (app, _dir) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/posts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let posts = body_json(response).await;
        let ids: Vec<_> = posts
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["LOG_001", "LOG_002", "LOG_003"]);
    }

    #[tokio::test]
    async fn test_get_known_post() {
        let (app, _dir) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/posts/LOG_002")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let post = body_json(response).await;
        assert_eq!(post["category"], "CRYPTOGRAPHY");
        assert!(post["readTime"].is_string());
    }

    #[tokio::test]
    async fn test_get_missing_post_is_404_with_error_envelope() {
        let (app, _dir) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/posts/LOG_404")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Post not found");
    }

    #[tokio::test]
    async fn test_save_creates_with_201_envelope() {
        let (app, _dir) = test_app();

        let post = Post {
            id: "LOG_100".to_string(),
            title: "New entry".to_string(),
            date: "2025.08.01".to_string(),
            category: Category::Blockchain,
            author: "ROOT_ADMIN".to_string(),
            read_time: "3 MIN".to_string(),
            preview: "preview".to_string(),
            content: "content".to_string(),
        };

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/posts")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&post).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Log entry saved successfully");
        assert_eq!(body["id"], "LOG_100");

        // Newest date sorts first on subsequent list.
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/posts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let posts = body_json(response).await;
        assert_eq!(posts[0]["id"], "LOG_100");
    }

    #[tokio::test]
    async fn test_save_updates_existing_id_without_duplicate() {
        let (app, _dir) = test_app();

        let post = Post {
            id: "LOG_001".to_string(),
            title: "Rewritten".to_string(),
            date: "2024.05.12".to_string(),
            category: Category::AiWeb3,
            author: "ROOT_ADMIN".to_string(),
            read_time: "5 MIN".to_string(),
            preview: "p".to_string(),
            content: "c".to_string(),
        };

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/posts")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&post).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/posts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let posts = body_json(response).await;
        assert_eq!(posts.as_array().unwrap().len(), 3);
        assert_eq!(posts[0]["title"], "Rewritten");
    }

    #[tokio::test]
    async fn test_delete_purges_and_missing_is_404() {
        let (app, _dir) = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/posts/LOG_003")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Log entry purged");

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/posts/LOG_003")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _dir) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
