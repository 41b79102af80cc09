//! Blog post CRUD API.
//!
//! Serves the `/api/v1/posts` routes backed by the local file store.

mod error;
mod handlers;
mod router;
mod state;

pub use error::AppError;
pub use router::build_router;
pub use state::AppState;

use anyhow::{Context, Result};

/// Binds `addr` and serves the post API until the task is stopped.
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "post API listening");
    axum::serve(listener, router)
        .await
        .context("Post API server failed")?;
    Ok(())
}
