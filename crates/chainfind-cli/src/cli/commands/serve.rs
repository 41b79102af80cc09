//! Serve command handler.

use anyhow::Result;
use chainfind_server::AppState;

pub async fn run(addr: &str) -> Result<()> {
    chainfind_server::serve(addr, AppState::with_default_store()).await
}
