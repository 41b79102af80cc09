//! Shared application state.

use std::sync::Arc;

use chainfind_core::blog::{FilePostStore, PostStore};

/// State handed to every handler. The store is the single shared
/// dependency.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// State backed by the default local file store under CHAINFIND_HOME.
    pub fn with_default_store() -> Self {
        Self::new(Arc::new(FilePostStore::open_default()))
    }
}
