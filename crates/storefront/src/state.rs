//! Application state shared across handlers.

use std::sync::Arc;

use crate::store::CommerceStore;

/// Application state shared across all handlers.
///
/// Generic over the commerce store so handlers receive their state-reader
/// and intent-sink explicitly instead of reaching into a global; production
/// wires in [`HttpStore`](crate::store::HttpStore), tests wire in
/// [`InMemoryStore`](crate::store::InMemoryStore).
///
/// Cheaply cloneable via `Arc`.
pub struct AppState<S> {
    store: Arc<S>,
}

// Manual impl: `#[derive(Clone)]` would require `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: CommerceStore> AppState<S> {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Get a reference to the commerce store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
