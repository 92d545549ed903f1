//! Shared server state

use std::sync::Arc;

use vd_catalog::Catalog;

/// State shared by all request handlers. The catalog is read-only after
/// load, so concurrent readers need no locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}
