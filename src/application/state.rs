use std::sync::Arc;

use crate::storage::{MemoryStorage, Storage};

/// Shared handler state. The store is chosen once at startup.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// State over a fresh, empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }
}
