use std::sync::Arc;

use fakeapi_core::DEFAULT_FREE_TIER_LIMIT;
use fakeapi_generate::{GenerationEngine, MAX_PAGE_SIZE};
use fakeapi_store::SchemaStore;

use crate::records::RecordService;
use crate::schemas::SchemaService;

/// Limits applied by the request handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerLimits {
    /// Schemas a Free owner may hold.
    pub free_tier_limit: usize,
    /// Upper bound for `count` on record listing.
    pub max_page_size: u64,
}

impl Default for ServerLimits {
    fn default() -> Self {
        Self {
            free_tier_limit: DEFAULT_FREE_TIER_LIMIT,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Shared handler state. Cloned per request; services are reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RecordService>,
    pub schemas: Arc<SchemaService>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn SchemaStore>,
        engine: Arc<GenerationEngine>,
        limits: ServerLimits,
    ) -> Self {
        Self {
            records: Arc::new(RecordService::new(
                Arc::clone(&store),
                engine,
                limits.max_page_size,
            )),
            schemas: Arc::new(SchemaService::new(store, limits.free_tier_limit)),
        }
    }
}
