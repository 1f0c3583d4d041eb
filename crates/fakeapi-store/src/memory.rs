use async_trait::async_trait;
use tokio::sync::RwLock;

use fakeapi_core::{ApiSchema, Plan};

use crate::error::StoreResult;
use crate::state::StoreState;
use crate::store::SchemaStore;

/// Volatile store; everything is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemorySchemaStore {
    state: RwLock<StoreState>,
}

impl InMemorySchemaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SchemaStore for InMemorySchemaStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn find_by_endpoint(&self, endpoint_id: &str) -> StoreResult<Option<ApiSchema>> {
        Ok(self.state.read().await.find_by_endpoint(endpoint_id).cloned())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<ApiSchema>> {
        Ok(self.state.read().await.find_by_id(id).cloned())
    }

    async fn list_by_owner(&self, owner: &str) -> StoreResult<Vec<ApiSchema>> {
        Ok(self.state.read().await.list_by_owner(owner))
    }

    async fn insert(&self, schema: ApiSchema) -> StoreResult<()> {
        self.state.write().await.insert(schema)
    }

    async fn insert_within_quota(
        &self,
        schema: ApiSchema,
        free_tier_limit: usize,
    ) -> StoreResult<()> {
        self.state
            .write()
            .await
            .insert_within_quota(schema, free_tier_limit)
    }

    async fn update(&self, schema: ApiSchema) -> StoreResult<bool> {
        self.state.write().await.update(schema)
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        Ok(self.state.write().await.delete(id))
    }

    async fn plan_for(&self, owner: &str) -> StoreResult<Plan> {
        Ok(self.state.read().await.plan_for(owner))
    }

    async fn set_plan(&self, owner: &str, plan: Plan) -> StoreResult<()> {
        self.state.write().await.set_plan(owner, plan);
        Ok(())
    }
}
