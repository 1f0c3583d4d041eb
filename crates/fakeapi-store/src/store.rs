use async_trait::async_trait;

use fakeapi_core::{ApiSchema, Plan};

use crate::error::StoreResult;

/// Document store holding schema definitions and owner plans.
#[async_trait]
pub trait SchemaStore: Send + Sync {
    /// Backend identifier used in logs (e.g. `memory`).
    fn backend(&self) -> &'static str;

    /// Schema served under `endpoint_id`, if any.
    async fn find_by_endpoint(&self, endpoint_id: &str) -> StoreResult<Option<ApiSchema>>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<ApiSchema>>;

    /// Schemas owned by `owner`, in creation order.
    async fn list_by_owner(&self, owner: &str) -> StoreResult<Vec<ApiSchema>>;

    async fn count_by_owner(&self, owner: &str) -> StoreResult<usize> {
        Ok(self.list_by_owner(owner).await?.len())
    }

    /// Insert a new schema. Fails with `Conflict` on a duplicate id or endpoint.
    async fn insert(&self, schema: ApiSchema) -> StoreResult<()>;

    /// Insert a new schema unless its owner is on the Free plan and already
    /// holds `free_tier_limit` schemas. The check and the insert are atomic
    /// with respect to other calls on the same store; a full quota fails with
    /// `StoreError::Rule(Error::QuotaExceeded { .. })`.
    async fn insert_within_quota(
        &self,
        schema: ApiSchema,
        free_tier_limit: usize,
    ) -> StoreResult<()>;

    /// Replace a stored schema. Returns `false` when the id is unknown.
    async fn update(&self, schema: ApiSchema) -> StoreResult<bool>;

    /// Delete a schema. Returns `false` when the id is unknown.
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Plan of `owner`; owners without a record are on the Free plan.
    async fn plan_for(&self, owner: &str) -> StoreResult<Plan>;

    async fn set_plan(&self, owner: &str, plan: Plan) -> StoreResult<()>;
}
