use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fakeapi_core::{ApiSchema, Plan, check_quota};

use crate::error::{StoreError, StoreResult};

/// Snapshot of everything a store holds. Also the on-disk format of the file store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct StoreState {
    #[serde(default)]
    pub schemas: Vec<ApiSchema>,
    #[serde(default)]
    pub plans: BTreeMap<String, Plan>,
}

impl StoreState {
    pub fn find_by_endpoint(&self, endpoint_id: &str) -> Option<&ApiSchema> {
        self.schemas
            .iter()
            .find(|schema| schema.endpoint_id == endpoint_id)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&ApiSchema> {
        self.schemas.iter().find(|schema| schema.id == id)
    }

    pub fn list_by_owner(&self, owner: &str) -> Vec<ApiSchema> {
        self.schemas
            .iter()
            .filter(|schema| schema.user_id == owner)
            .cloned()
            .collect()
    }

    pub fn insert(&mut self, schema: ApiSchema) -> StoreResult<()> {
        if self.find_by_id(&schema.id).is_some() {
            return Err(StoreError::Conflict(format!(
                "schema id already exists: {}",
                schema.id
            )));
        }
        self.ensure_endpoint_free(&schema)?;
        self.schemas.push(schema);
        Ok(())
    }

    /// Insert after checking the owner's plan quota against the same snapshot.
    pub fn insert_within_quota(
        &mut self,
        schema: ApiSchema,
        free_tier_limit: usize,
    ) -> StoreResult<()> {
        let owned = self
            .schemas
            .iter()
            .filter(|stored| stored.user_id == schema.user_id)
            .count();
        check_quota(self.plan_for(&schema.user_id), owned, free_tier_limit)?;
        self.insert(schema)
    }

    pub fn update(&mut self, schema: ApiSchema) -> StoreResult<bool> {
        self.ensure_endpoint_free(&schema)?;
        match self.schemas.iter_mut().find(|stored| stored.id == schema.id) {
            Some(stored) => {
                *stored = schema;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.schemas.len();
        self.schemas.retain(|schema| schema.id != id);
        self.schemas.len() != before
    }

    pub fn plan_for(&self, owner: &str) -> Plan {
        self.plans.get(owner).copied().unwrap_or_default()
    }

    pub fn set_plan(&mut self, owner: &str, plan: Plan) {
        self.plans.insert(owner.to_string(), plan);
    }

    fn ensure_endpoint_free(&self, schema: &ApiSchema) -> StoreResult<()> {
        match self.find_by_endpoint(&schema.endpoint_id) {
            Some(existing) if existing.id != schema.id => Err(StoreError::Conflict(format!(
                "endpoint already exists: {}",
                schema.endpoint_id
            ))),
            _ => Ok(()),
        }
    }
}
