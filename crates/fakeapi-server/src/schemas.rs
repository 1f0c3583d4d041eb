use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use fakeapi_core::{ApiSchema, FieldDefinition, endpoint_id_from_name, validate_schema};
use fakeapi_store::SchemaStore;

use crate::error::{ApiError, ApiResult};

/// Body of `POST /api/apis`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchemaRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub endpoint: Option<String>,
    pub fields: Option<Vec<FieldDefinition>>,
}

/// Body of `PUT /api/apis`. Absent members keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchemaRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub endpoint: Option<String>,
    pub fields: Option<Vec<FieldDefinition>>,
}

/// Owner-facing schema management served under `/api/apis`.
pub struct SchemaService {
    store: Arc<dyn SchemaStore>,
    free_tier_limit: usize,
}

impl SchemaService {
    pub fn new(store: Arc<dyn SchemaStore>, free_tier_limit: usize) -> Self {
        Self {
            store,
            free_tier_limit,
        }
    }

    pub async fn list(&self, user_id: Option<&str>) -> ApiResult<Vec<ApiSchema>> {
        let user_id = present(user_id)
            .ok_or_else(|| ApiError::Validation("userId is required".to_string()))?;
        Ok(self.store.list_by_owner(user_id).await?)
    }

    pub async fn create(&self, request: CreateSchemaRequest) -> ApiResult<ApiSchema> {
        let (Some(user_id), Some(name), Some(endpoint)) = (
            present_owned(request.user_id),
            present_owned(request.name),
            present_owned(request.endpoint),
        ) else {
            return Err(ApiError::Validation("missing required fields".to_string()));
        };

        let schema = ApiSchema {
            id: Uuid::new_v4().to_string(),
            user_id,
            endpoint_id: endpoint_id_from_name(&name),
            name,
            description: request.description.unwrap_or_default(),
            endpoint,
            fields: request.fields.unwrap_or_default(),
            created_at: Utc::now(),
            updated_at: None,
        };
        validate_schema(&schema)?;

        // Quota and endpoint uniqueness are checked by the store under one lock.
        self.store
            .insert_within_quota(schema.clone(), self.free_tier_limit)
            .await?;

        info!(
            event = "schema_created",
            api_id = %schema.id,
            user_id = %schema.user_id,
            endpoint_id = %schema.endpoint_id,
            fields = schema.fields.len()
        );
        Ok(schema)
    }

    pub async fn update(
        &self,
        api_id: Option<&str>,
        request: UpdateSchemaRequest,
    ) -> ApiResult<ApiSchema> {
        let api_id =
            present(api_id).ok_or_else(|| ApiError::Validation("apiId is required".to_string()))?;
        let mut schema = self
            .store
            .find_by_id(api_id)
            .await?
            .ok_or_else(ApiError::api_not_found)?;

        if let Some(name) = request.name {
            schema.endpoint_id = endpoint_id_from_name(&name);
            schema.name = name;
        }
        if let Some(description) = request.description {
            schema.description = description;
        }
        if let Some(endpoint) = request.endpoint {
            schema.endpoint = endpoint;
        }
        if let Some(fields) = request.fields {
            schema.fields = fields;
        }
        schema.updated_at = Some(Utc::now());
        validate_schema(&schema)?;

        self.ensure_endpoint_available(&schema).await?;
        if !self.store.update(schema.clone()).await? {
            return Err(ApiError::api_not_found());
        }

        info!(
            event = "schema_updated",
            api_id = %schema.id,
            endpoint_id = %schema.endpoint_id
        );
        Ok(schema)
    }

    pub async fn delete(&self, user_id: Option<&str>, api_id: Option<&str>) -> ApiResult<()> {
        let (Some(user_id), Some(api_id)) = (present(user_id), present(api_id)) else {
            return Err(ApiError::Validation(
                "userId and apiId are required".to_string(),
            ));
        };

        let owned = self
            .store
            .find_by_id(api_id)
            .await?
            .is_some_and(|schema| schema.user_id == user_id);
        if !owned || !self.store.delete(api_id).await? {
            return Err(ApiError::api_not_found());
        }

        info!(event = "schema_deleted", api_id = %api_id, user_id = %user_id);
        Ok(())
    }

    async fn ensure_endpoint_available(&self, schema: &ApiSchema) -> ApiResult<()> {
        match self.store.find_by_endpoint(&schema.endpoint_id).await? {
            Some(existing) if existing.id != schema.id => Err(ApiError::Validation(format!(
                "endpoint already exists: {}",
                schema.endpoint_id
            ))),
            _ => Ok(()),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

fn present_owned(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
