use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value, json};
use tracing::info;

use fakeapi_core::ApiSchema;
use fakeapi_generate::{GenerationEngine, PageRequest, PageResponse};
use fakeapi_store::SchemaStore;

use crate::error::{ApiError, ApiResult};

/// JSON object accepted and echoed by the simulated record mutations.
pub type Payload = Map<String, Value>;

/// Public record operations served under `/api/{endpointId}`.
///
/// Nothing here touches the store beyond resolving the schema: listing
/// regenerates records on every call and mutations are shape-compatible echoes.
pub struct RecordService {
    store: Arc<dyn SchemaStore>,
    engine: Arc<GenerationEngine>,
    max_page_size: u64,
}

impl RecordService {
    pub fn new(
        store: Arc<dyn SchemaStore>,
        engine: Arc<GenerationEngine>,
        max_page_size: u64,
    ) -> Self {
        Self {
            store,
            engine,
            max_page_size,
        }
    }

    /// Normalize raw `page`/`count` query values against the page size cap.
    pub fn page_request(&self, page: Option<&str>, count: Option<&str>) -> PageRequest {
        PageRequest::from_query(page, count, self.max_page_size)
    }

    pub async fn list(&self, endpoint_id: &str, request: PageRequest) -> ApiResult<PageResponse> {
        let schema = self.resolve(endpoint_id).await?;
        let page = self.engine.generate_page(&schema.fields, request);
        info!(
            event = "records_listed",
            endpoint_id = %endpoint_id,
            page = request.page,
            count = request.count
        );
        Ok(page)
    }

    /// Echo `payload` as if it were stored: random `id` first, then the
    /// payload (which may override `id`), then `createdAt`.
    pub async fn create(&self, endpoint_id: &str, payload: Payload) -> ApiResult<Payload> {
        self.resolve(endpoint_id).await?;

        let mut record = Payload::new();
        record.insert("id".to_string(), Value::from(self.engine.echo_id()));
        record.extend(payload);
        record.insert("createdAt".to_string(), Value::String(timestamp_now()));

        info!(event = "record_create_simulated", endpoint_id = %endpoint_id);
        Ok(record)
    }

    pub async fn update(&self, endpoint_id: &str, payload: Payload) -> ApiResult<Payload> {
        self.resolve(endpoint_id).await?;

        let mut record = payload;
        record.insert("updatedAt".to_string(), Value::String(timestamp_now()));

        info!(event = "record_update_simulated", endpoint_id = %endpoint_id);
        Ok(record)
    }

    pub async fn delete(&self, endpoint_id: &str) -> ApiResult<Value> {
        self.resolve(endpoint_id).await?;
        info!(event = "record_delete_simulated", endpoint_id = %endpoint_id);
        Ok(json!({ "message": "Resource deleted successfully" }))
    }

    async fn resolve(&self, endpoint_id: &str) -> ApiResult<ApiSchema> {
        self.store
            .find_by_endpoint(endpoint_id)
            .await
            .map_err(|err| ApiError::Internal(err.to_string()))?
            .ok_or_else(ApiError::api_not_found)
    }
}

/// Parse a record payload. Only JSON objects are accepted.
pub fn parse_payload(body: &[u8]) -> ApiResult<Payload> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(payload)) => Ok(payload),
        _ => Err(ApiError::invalid_body()),
    }
}

fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
