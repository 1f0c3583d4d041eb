use axum::Json;
use axum::Router;
use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::IntoResponse;
use axum::routing::get;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use fakeapi_core::ApiSchema;
use fakeapi_generate::PageResponse;

use crate::error::{ApiError, ApiResult};
use crate::records::{Payload, parse_payload};
use crate::schemas::{CreateSchemaRequest, UpdateSchemaRequest};
use crate::state::AppState;

/// Build the HTTP router. Schema management is matched before the
/// `{endpointId}` catch-all.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/apis",
            get(list_schemas)
                .post(create_schema)
                .put(update_schema)
                .delete(delete_schema)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/:endpoint_id",
            get(list_records)
                .post(create_record)
                .put(update_record)
                .delete(delete_record)
                .fallback(method_not_allowed),
        )
        .fallback(route_not_found)
        .with_state(state)
}

/// Query string extractor whose rejections are reported as [`ApiError`].
struct QueryParams<T>(T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[derive(Debug, Default, Deserialize)]
struct SchemaQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
    #[serde(rename = "apiId")]
    api_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    page: Option<String>,
    count: Option<String>,
}

async fn list_schemas(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SchemaQuery>,
) -> ApiResult<Json<Vec<ApiSchema>>> {
    let schemas = state.schemas.list(query.user_id.as_deref()).await?;
    Ok(Json(schemas))
}

async fn create_schema(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let request: CreateSchemaRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::invalid_body())?;
    let schema = state.schemas.create(request).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": schema.id }))))
}

async fn update_schema(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SchemaQuery>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let request: UpdateSchemaRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::invalid_body())?;
    state
        .schemas
        .update(query.api_id.as_deref(), request)
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn delete_schema(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SchemaQuery>,
) -> ApiResult<impl IntoResponse> {
    state
        .schemas
        .delete(query.user_id.as_deref(), query.api_id.as_deref())
        .await?;
    Ok(Json(json!({ "success": true })))
}

async fn list_records(
    State(state): State<AppState>,
    Path(endpoint_id): Path<String>,
    QueryParams(query): QueryParams<PageQuery>,
) -> ApiResult<Json<PageResponse>> {
    let request = state
        .records
        .page_request(query.page.as_deref(), query.count.as_deref());
    let page = state.records.list(&endpoint_id, request).await?;
    Ok(Json(page))
}

async fn create_record(
    State(state): State<AppState>,
    Path(endpoint_id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let payload = parse_payload(&body)?;
    let record = state.records.create(&endpoint_id, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_record(
    State(state): State<AppState>,
    Path(endpoint_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Payload>> {
    let payload = parse_payload(&body)?;
    let record = state.records.update(&endpoint_id, payload).await?;
    Ok(Json(record))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(endpoint_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let ack = state.records.delete(&endpoint_id).await?;
    Ok(Json(ack))
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
