use std::collections::BTreeSet;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use fakeapi_core::Plan;
use fakeapi_generate::{GenerationEngine, RandomSource};
use fakeapi_server::{AppState, ServerLimits, router};
use fakeapi_store::{InMemorySchemaStore, SchemaStore};

struct TestApp {
    router: Router,
    store: Arc<InMemorySchemaStore>,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(InMemorySchemaStore::new());
        let engine = Arc::new(GenerationEngine::new(RandomSource::seeded(7)));
        let shared: Arc<dyn SchemaStore> = store.clone();
        let state = AppState::new(shared, engine, ServerLimits::default());
        Self {
            router: router(state),
            store,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, json)
    }

    async fn send_json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(method, uri, Some(&body.to_string())).await
    }

    async fn create_schema(&self, user_id: &str, name: &str, fields: Value) -> (StatusCode, Value) {
        self.send_json(
            Method::POST,
            "/api/apis",
            json!({
                "userId": user_id,
                "name": name,
                "endpoint": "http://localhost:3000/api",
                "fields": fields,
            }),
        )
        .await
    }
}

fn keys(record: &Value) -> BTreeSet<String> {
    record
        .as_object()
        .expect("record object")
        .keys()
        .cloned()
        .collect()
}

#[tokio::test]
async fn lists_second_page_of_numbers() {
    let app = TestApp::new();
    let (status, created) = app
        .create_schema("alice", "People Directory", json!([{"name": "age", "type": "number"}]))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].is_string());

    let (status, page) = app
        .send(Method::GET, "/api/people-directory?count=3&page=2", None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let data = page["data"].as_array().expect("data array");
    assert_eq!(data.len(), 3);
    let ids: Vec<_> = data.iter().map(|r| r["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![4, 5, 6]);
    for record in data {
        assert_eq!(
            keys(record),
            BTreeSet::from(["id".to_string(), "age".to_string()])
        );
        let age = record["age"].as_i64().expect("age is int");
        assert!((0..=999).contains(&age));
    }
    assert_eq!(page["meta"], json!({"page": 2, "count": 3, "total": 30}));
}

#[tokio::test]
async fn page_size_is_clamped_and_defaults_apply() {
    let app = TestApp::new();
    app.create_schema("alice", "users", json!([{"name": "email", "type": "email"}]))
        .await;

    let (_, page) = app.send(Method::GET, "/api/users?count=500", None).await;
    assert_eq!(page["data"].as_array().map(Vec::len), Some(100));
    assert_eq!(page["meta"]["count"], 100);

    let (_, page) = app
        .send(Method::GET, "/api/users?count=abc&page=-2", None)
        .await;
    assert_eq!(page["data"].as_array().map(Vec::len), Some(10));
    assert_eq!(page["meta"]["page"], 1);
    assert_eq!(page["data"][0]["id"], 1);

    let (_, page) = app.send(Method::GET, "/api/users?count=0", None).await;
    assert_eq!(page["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn unknown_endpoint_is_not_found_for_every_verb() {
    let app = TestApp::new();
    for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
        let body = if method == Method::POST || method == Method::PUT {
            Some("{}")
        } else {
            None
        };
        let (status, json) = app.send(method.clone(), "/api/nothing-here", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(json, json!({"error": "API not found"}), "{method}");
    }
}

#[tokio::test]
async fn simulated_create_echoes_payload() {
    let app = TestApp::new();
    app.create_schema("alice", "posts", json!([])).await;

    let (status, record) = app
        .send_json(Method::POST, "/api/posts", json!({"title": "hello", "likes": 3}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(record["id"].as_u64().expect("numeric id") < 10_000);
    assert_eq!(record["title"], "hello");
    assert_eq!(record["likes"], 3);
    let created_at = record["createdAt"].as_str().expect("timestamp");
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());

    let (_, record) = app
        .send_json(Method::POST, "/api/posts", json!({"id": "mine"}))
        .await;
    assert_eq!(record["id"], "mine");

    let (_, listing) = app.send(Method::GET, "/api/posts?count=1", None).await;
    assert_eq!(listing["data"], json!([{"id": 1}]));
}

#[tokio::test]
async fn simulated_update_and_delete() {
    let app = TestApp::new();
    app.create_schema("alice", "posts", json!([])).await;

    let (status, record) = app
        .send_json(Method::PUT, "/api/posts", json!({"id": 9, "title": "edited"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["id"], 9);
    assert_eq!(record["title"], "edited");
    assert!(record["updatedAt"].is_string());

    let (status, ack) = app.send(Method::DELETE, "/api/posts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack, json!({"message": "Resource deleted successfully"}));
}

#[tokio::test]
async fn malformed_record_payloads_are_bad_requests() {
    let app = TestApp::new();
    app.create_schema("alice", "posts", json!([])).await;

    for body in ["{not json", "[1, 2]", "\"text\"", ""] {
        let (status, json) = app.send(Method::POST, "/api/posts", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body:?}");
        assert_eq!(json, json!({"error": "Invalid request body"}));

        let (status, _) = app.send(Method::PUT, "/api/posts", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body:?}");
    }

    let (status, _) = app.send(Method::POST, "/api/missing", Some("{oops")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_field_names_are_rejected() {
    let app = TestApp::new();
    let (status, json) = app
        .create_schema(
            "alice",
            "contacts",
            json!([
                {"name": "Email", "type": "email"},
                {"name": "email", "type": "string"}
            ]),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("duplicate"));
    assert_eq!(app.store.count_by_owner("alice").await.unwrap(), 0);
}

#[tokio::test]
async fn create_requires_owner_name_and_endpoint() {
    let app = TestApp::new();
    let (status, json) = app
        .send_json(Method::POST, "/api/apis", json!({"userId": "alice", "name": "x"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "missing required fields"}));

    let (status, _) = app.send(Method::POST, "/api/apis", Some("nope")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reserved_and_taken_endpoints_are_rejected() {
    let app = TestApp::new();
    let (status, _) = app.create_schema("alice", "APIs", json!([])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.create_schema("alice", "!!!", json!([])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.create_schema("alice", "Orders", json!([])).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, json) = app.create_schema("bob", "orders", json!([])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("orders"));
}

#[tokio::test]
async fn free_plan_is_capped_at_two_schemas() {
    let app = TestApp::new();
    assert_eq!(app.create_schema("free", "one", json!([])).await.0, StatusCode::CREATED);
    assert_eq!(app.create_schema("free", "two", json!([])).await.0, StatusCode::CREATED);

    let (status, json) = app.create_schema("free", "three", json!([])).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(json["error"].is_string());
    assert!(
        app.store
            .find_by_endpoint("three")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn concurrent_creates_cannot_exceed_free_plan() {
    let app = TestApp::new();
    let (first, second, third) = tokio::join!(
        app.create_schema("racer", "r1", json!([])),
        app.create_schema("racer", "r2", json!([])),
        app.create_schema("racer", "r3", json!([])),
    );

    let statuses = [first.0, second.0, third.0];
    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let refused = statuses.iter().filter(|s| **s == StatusCode::FORBIDDEN).count();
    assert_eq!((created, refused), (2, 1), "{statuses:?}");
    assert_eq!(app.store.count_by_owner("racer").await.unwrap(), 2);
}

#[tokio::test]
async fn pro_plan_is_not_capped() {
    let app = TestApp::new();
    app.store.set_plan("pro", Plan::Pro).await.unwrap();
    for name in ["a1", "a2", "a3"] {
        let (status, _) = app.create_schema("pro", name, json!([])).await;
        assert_eq!(status, StatusCode::CREATED, "{name}");
    }
}

#[tokio::test]
async fn lists_schemas_by_owner() {
    let app = TestApp::new();
    app.create_schema("alice", "First", json!([{"name": "n", "type": "name"}]))
        .await;
    app.create_schema("bob", "Other", json!([])).await;
    app.create_schema("alice", "Second", json!([])).await;

    let (status, json) = app.send(Method::GET, "/api/apis?userId=alice", None).await;
    assert_eq!(status, StatusCode::OK);
    let endpoints: Vec<_> = json
        .as_array()
        .expect("array")
        .iter()
        .map(|schema| schema["endpointId"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(endpoints, vec!["first", "second"]);
    assert_eq!(json[0]["fields"], json!([{"name": "n", "type": "name"}]));
    assert_eq!(json[0]["userId"], "alice");

    let (status, json) = app.send(Method::GET, "/api/apis", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "userId is required"}));
}

#[tokio::test]
async fn update_schema_renames_endpoint_and_fields() {
    let app = TestApp::new();
    let (_, created) = app.create_schema("alice", "Old Name", json!([])).await;
    let api_id = created["id"].as_str().unwrap().to_string();

    let (status, json) = app
        .send_json(
            Method::PUT,
            &format!("/api/apis?apiId={api_id}"),
            json!({"name": "New Name", "fields": [{"name": "flag", "type": "boolean"}]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": true}));

    let (status, _) = app.send(Method::GET, "/api/old-name", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, page) = app.send(Method::GET, "/api/new-name?count=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page["data"][0]["flag"].is_boolean());

    let stored = app.store.find_by_id(&api_id).await.unwrap().unwrap();
    assert!(stored.updated_at.is_some());
}

#[tokio::test]
async fn update_schema_validates_input() {
    let app = TestApp::new();
    let (_, created) = app.create_schema("alice", "Thing", json!([])).await;
    let api_id = created["id"].as_str().unwrap().to_string();

    let (status, json) = app.send_json(Method::PUT, "/api/apis", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "apiId is required"}));

    let (status, _) = app
        .send_json(Method::PUT, "/api/apis?apiId=missing", json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send_json(
            Method::PUT,
            &format!("/api/apis?apiId={api_id}"),
            json!({"fields": [{"name": "A", "type": "string"}, {"name": "a", "type": "string"}]}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_schema_checks_owner() {
    let app = TestApp::new();
    let (_, created) = app.create_schema("alice", "Gone Soon", json!([])).await;
    let api_id = created["id"].as_str().unwrap().to_string();

    let (status, json) = app
        .send(Method::DELETE, &format!("/api/apis?apiId={api_id}"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({"error": "userId and apiId are required"}));

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/apis?userId=mallory&apiId={api_id}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = app
        .send(
            Method::DELETE,
            &format!("/api/apis?userId=alice&apiId={api_id}"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"success": true}));

    let (status, _) = app.send(Method::GET, "/api/gone-soon", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_routes_answer_with_json() {
    let app = TestApp::new();
    let (status, json) = app.send(Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn duplicate_query_keys_are_json_bad_requests() {
    let app = TestApp::new();
    app.create_schema("alice", "users", json!([])).await;

    let (status, json) = app
        .send(Method::GET, "/api/apis?userId=a&userId=b", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().expect("error message").contains("userId"));

    let (status, json) = app
        .send(Method::GET, "/api/users?count=1&count=2", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().expect("error message").contains("count"));

    let (status, _) = app
        .send(Method::DELETE, "/api/apis?userId=a&apiId=x&apiId=y", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unsupported_methods_answer_with_json() {
    let app = TestApp::new();
    app.create_schema("alice", "users", json!([])).await;

    for uri in ["/api/users", "/api/nothing-here", "/api/apis"] {
        let request = Request::builder()
            .method(Method::PATCH)
            .uri(uri)
            .body(Body::empty())
            .expect("build request");
        let response = app.router.clone().oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        assert_eq!(content_type.as_deref(), Some("application/json"), "{uri}");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(json, json!({"error": "Method not allowed"}), "{uri}");
    }
}
