use chrono::{TimeZone, Utc};
use fakeapi_core::{
    ApiSchema, Error, FieldDefinition, FieldType, Plan, check_quota, validate_endpoint_id,
    validate_fields, validate_schema,
};

fn field(name: &str, tag: &str) -> FieldDefinition {
    FieldDefinition::new(name, FieldType::from_tag(tag))
}

fn schema(fields: Vec<FieldDefinition>) -> ApiSchema {
    ApiSchema {
        id: "api-1".to_string(),
        user_id: "user-1".to_string(),
        name: "Users".to_string(),
        description: String::new(),
        endpoint: "http://localhost:3000/api/users".to_string(),
        endpoint_id: "users".to_string(),
        fields,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: None,
    }
}

#[test]
fn rejects_case_insensitive_duplicate_fields() {
    let fields = vec![field("Email", "email"), field("email", "string")];
    let result = validate_fields(&fields);
    assert!(matches!(result, Err(Error::InvalidSchema(msg)) if msg.contains("duplicate")));
}

#[test]
fn rejects_blank_field_names() {
    let fields = vec![field("age", "number"), field("   ", "string")];
    assert!(matches!(validate_fields(&fields), Err(Error::InvalidSchema(_))));
}

#[test]
fn rejects_reserved_id_field() {
    let fields = vec![field("ID", "uuid")];
    assert!(matches!(validate_fields(&fields), Err(Error::InvalidSchema(_))));
}

#[test]
fn accepts_distinct_fields_and_unknown_types() {
    let fields = vec![
        field("name", "name"),
        field("avatar", "image"),
        field("mood", "emoji"),
    ];
    assert!(validate_fields(&fields).is_ok());
    assert!(validate_schema(&schema(fields)).is_ok());
}

#[test]
fn rejects_empty_and_reserved_endpoint_ids() {
    assert!(validate_endpoint_id("").is_err());
    assert!(validate_endpoint_id("apis").is_err());
    assert!(validate_endpoint_id("apis-v2").is_ok());
}

#[test]
fn schema_requires_owner() {
    let mut schema = schema(Vec::new());
    schema.user_id = " ".to_string();
    assert!(validate_schema(&schema).is_err());
}

#[test]
fn free_plan_is_capped_and_pro_is_not() {
    assert!(check_quota(Plan::Free, 1, 2).is_ok());
    assert_eq!(
        check_quota(Plan::Free, 2, 2),
        Err(Error::QuotaExceeded { limit: 2 })
    );
    assert!(check_quota(Plan::Pro, 2, 2).is_ok());
    assert!(check_quota(Plan::Pro, 50, 2).is_ok());
}
