use std::sync::Arc;

use super::*;
use crate::error::SchemaError;
use yare::parameterized;

mod cross_format;

const PHOTO_SCHEMA_JSON: &str = r#"{
    "": {
        "entityTypes": {
            "User": {},
            "Photo": { "memberOfTypes": ["Album"] },
            "Album": {}
        },
        "actions": {
            "view": {
                "appliesTo": { "principalTypes": ["User"], "resourceTypes": ["Album"] }
            }
        }
    }
}"#;

const PHOTO_SCHEMA_CEDAR: &str = r#"
entity User;
entity Photo in [Album];
entity Album;
action view appliesTo { principal: [User], resource: [Album] };
"#;

const TWO_ACTIONS_CEDAR: &str = r#"
entity User, Admin, Album, Photo;
action edit appliesTo { principal: [User], resource: [Album] };
action view appliesTo { principal: [User, Admin], resource: [Album, Photo] };
"#;

const GROUPED_CEDAR: &str = r#"
entity User, Album;
action specificActionGroup;
action view in [specificActionGroup] appliesTo { principal: User, resource: Album };
"#;

fn schema(format: SchemaFormat, text: &str) -> Schema {
    Schema::parse(format, text).expect("schema should validate")
}

fn action(id: &str) -> EntityUid {
    EntityUid::action(&Namespace::root(), id)
}

fn type_name(name: &str) -> EntityTypeName {
    name.parse().expect("valid entity type name")
}

fn strings<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn sorted<T: ToString>(items: &[T]) -> Vec<String> {
    let mut out = strings(items);
    out.sort();
    out
}

#[parameterized(
    json = { SchemaFormat::Json, PHOTO_SCHEMA_JSON },
    cedar = { SchemaFormat::Cedar, PHOTO_SCHEMA_CEDAR },
)]
fn test_source_accessors(format: SchemaFormat, text: &str) {
    let schema = Schema::new(format, text);
    assert_eq!(schema.format(), format);
    assert_eq!(schema.source_text(), Some(text));
    match format {
        SchemaFormat::Json => assert!(schema.cedar_text().is_none()),
        SchemaFormat::Cedar => assert!(schema.json_text().is_none()),
    }
}

#[test]
fn test_display() {
    let json = Schema::new(SchemaFormat::Json, "{}");
    assert_eq!(json.to_string(), "Schema(schemaJson={})");
    let cedar = Schema::from_cedar_text("entity User;");
    assert_eq!(cedar.to_string(), "Schema(schemaText=entity User;)");
}

#[test]
fn test_from_schema_source() {
    let source: SchemaSource = serde_json::from_value(serde_json::json!({
        "format": "cedar",
        "text": PHOTO_SCHEMA_CEDAR,
    }))
    .unwrap();
    let schema = Schema::from(source);
    assert_eq!(schema.format(), SchemaFormat::Cedar);
    assert_eq!(schema.entity_types().unwrap().len(), 3);
}

#[test]
fn test_from_json_value() {
    let value: serde_json::Value = serde_json::from_str(PHOTO_SCHEMA_JSON).unwrap();
    let schema = Schema::from_json_value(value);
    assert_eq!(
        strings(&schema.entity_types().unwrap()),
        vec!["Album", "Photo", "User"]
    );
}

#[test]
fn test_from_parts_uses_declared_format() {
    let schema = Schema::from_parts(
        SchemaFormat::Cedar,
        Some("not json at all".to_string()),
        Some(PHOTO_SCHEMA_CEDAR.to_string()),
    );
    assert_eq!(schema.actions().unwrap(), vec![action("view")]);
}

#[test]
fn test_from_parts_missing_source() {
    let schema = Schema::from_parts(SchemaFormat::Json, None, Some("entity User;".to_string()));
    assert_eq!(
        schema.entity_types(),
        Err(SchemaQueryError::MissingSource {
            format: SchemaFormat::Json
        })
    );
    assert!(schema.entity_types().unwrap_err().is_precondition());
    assert!(!schema.is_validated());
}
