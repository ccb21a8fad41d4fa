use super::*;

const CEDAR_TEXT: &str = r#"
@doc("shared types")
type Tags = Set<String>;

namespace PhotoApp {
    type Context = { ip: ipaddr, authenticated: Bool, "source app"?: String };

    @doc("a person")
    entity User in [Group] {
        name: String,
        labels: Tags,
        manager?: User,
    };
    entity Group;
    entity Album in [Album];
    entity Photo in [Album] { owner: User, size: Long };

    action read;
    action view, download in [read] appliesTo {
        principal: [User, Group],
        resource: Photo,
        context: Context,
    };
    action "delete album" appliesTo { principal: User, resource: Album };
}

entity Tenant;
action administer in [PhotoApp::Action::"read"] appliesTo {
    principal: PhotoApp::User,
    resource: Tenant,
};
"#;

const JSON_TEXT: &str = r#"{
    "": {
        "commonTypes": {
            "Tags": {
                "type": "Set",
                "element": { "type": "String" },
                "annotations": { "doc": "shared types" }
            }
        },
        "entityTypes": { "Tenant": {} },
        "actions": {
            "administer": {
                "memberOf": [{ "id": "read", "type": "PhotoApp::Action" }],
                "appliesTo": {
                    "principalTypes": ["PhotoApp::User"],
                    "resourceTypes": ["Tenant"]
                }
            }
        }
    },
    "PhotoApp": {
        "commonTypes": {
            "Context": {
                "type": "Record",
                "attributes": {
                    "ip": { "type": "Extension", "name": "ipaddr" },
                    "authenticated": { "type": "Boolean" },
                    "source app": { "type": "String", "required": false }
                }
            }
        },
        "entityTypes": {
            "User": {
                "memberOfTypes": ["Group"],
                "shape": {
                    "type": "Record",
                    "attributes": {
                        "name": { "type": "String" },
                        "labels": { "type": "Tags" },
                        "manager": { "type": "Entity", "name": "User", "required": false }
                    }
                },
                "annotations": { "doc": "a person" }
            },
            "Group": {},
            "Album": { "memberOfTypes": ["Album"] },
            "Photo": {
                "memberOfTypes": ["Album"],
                "shape": {
                    "type": "Record",
                    "attributes": {
                        "owner": { "type": "Entity", "name": "User" },
                        "size": { "type": "Long" }
                    }
                }
            }
        },
        "actions": {
            "read": {},
            "view": {
                "memberOf": [{ "id": "read" }],
                "appliesTo": {
                    "principalTypes": ["User", "Group"],
                    "resourceTypes": ["Photo"],
                    "context": { "type": "Context" }
                }
            },
            "download": {
                "memberOf": [{ "id": "read" }],
                "appliesTo": {
                    "principalTypes": ["User", "Group"],
                    "resourceTypes": ["Photo"],
                    "context": { "type": "Context" }
                }
            },
            "delete album": {
                "appliesTo": { "principalTypes": ["User"], "resourceTypes": ["Album"] }
            }
        }
    }
}"#;

/// Every declaration with its resolved references. Attribute types are left
/// out; each format spells those its own way.
fn declarations(schema: &Schema) -> Vec<String> {
    let ir = schema.ir().unwrap();
    let mut lines = Vec::new();
    for namespace in ir.namespaces() {
        let common_types: Vec<_> = namespace.common_types().iter().map(|c| c.name()).collect();
        lines.push(format!(
            "namespace {:?} {}",
            namespace.name().to_string(),
            strings(&common_types).join(",")
        ));
    }
    for decl in ir.entity_type_decls() {
        let parents = ir.entity_type_names(decl.parents().iter().copied());
        lines.push(format!(
            "entity {} in {:?} shape={} {:?}",
            decl.name(),
            strings(&parents),
            decl.shape().is_some(),
            decl.annotations()
        ));
    }
    for decl in ir.action_decls() {
        let groups = ir.action_uids(decl.member_of().iter().copied());
        let applies_to = decl.applies_to().map(|applies_to| {
            (
                strings(applies_to.principal_types()),
                strings(applies_to.resource_types()),
                applies_to.context().is_some(),
            )
        });
        lines.push(format!("action {} in {:?} {applies_to:?}", decl.uid(), strings(&groups)));
    }
    lines
}

#[test]
fn test_both_formats_yield_the_same_declarations() {
    let json = schema(SchemaFormat::Json, JSON_TEXT);
    let cedar = schema(SchemaFormat::Cedar, CEDAR_TEXT);
    assert_eq!(declarations(&json), declarations(&cedar));
    assert_eq!(json.summary().unwrap(), cedar.summary().unwrap());
    assert_eq!(json.common_types().unwrap(), cedar.common_types().unwrap());
}

#[test]
fn test_queries_agree_across_formats() {
    let json = schema(SchemaFormat::Json, JSON_TEXT);
    let cedar = schema(SchemaFormat::Cedar, CEDAR_TEXT);
    assert_eq!(json.principals().unwrap(), cedar.principals().unwrap());
    assert_eq!(json.resources().unwrap(), cedar.resources().unwrap());
    assert_eq!(json.action_groups().unwrap(), cedar.action_groups().unwrap());

    let read: EntityUid = r#"PhotoApp::Action::"read""#.parse().unwrap();
    assert_eq!(
        sorted(&cedar.action_group_members(&read).unwrap()),
        vec![
            r#"Action::"administer""#,
            r#"PhotoApp::Action::"download""#,
            r#"PhotoApp::Action::"view""#,
        ]
    );
    assert_eq!(
        strings(&cedar.entity_type_ancestors(&type_name("PhotoApp::Photo")).unwrap()),
        vec!["PhotoApp::Album"]
    );
}

#[parameterized(
    json = { SchemaFormat::Json, JSON_TEXT },
    cedar = { SchemaFormat::Cedar, CEDAR_TEXT },
)]
fn test_json_export_round_trips(format: SchemaFormat, text: &str) {
    let original = schema(format, text);
    let exported = original.to_json_string().unwrap();
    let reparsed = schema(SchemaFormat::Json, &exported);
    assert_eq!(declarations(&original), declarations(&reparsed));
    assert_eq!(original.summary().unwrap(), reparsed.summary().unwrap());
}

#[test]
fn test_json_export_keeps_action_references() {
    let value = schema(SchemaFormat::Cedar, CEDAR_TEXT).to_json_value().unwrap();
    assert_eq!(
        value[""]["actions"]["administer"]["memberOf"],
        serde_json::json!([{ "id": "read", "type": "PhotoApp::Action" }])
    );
    assert_eq!(
        value["PhotoApp"]["actions"]["view"]["memberOf"],
        serde_json::json!([{ "id": "read" }])
    );
    let namespaces: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(namespaces, vec!["", "PhotoApp"]);
}

#[test]
fn test_attribute_types_are_carried_through() {
    let json = schema(SchemaFormat::Json, JSON_TEXT);
    let ir = json.ir().unwrap();
    let photo = ir.lookup_entity_type(&type_name("PhotoApp::Photo")).unwrap();
    assert_eq!(
        photo.shape().unwrap()["attributes"]["size"],
        serde_json::json!({ "type": "Long" })
    );
    let view = ir
        .lookup_action(&r#"PhotoApp::Action::"view""#.parse().unwrap())
        .unwrap();
    assert_eq!(
        view.applies_to().unwrap().context(),
        Some(&serde_json::json!({ "type": "Context" }))
    );
}
