//! Tests for the serialized forms of descriptors and configuration.
//!
//! Front ends load endpoints and type definitions from JSON manifests and
//! configuration from TOML, so these formats are part of the public API.

use serde_json::json;
use typesync_core::{
    AliasNaming, Endpoint, GenerationConfig, HttpMethod, LiteralValue, PathSegment, RawType,
    TypeDef, TypeDefinitions, Visibility,
};

#[test]
fn test_endpoint_defaults_from_minimal_json() {
    let endpoint: Endpoint = serde_json::from_value(json!({
        "endpoint": "main",
        "path": "/"
    }))
    .unwrap();

    assert_eq!(endpoint.methods, vec![HttpMethod::Get]);
    assert!(endpoint.arguments.is_empty());
    assert!(endpoint.body.is_none());
    assert!(endpoint.returns.is_none());
    assert!(!endpoint.meta.ignore);
    assert_eq!(endpoint.meta.visibility, Visibility::Public);
}

#[test]
fn test_full_endpoint_json() {
    let endpoint: Endpoint = serde_json::from_value(json!({
        "endpoint": "items.update",
        "path": "/items/<string(length=8):code>/<int:rev>",
        "methods": ["PUT", "PATCH", "PUT"],
        "arguments": {
            "code": {},
            "rev": { "converter": "int" }
        },
        "body": { "type": { "kind": "named", "name": "ItemPatch" } },
        "returns": { "kind": "optional", "args": [{ "kind": "named", "name": "Item" }] },
        "meta": { "name": "patch_item", "visibility": "internal" }
    }))
    .unwrap();

    assert_eq!(endpoint.derived_name().as_str(), "patch_item");
    assert_eq!(
        endpoint.canonical_methods(),
        vec![HttpMethod::Put, HttpMethod::Patch]
    );
    assert_eq!(endpoint.arguments.keys().collect::<Vec<_>>(), vec!["code", "rev"]);
    let body = endpoint.body.as_ref().unwrap();
    assert_eq!(body.key, "json");
    assert_eq!(body.ty, RawType::named("ItemPatch"));
    assert_eq!(endpoint.meta.visibility, Visibility::Internal);

    let pattern = endpoint.pattern().unwrap();
    assert_eq!(
        pattern.segments()[1],
        PathSegment::Placeholder {
            name: "code".to_string(),
            converter: Some("string".to_string()),
        }
    );
    assert_eq!(pattern.converter_for("rev"), Some("int"));
}

#[test]
fn test_type_definitions_keep_declaration_order() {
    let definitions: TypeDefinitions = serde_json::from_value(json!({
        "Zebra": { "kind": "enum", "members": ["a", 1, true, null] },
        "Apple": {
            "kind": "typed_dict",
            "fields": [
                { "name": "id", "type": { "kind": "int" } },
                { "name": "note", "type": { "kind": "str" }, "required": false }
            ]
        },
        "Pair": {
            "kind": "alias",
            "params": ["T"],
            "value": { "kind": "tuple", "args": [{ "kind": "type_var", "name": "T" }, { "kind": "type_var", "name": "T" }] }
        }
    }))
    .unwrap();

    let names: Vec<&String> = definitions.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["Zebra", "Apple", "Pair"]);

    let Some(TypeDef::Enum { members }) = definitions.get("Zebra") else {
        panic!("expected enum");
    };
    assert_eq!(
        members,
        &vec![
            LiteralValue::str("a"),
            LiteralValue::Int(1),
            LiteralValue::Bool(true),
            LiteralValue::Null,
        ]
    );

    let Some(TypeDef::TypedDict { fields, .. }) = definitions.get("Apple") else {
        panic!("expected typed dict");
    };
    assert!(fields[0].required);
    assert!(!fields[1].required);

    let pair = definitions.get("Pair").unwrap();
    let bindings = pair.bind(&[RawType::Str]);
    let TypeDef::Alias { value, .. } = pair else {
        panic!("expected alias");
    };
    assert_eq!(value.substitute(&bindings).to_string(), "tuple[str, str]");
}

#[test]
fn test_raw_type_display_is_identity() {
    let raw = RawType::generic(
        "Tree",
        vec![RawType::dict(RawType::Str, RawType::optional(RawType::Int))],
    );
    assert_eq!(raw.to_string(), "Tree[dict[str, Optional[int]]]");

    let round_trip: RawType = serde_json::from_value(serde_json::to_value(&raw).unwrap()).unwrap();
    assert_eq!(round_trip, raw);
}

#[test]
fn test_config_from_toml() {
    let config: GenerationConfig = toml::from_str(
        r#"
        strict = true
        requests_module = "client.ts"
        base_url = "https://api.example.com"

        [alias_naming]
        strategy = "sequential"
        prefix = "Rec"

        [naming]
        function = "{{r_cc}}{{m_pc}}"
        "#,
    )
    .unwrap();

    assert!(config.strict);
    assert_eq!(config.types_module, "types.ts");
    assert_eq!(config.requests_module, "client.ts");
    assert_eq!(
        config.alias_naming,
        AliasNaming::Sequential {
            prefix: "Rec".to_string()
        }
    );
    assert_eq!(config.naming.args_type, "{{pc}}ArgsType");
    assert_eq!(config.naming.function, "{{r_cc}}{{m_pc}}");
    assert!(config.skip_unannotated);
    assert!(config.validate().is_ok());
}

#[test]
fn test_sequential_prefix_defaults() {
    let config: GenerationConfig = toml::from_str(
        r#"
        [alias_naming]
        strategy = "sequential"
        "#,
    )
    .unwrap();
    assert_eq!(
        config.alias_naming,
        AliasNaming::Sequential {
            prefix: "Alias".to_string()
        }
    );
}

#[test]
fn test_empty_toml_is_default() {
    let config: GenerationConfig = toml::from_str("").unwrap();
    assert_eq!(config, GenerationConfig::default());
}
