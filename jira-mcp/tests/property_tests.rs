use jira_mcp::mcp::binder::{bind, ArgumentKind, ArgumentSpec, DefaultValue};
use jira_mcp::ToolErrorKind;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

const SPECS: &[ArgumentSpec] = &[
    ArgumentSpec::required("issue_key", ArgumentKind::String, "key"),
    ArgumentSpec::optional("max_results", ArgumentKind::Integer, "limit")
        .with_default(DefaultValue::Integer(50)),
    ArgumentSpec::optional("parent", ArgumentKind::String, "parent"),
];

fn json_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(|f| json!(f)),
        ".*".prop_map(Value::String),
        prop::collection::vec(any::<u8>().prop_map(|n| json!(n)), 0..3).prop_map(Value::Array),
    ]
}

fn raw_arguments() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(
        prop_oneof![
            Just("issue_key".to_string()),
            Just("max_results".to_string()),
            Just("parent".to_string()),
            "[a-z_]{1,12}",
        ],
        json_value(),
        0..6,
    )
    .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn test_bound_keys_are_always_declared(raw in raw_arguments()) {
        if let Ok(bound) = bind(&raw, SPECS) {
            for key in bound.keys() {
                prop_assert!(SPECS.iter().any(|spec| spec.name == key));
            }
        }
    }

    #[test]
    fn test_missing_key_always_reported(raw in raw_arguments()) {
        let key_present = matches!(raw.get("issue_key"), Some(v) if !v.is_null());
        let result = bind(&raw, SPECS);
        if !key_present {
            let error = result.unwrap_err();
            prop_assert_eq!(error.kind, ToolErrorKind::MissingField);
            prop_assert_eq!(error.field.as_deref(), Some("issue_key"));
        }
    }

    #[test]
    fn test_successful_bind_has_correct_types(raw in raw_arguments()) {
        if let Ok(bound) = bind(&raw, SPECS) {
            prop_assert!(bound["issue_key"].is_string());
            prop_assert!(bound["max_results"].as_u64().is_some());
            if let Some(parent) = bound.get("parent") {
                prop_assert!(parent.is_string());
            }
        }
    }

    #[test]
    fn test_binding_is_deterministic(raw in raw_arguments()) {
        prop_assert_eq!(bind(&raw, SPECS), bind(&raw, SPECS));
    }

    #[test]
    fn test_supplied_integer_is_kept(key in "[A-Z]{2,5}-[0-9]{1,4}", limit in 0u64..10_000) {
        let mut raw = Map::new();
        raw.insert("issue_key".to_string(), json!(key));
        raw.insert("max_results".to_string(), json!(limit));

        let bound = bind(&raw, SPECS).unwrap();
        prop_assert_eq!(bound["max_results"].as_u64(), Some(limit));
        prop_assert_eq!(bound["issue_key"].as_str(), Some(key.as_str()));
    }

    #[test]
    fn test_negative_integer_is_type_mismatch(limit in i64::MIN..0) {
        let mut raw = Map::new();
        raw.insert("issue_key".to_string(), json!("PROJ-1"));
        raw.insert("max_results".to_string(), json!(limit));

        let error = bind(&raw, SPECS).unwrap_err();
        prop_assert_eq!(error.kind, ToolErrorKind::TypeMismatch);
        prop_assert_eq!(error.field.as_deref(), Some("max_results"));
    }
}
