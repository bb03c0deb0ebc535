//! Argument binding for MCP tool calls
//!
//! Hosts hand tools an untyped JSON object. [`bind`] checks it against the
//! tool's declared [`ArgumentSpec`]s, applies defaults and drops anything
//! undeclared; [`decode`] then turns the result into the tool's request
//! struct. Both are pure and never touch the network.

use crate::error::ToolError;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

/// JSON type an argument must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// A JSON string
    String,
    /// A non-negative whole number
    Integer,
    /// `true` or `false`
    Boolean,
}

impl ArgumentKind {
    /// JSON Schema type name
    pub fn schema_type(&self) -> &'static str {
        match self {
            ArgumentKind::String => "string",
            ArgumentKind::Integer => "integer",
            ArgumentKind::Boolean => "boolean",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            ArgumentKind::String => value.is_string(),
            ArgumentKind::Integer => value.as_u64().is_some(),
            ArgumentKind::Boolean => value.is_boolean(),
        }
    }
}

/// Default applied to an optional argument the caller left out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// Default string
    String(&'static str),
    /// Default integer
    Integer(u64),
    /// Default boolean
    Boolean(bool),
}

impl DefaultValue {
    fn to_value(self) -> Value {
        match self {
            DefaultValue::String(s) => Value::String(s.to_string()),
            DefaultValue::Integer(n) => Value::from(n),
            DefaultValue::Boolean(b) => Value::Bool(b),
        }
    }
}

/// Declaration of one tool argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentSpec {
    /// Argument name as it appears in the JSON object
    pub name: &'static str,
    /// Expected JSON type
    pub kind: ArgumentKind,
    /// Whether the caller must supply it
    pub required: bool,
    /// Value used when an optional argument is absent
    pub default: Option<DefaultValue>,
    /// Help text advertised to the host
    pub description: &'static str,
}

impl ArgumentSpec {
    /// Declare a required argument
    pub const fn required(
        name: &'static str,
        kind: ArgumentKind,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            description,
        }
    }

    /// Declare an optional argument
    pub const fn optional(
        name: &'static str,
        kind: ArgumentKind,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            description,
        }
    }

    /// Attach a default value
    pub const fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }
}

/// JSON type name of a value, for error messages
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_u64() => "integer",
        Value::Number(n) if n.is_i64() => "negative integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate raw arguments against `specs`
///
/// Returns a map holding exactly the declared arguments that were supplied
/// or defaulted. `null` counts as absent. Arguments are checked in
/// declaration order and the first failure is returned.
pub fn bind(
    raw: &Map<String, Value>,
    specs: &[ArgumentSpec],
) -> Result<Map<String, Value>, ToolError> {
    let mut bound = Map::new();

    for spec in specs {
        match raw.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    return Err(ToolError::missing_field(spec.name));
                }
                if let Some(default) = spec.default {
                    bound.insert(spec.name.to_string(), default.to_value());
                }
            }
            Some(value) if spec.kind.accepts(value) => {
                bound.insert(spec.name.to_string(), value.clone());
            }
            Some(value) => {
                return Err(ToolError::type_mismatch(
                    spec.name,
                    spec.kind.schema_type(),
                    describe(value),
                ));
            }
        }
    }

    Ok(bound)
}

/// Bind and then deserialize into a typed request
pub fn decode<T: DeserializeOwned>(
    raw: &Map<String, Value>,
    specs: &[ArgumentSpec],
) -> Result<T, ToolError> {
    decode_bound(bind(raw, specs)?)
}

/// Deserialize arguments that already went through [`bind`]
///
/// A failure here means the request type disagrees with its declared
/// arguments, so it is reported as `internal`.
pub fn decode_bound<T: DeserializeOwned>(bound: Map<String, Value>) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(bound))
        .map_err(|e| ToolError::internal(format!("Bound arguments did not decode: {e}")))
}

/// JSON Schema for the MCP `tools/list` response
pub fn input_schema(specs: &[ArgumentSpec]) -> Map<String, Value> {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for spec in specs {
        let mut property = json!({
            "type": spec.kind.schema_type(),
            "description": spec.description,
        });
        if spec.kind == ArgumentKind::Integer {
            property["minimum"] = json!(0);
        }
        if let Some(default) = spec.default {
            property["default"] = default.to_value();
        }
        properties.insert(spec.name.to_string(), property);

        if spec.required {
            required.push(Value::String(spec.name.to_string()));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    schema.insert("required".to_string(), Value::Array(required));
    schema
}
