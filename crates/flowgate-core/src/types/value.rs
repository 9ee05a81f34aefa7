use std::fmt;

use crate::error::CoreError;
use crate::fixed::format_ufix64;
use crate::id::Address;
use crate::quote::quote;

/// A named field of a composite value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Field {
            name: name.into(),
            value,
        }
    }
}

/// A self-describing value returned by script execution or carried by an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Composite with named fields (struct, resource, event, contract)
    Record { type_id: String, fields: Vec<Field> },
    /// Key/value pairs in source order
    Mapping(Vec<(Value, Value)>),
    /// Ordered elements
    List(Vec<Value>),
    /// Any other value, held in its textual representation
    Scalar(String),
}

impl Value {
    /// The textual representation of an absent optional
    pub const NIL: &'static str = "nil";

    pub fn record(type_id: impl Into<String>, fields: Vec<Field>) -> Self {
        Value::Record {
            type_id: type_id.into(),
            fields,
        }
    }

    pub fn scalar(text: impl Into<String>) -> Self {
        Value::Scalar(text.into())
    }

    /// A string scalar, held in quoted form
    pub fn string(s: &str) -> Self {
        Value::Scalar(quote(s))
    }

    /// A fixed-point scalar from a minor-unit amount
    pub fn ufix64(minor_units: u64) -> Self {
        Value::Scalar(format_ufix64(minor_units))
    }

    pub fn address(address: &Address) -> Self {
        Value::Scalar(address.to_prefixed_hex())
    }

    pub fn nil() -> Self {
        Value::Scalar(Self::NIL.to_string())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Scalar(text) if text == Self::NIL)
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// Look up a field of a record by name
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record { fields, .. } => fields
                .iter()
                .find(|field| field.name == name)
                .map(|field| &field.value),
            _ => None,
        }
    }

    /// Decode a value from the chain's JSON encoding (`{"type": .., "value": ..}`).
    pub fn from_json_cdc(json: &serde_json::Value) -> Result<Self, CoreError> {
        let kind = json
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| CoreError::ValueEncoding(format!("missing type tag in {}", json)))?;
        let inner = json.get("value");

        match kind {
            "Struct" | "Resource" | "Event" | "Contract" | "Enum" => {
                let inner = required(inner, kind)?;
                let type_id = inner
                    .get("id")
                    .and_then(|id| id.as_str())
                    .ok_or_else(|| CoreError::ValueEncoding(format!("{} without id", kind)))?;
                let fields = inner
                    .get("fields")
                    .and_then(|f| f.as_array())
                    .ok_or_else(|| CoreError::ValueEncoding(format!("{} without fields", kind)))?
                    .iter()
                    .map(|field| {
                        let name = field.get("name").and_then(|n| n.as_str()).ok_or_else(|| {
                            CoreError::ValueEncoding(format!("unnamed field in {}", type_id))
                        })?;
                        let value = Value::from_json_cdc(required(field.get("value"), name)?)?;
                        Ok(Field::new(name, value))
                    })
                    .collect::<Result<Vec<_>, CoreError>>()?;
                Ok(Value::record(type_id, fields))
            }
            "Dictionary" => {
                let pairs = required(inner, kind)?
                    .as_array()
                    .ok_or_else(|| CoreError::ValueEncoding("Dictionary is not a list".into()))?
                    .iter()
                    .map(|pair| {
                        let key = Value::from_json_cdc(required(pair.get("key"), "key")?)?;
                        let value = Value::from_json_cdc(required(pair.get("value"), "value")?)?;
                        Ok((key, value))
                    })
                    .collect::<Result<Vec<_>, CoreError>>()?;
                Ok(Value::Mapping(pairs))
            }
            "Array" => {
                let items = required(inner, kind)?
                    .as_array()
                    .ok_or_else(|| CoreError::ValueEncoding("Array is not a list".into()))?
                    .iter()
                    .map(Value::from_json_cdc)
                    .collect::<Result<Vec<_>, CoreError>>()?;
                Ok(Value::List(items))
            }
            "Optional" => match inner {
                None | Some(serde_json::Value::Null) => Ok(Value::nil()),
                Some(value) => Value::from_json_cdc(value),
            },
            "Void" => Ok(Value::scalar("()")),
            "String" | "Character" => {
                let text = required(inner, kind)?
                    .as_str()
                    .ok_or_else(|| CoreError::ValueEncoding(format!("{} is not text", kind)))?;
                Ok(Value::string(text))
            }
            "Path" => {
                let inner = required(inner, kind)?;
                let domain = inner.get("domain").and_then(|d| d.as_str()).unwrap_or_default();
                let identifier = inner
                    .get("identifier")
                    .and_then(|i| i.as_str())
                    .unwrap_or_default();
                Ok(Value::scalar(format!("/{}/{}", domain, identifier)))
            }
            "Type" => {
                let static_type = inner.and_then(|i| i.get("staticType"));
                let text = match static_type {
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(other) => other
                        .get("typeID")
                        .and_then(|id| id.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| other.to_string()),
                    None => String::new(),
                };
                Ok(Value::scalar(format!("Type<{}>()", text)))
            }
            _ => match inner {
                Some(serde_json::Value::String(s)) => Ok(Value::scalar(s.clone())),
                Some(other) => Ok(Value::scalar(other.to_string())),
                None => Err(CoreError::ValueEncoding(format!("{} without value", kind))),
            },
        }
    }
}

fn required<'a>(
    value: Option<&'a serde_json::Value>,
    context: &str,
) -> Result<&'a serde_json::Value, CoreError> {
    value.ok_or_else(|| CoreError::ValueEncoding(format!("missing value for {}", context)))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(text) => write!(f, "{}", text),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Mapping(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Record { type_id, fields } => {
                write!(f, "{}(", type_id)?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.value)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_scalars() {
        let v = Value::from_json_cdc(&json!({"type": "UFix64", "value": "1.00000000"})).unwrap();
        assert_eq!(v, Value::scalar("1.00000000"));

        let v = Value::from_json_cdc(&json!({"type": "String", "value": "hi \"there\""})).unwrap();
        assert_eq!(v, Value::scalar("\"hi \\\"there\\\"\""));

        let v = Value::from_json_cdc(&json!({"type": "Bool", "value": true})).unwrap();
        assert_eq!(v, Value::scalar("true"));

        let v = Value::from_json_cdc(&json!({"type": "Optional", "value": null})).unwrap();
        assert!(v.is_nil());

        let v = Value::from_json_cdc(&json!({
            "type": "Path",
            "value": {"domain": "public", "identifier": "flowTokenBalance"}
        }))
        .unwrap();
        assert_eq!(v, Value::scalar("/public/flowTokenBalance"));
    }

    #[test]
    fn test_decode_composites() {
        let json = json!({
            "type": "Event",
            "value": {
                "id": "A.0ae53cb6e3f42a79.FlowToken.TokensDeposited",
                "fields": [
                    {"name": "amount", "value": {"type": "UFix64", "value": "10.00000000"}},
                    {"name": "to", "value": {"type": "Optional", "value": {"type": "Address", "value": "0x01cf0e2f2f715450"}}}
                ]
            }
        });
        let v = Value::from_json_cdc(&json).unwrap();
        assert_eq!(v.field("amount"), Some(&Value::scalar("10.00000000")));
        assert_eq!(v.field("to"), Some(&Value::scalar("0x01cf0e2f2f715450")));

        let json = json!({
            "type": "Dictionary",
            "value": [
                {"key": {"type": "String", "value": "a"}, "value": {"type": "Array", "value": [
                    {"type": "Int", "value": "1"}, {"type": "Int", "value": "2"}
                ]}}
            ]
        });
        let v = Value::from_json_cdc(&json).unwrap();
        assert_eq!(
            v,
            Value::Mapping(vec![(
                Value::string("a"),
                Value::List(vec![Value::scalar("1"), Value::scalar("2")])
            )])
        );
    }

    #[test]
    fn test_decode_rejects_missing_tag() {
        assert!(Value::from_json_cdc(&json!({"value": "1"})).is_err());
        assert!(Value::from_json_cdc(&json!({"type": "Array", "value": 3})).is_err());
    }

    #[test]
    fn test_display() {
        let v = Value::record(
            "A.01.Foo.Bar",
            vec![
                Field::new("x", Value::scalar("1")),
                Field::new("y", Value::List(vec![Value::string("a"), Value::nil()])),
            ],
        );
        assert_eq!(v.to_string(), "A.01.Foo.Bar(x: 1, y: [\"a\", nil])");

        let m = Value::Mapping(vec![(Value::string("k"), Value::scalar("2"))]);
        assert_eq!(m.to_string(), "{\"k\": 2}");
    }
}
