//! Normalization of nested execution results into a generic tree.
//!
//! Records and mappings become string-keyed maps, lists keep their order and
//! every scalar becomes text. The conversion is total: any [`Value`] yields a
//! [`Flattened`] tree of the same shape.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::quote::unquote;
use crate::types::Value;

/// Generic tree produced by [`flatten`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flattened {
    Text(String),
    List(Vec<Flattened>),
    Map(BTreeMap<String, Flattened>),
}

impl Flattened {
    /// Look up a key when this node is a map
    pub fn get(&self, key: &str) -> Option<&Flattened> {
        match self {
            Flattened::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Flattened::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Flattened]> {
        match self {
            Flattened::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Flattened>> {
        match self {
            Flattened::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Indented JSON rendering of the tree
    pub fn to_json_pretty(&self) -> String {
        // A tree of strings, lists and string-keyed maps always serializes.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Flatten a self-describing value into a [`Flattened`] tree.
pub fn flatten(value: &Value) -> Flattened {
    match value {
        Value::Record { fields, .. } => Flattened::Map(
            fields
                .iter()
                .map(|field| (field.name.clone(), flatten(&field.value)))
                .collect(),
        ),
        Value::Mapping(pairs) => Flattened::Map(
            pairs
                .iter()
                .map(|(key, value)| (key.to_string(), flatten(value)))
                .collect(),
        ),
        Value::List(items) => Flattened::List(items.iter().map(flatten).collect()),
        Value::Scalar(text) => Flattened::Text(unquote(text).unwrap_or_else(|| text.clone())),
    }
}
