//! Opaque [Swagger Schema Object][schema] nodes.
//!
//! Schema nodes are never inspected while merging, definitions with the same name are assumed
//! to describe the same type. The node is kept exactly as it was read.
//!
//! [schema]: https://swagger.io/specification/v2/#schema-object
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON schema node as found in `definitions`, body parameters and responses.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
#[serde(transparent)]
pub struct Schema(Value);

impl Schema {
    /// Wrap an arbitrary JSON node as [`Schema`].
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Construct a schema node that only holds a `$ref` to a named definition.
    pub fn from_definition_name<S: AsRef<str>>(name: S) -> Self {
        Self(serde_json::json!({ "$ref": format!("#/definitions/{}", name.as_ref()) }))
    }

    /// Return the `$ref` location if this node is a reference.
    pub fn reference(&self) -> Option<&str> {
        self.0.get("$ref").and_then(Value::as_str)
    }

    /// Unwrap into the underlying JSON node.
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl Deref for Schema {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
