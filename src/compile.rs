//! FieldTree → JSON Schema.
//!
//! The emitted dialect is closed: `{"type":"object","properties":{..}}` with
//! `{"type":"string"}` / `{"type":"number"}` leaves and nested objects. No
//! `required`, formats or defaults.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::field::{FieldKind, FieldNode, FieldTree};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    String,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    #[default]
    Object,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Schema {
    Object(SchemaObject),
    Scalar {
        #[serde(rename = "type")]
        ty: ScalarType,
    },
}

/// `{"type":"object","properties":{..}}`; properties keep first-insertion
/// order, a repeated key keeps its slot but takes the later definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaObject {
    #[serde(rename = "type")]
    pub ty: ObjectType,
    pub properties: IndexMap<String, Schema>,
}

// ————————————————————————————————————————————————————————————————————————————
// COMPILE
// ————————————————————————————————————————————————————————————————————————————

pub fn compile(tree: &FieldTree) -> SchemaObject {
    compile_fields(&tree.fields)
}

pub fn compile_fields(nodes: &[FieldNode]) -> SchemaObject {
    let mut out = SchemaObject::default();
    for node in nodes {
        // duplicate keys: last write wins
        out.properties.insert(node.key.clone(), compile_node(node));
    }
    out
}

fn compile_node(node: &FieldNode) -> Schema {
    match node.kind {
        FieldKind::String => Schema::Scalar { ty: ScalarType::String },
        FieldKind::Number => Schema::Scalar { ty: ScalarType::Number },
        FieldKind::Nested => Schema::Object(compile_fields(&node.children)),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// JSON VIEW
// ————————————————————————————————————————————————————————————————————————————

impl SchemaObject {
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
    /// Two-space indented JSON, properties in insertion order.
    pub fn to_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
    pub fn property(&self, key: &str) -> Option<&Schema> {
        self.properties.get(key)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
