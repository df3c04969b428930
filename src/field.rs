//! The editable field tree.
use serde::{Deserialize, Serialize};
use crate::path::Path;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    String,
    Number,
    Nested,
}

/// One named property. `children` only counts when `kind` is `Nested`; a leaf
/// keeps whatever children it had so switching back restores them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldNode {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(rename = "fields", default)]
    pub children: Vec<FieldNode>,
}

/// Root-level properties of the schema, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldTree {
    pub fields: Vec<FieldNode>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl FieldKind {
    pub fn is_nested(self) -> bool {
        matches!(self, Self::Nested)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Nested => "nested",
        };
        f.write_str(label)
    }
}

impl FieldNode {
    /// What "Add Field" appends: empty key, `String`, no children.
    pub fn new() -> Self {
        Self::default()
    }
    pub fn leaf(key: impl Into<String>, kind: FieldKind) -> Self {
        Self { key: key.into(), kind, children: Vec::new() }
    }
    pub fn nested(key: impl Into<String>, children: Vec<FieldNode>) -> Self {
        Self { key: key.into(), kind: FieldKind::Nested, children }
    }
    /// Children that take part in compilation and rendering.
    pub fn visible_children(&self) -> &[FieldNode] {
        if self.kind.is_nested() { &self.children } else { &[] }
    }
}

impl FieldTree {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn from_fields(fields: Vec<FieldNode>) -> Self {
        Self { fields }
    }
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
    /// Total node count, inert children included.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[FieldNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.fields)
    }
    /// Pre-order walk over the rendered tree: descends only into `Nested`
    /// nodes, handing out the current path of every node it visits.
    pub fn walk(&self, mut visit: impl FnMut(&Path, &FieldNode)) {
        fn go(nodes: &[FieldNode], prefix: &mut Vec<usize>, visit: &mut dyn FnMut(&Path, &FieldNode)) {
            for (idx, node) in nodes.iter().enumerate() {
                prefix.push(idx);
                let path = Path::from(prefix.clone());
                visit(&path, node);
                go(node.visible_children(), prefix, visit);
                prefix.pop();
            }
        }
        go(&self.fields, &mut Vec::new(), &mut visit);
    }
    /// Paths of every rendered node, in walk order.
    pub fn paths(&self) -> Vec<Path> {
        let mut out = Vec::new();
        self.walk(|path, _| out.push(path.clone()));
        out
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_node_is_empty_string_leaf() {
        let node = FieldNode::new();
        assert_eq!(node.key, "");
        assert_eq!(node.kind, FieldKind::String);
        assert!(node.children.is_empty());
    }

    #[test]
    fn leaf_hides_inert_children() {
        let mut node = FieldNode::nested("addr", vec![FieldNode::leaf("city", FieldKind::String)]);
        assert_eq!(node.visible_children().len(), 1);
        node.kind = FieldKind::Number;
        assert!(node.visible_children().is_empty());
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn walk_skips_children_of_leaves() {
        let mut inert = FieldNode::nested("gone", vec![FieldNode::new()]);
        inert.kind = FieldKind::String;
        let tree = FieldTree::from_fields(vec![
            FieldNode::nested("addr", vec![FieldNode::leaf("city", FieldKind::String)]),
            inert,
        ]);
        let paths = tree.paths().iter().map(|p| p.to_string()).collect::<Vec<_>>();
        assert_eq!(paths, vec!["[0]", "[0,0]", "[1]"]);
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn kinds_use_original_wire_names() {
        let tree = FieldTree::from_fields(vec![FieldNode::nested("a", vec![])]);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json, serde_json::json!({
            "fields": [{ "key": "a", "type": "nested", "fields": [] }]
        }));
        let kind: FieldKind = serde_json::from_value(serde_json::json!("number")).unwrap();
        assert_eq!(kind, FieldKind::Number);
        assert!(serde_json::from_value::<FieldKind>(serde_json::json!("object")).is_err());
    }
}
