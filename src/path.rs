//! Positional addressing into a [`FieldTree`].
//!
//! A path is one sibling index per level: `[]` is the root sequence, `[2]` the
//! third top-level field, `[2,0]` its first child. Paths name positions, not
//! nodes, so every path taken before a removal is stale; callers re-derive
//! them from the tree they last rendered (see [`FieldTree::walk`]).
//!
//! Resolution only walks through `nested` fields. The inert children a leaf
//! keeps around are not addressable until the leaf is switched back.
use serde::{Deserialize, Serialize};
use crate::error::{EditError, EditResult};
use crate::field::{FieldNode, FieldTree};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<usize>);

impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
    pub fn depth(&self) -> usize {
        self.0.len()
    }
    /// Parent sequence path and the index within it; `None` for the root.
    pub fn split_last(&self) -> Option<(Path, usize)> {
        let (last, parent) = self.0.split_last()?;
        Some((Self(parent.to_vec()), *last))
    }
    /// Form-input style name, e.g. `fields[2].fields[0]`.
    pub fn field_name(&self) -> String {
        if self.0.is_empty() {
            return String::from("fields");
        }
        self.0
            .iter()
            .map(|i| format!("fields[{i}]"))
            .collect::<Vec<_>>()
            .join(".")
    }
    fn not_found(&self) -> EditError {
        EditError::PathNotFound { path: self.clone() }
    }
}

impl From<Vec<usize>> for Path {
    fn from(xs: Vec<usize>) -> Self {
        Self(xs)
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(xs: [usize; N]) -> Self {
        Self(xs.to_vec())
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.0.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(",");
        write!(f, "[{inner}]")
    }
}

// ————————————————————————————————————————————————————————————————————————————
// RESOLUTION
// ————————————————————————————————————————————————————————————————————————————

/// The field at `path`. The root path names a sequence, not a field, so it
/// never resolves here.
pub fn resolve<'a>(tree: &'a FieldTree, path: &Path) -> EditResult<&'a FieldNode> {
    let (last, parents) = path.0.split_last().ok_or_else(|| path.not_found())?;
    let mut seq = tree.fields.as_slice();
    for &idx in parents {
        let node = seq.get(idx).ok_or_else(|| path.not_found())?;
        if !node.kind.is_nested() {
            return Err(path.not_found());
        }
        seq = &node.children;
    }
    seq.get(*last).ok_or_else(|| path.not_found())
}

pub fn resolve_mut<'a>(tree: &'a mut FieldTree, path: &Path) -> EditResult<&'a mut FieldNode> {
    let (last, parents) = path.0.split_last().ok_or_else(|| path.not_found())?;
    let mut seq = &mut tree.fields;
    for &idx in parents {
        let node = seq.get_mut(idx).ok_or_else(|| path.not_found())?;
        if !node.kind.is_nested() {
            return Err(path.not_found());
        }
        seq = &mut node.children;
    }
    seq.get_mut(*last).ok_or_else(|| path.not_found())
}

/// The child sequence addressed by `path`: the root sequence for `[]`,
/// otherwise the children of the nested field at `path`.
pub fn children_at<'a>(tree: &'a FieldTree, path: &Path) -> EditResult<&'a [FieldNode]> {
    if path.is_root() {
        return Ok(&tree.fields);
    }
    let node = resolve(tree, path)?;
    if !node.kind.is_nested() {
        return Err(EditError::InvalidParent { path: path.clone() });
    }
    Ok(&node.children)
}

pub fn children_at_mut<'a>(tree: &'a mut FieldTree, path: &Path) -> EditResult<&'a mut Vec<FieldNode>> {
    if path.is_root() {
        return Ok(&mut tree.fields);
    }
    let node = resolve_mut(tree, path)?;
    if !node.kind.is_nested() {
        return Err(EditError::InvalidParent { path: path.clone() });
    }
    Ok(&mut node.children)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
