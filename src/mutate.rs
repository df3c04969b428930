//! Structural and content edits over a [`FieldTree`].
//!
//! Each operation takes the current tree by reference and hands back a new
//! one; the input is never touched, so a rejected edit cannot leave a
//! half-applied tree behind.
use serde::{Deserialize, Serialize};
use crate::error::{EditError, EditResult};
use crate::field::{FieldKind, FieldNode, FieldTree};
use crate::path::{self, Path};

// ————————————————————————————————————————————————————————————————————————————
// EDIT INTENTS
// ————————————————————————————————————————————————————————————————————————————

/// One edit as issued by the presentation layer or an edit script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    AddField {
        #[serde(default)]
        parent: Path,
    },
    RemoveField {
        path: Path,
    },
    SetKey {
        path: Path,
        key: String,
    },
    SetKind {
        path: Path,
        kind: FieldKind,
    },
}

impl std::fmt::Display for Edit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddField { parent } => write!(f, "add field under {parent}"),
            Self::RemoveField { path } => write!(f, "remove field {path}"),
            Self::SetKey { path, key } => write!(f, "rename field {path} to {key:?}"),
            Self::SetKind { path, kind } => write!(f, "set field {path} to {kind}"),
        }
    }
}

/// Dispatch one intent.
pub fn apply(tree: &FieldTree, edit: &Edit) -> EditResult<FieldTree> {
    match edit {
        Edit::AddField { parent } => add_field(tree, parent),
        Edit::RemoveField { path } => remove_field(tree, path),
        Edit::SetKey { path, key } => set_key(tree, path, key),
        Edit::SetKind { path, kind } => set_kind(tree, path, *kind),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// OPERATIONS
// ————————————————————————————————————————————————————————————————————————————

/// Append a default field (`""`, `String`) to the sequence at `parent`.
pub fn add_field(tree: &FieldTree, parent: &Path) -> EditResult<FieldTree> {
    let mut out = tree.clone();
    path::children_at_mut(&mut out, parent)?.push(FieldNode::new());
    Ok(out)
}

/// Drop the field at `path` with its whole subtree. Later siblings shift
/// down by one.
pub fn remove_field(tree: &FieldTree, path: &Path) -> EditResult<FieldTree> {
    let not_found = || EditError::PathNotFound { path: path.clone() };
    let (parent, idx) = path.split_last().ok_or_else(not_found)?;
    let mut out = tree.clone();
    let siblings = path::children_at_mut(&mut out, &parent).map_err(|_| not_found())?;
    if idx >= siblings.len() {
        return Err(not_found());
    }
    siblings.remove(idx);
    Ok(out)
}

/// Rename. Sibling keys are not checked here; see
/// [`KeyPolicy`](crate::session::KeyPolicy).
pub fn set_key(tree: &FieldTree, path: &Path, key: &str) -> EditResult<FieldTree> {
    let mut out = tree.clone();
    path::resolve_mut(&mut out, path)?.key = key.to_string();
    Ok(out)
}

/// Retype. Children survive a switch away from `Nested` and come back when
/// the field is switched to `Nested` again.
pub fn set_kind(tree: &FieldTree, path: &Path, kind: FieldKind) -> EditResult<FieldTree> {
    let mut out = tree.clone();
    path::resolve_mut(&mut out, path)?.kind = kind;
    Ok(out)
}

/// Whether `key` is already taken by a sibling of the field at `path`.
pub fn sibling_has_key(tree: &FieldTree, path: &Path, key: &str) -> EditResult<bool> {
    let (parent, idx) = path
        .split_last()
        .ok_or_else(|| EditError::PathNotFound { path: path.clone() })?;
    path::resolve(tree, path)?;
    let siblings = path::children_at(tree, &parent)?;
    Ok(siblings.iter().enumerate().any(|(i, node)| i != idx && node.key == key))
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
