//! The editing session: one authoritative tree plus its compiled schema.
//!
//! Every accepted edit replaces the tree and recompiles the whole schema
//! before returning. A rejected edit leaves both exactly as they were.
use log::{debug, trace};
use crate::compile::{self, SchemaObject};
use crate::error::{EditError, EditResult};
use crate::field::{FieldKind, FieldTree};
use crate::mutate::{self, Edit};
use crate::path::Path;

// ————————————————————————————————————————————————————————————————————————————
// CONFIG
// ————————————————————————————————————————————————————————————————————————————

/// How `set_key` treats a key already used by a sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// Accept it; the later sibling wins in the compiled schema.
    #[default]
    AllowDuplicates,
    /// Reject non-empty keys that collide with a sibling.
    Unique,
}

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub key_policy: KeyPolicy,
}

// ————————————————————————————————————————————————————————————————————————————
// SESSION
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    tree: FieldTree,
    schema: SchemaObject,
    revision: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Start an empty session with the default config.
pub fn create_session() -> Session {
    Session::new()
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }
    pub fn with_config(config: SessionConfig) -> Self {
        let tree = FieldTree::new();
        let schema = compile::compile(&tree);
        Self { config, tree, schema, revision: 0 }
    }
    pub fn tree(&self) -> &FieldTree {
        &self.tree
    }
    pub fn schema(&self) -> &SchemaObject {
        &self.schema
    }
    /// Number of accepted edits so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn add_field(&mut self, parent: &Path) -> EditResult<()> {
        self.apply(&Edit::AddField { parent: parent.clone() })
    }
    pub fn remove_field(&mut self, path: &Path) -> EditResult<()> {
        self.apply(&Edit::RemoveField { path: path.clone() })
    }
    pub fn set_key(&mut self, path: &Path, key: impl Into<String>) -> EditResult<()> {
        self.apply(&Edit::SetKey { path: path.clone(), key: key.into() })
    }
    pub fn set_kind(&mut self, path: &Path, kind: FieldKind) -> EditResult<()> {
        self.apply(&Edit::SetKind { path: path.clone(), kind })
    }

    /// Apply one intent; on success the tree and schema are both current
    /// when this returns.
    pub fn apply(&mut self, edit: &Edit) -> EditResult<()> {
        match self.try_apply(edit) {
            Ok(tree) => {
                debug!("accepted edit: {edit}");
                self.commit(tree);
                Ok(())
            }
            Err(error) => {
                // callers own the report for rejected edits
                trace!("rejected edit ({edit}): {error}");
                Err(error)
            }
        }
    }

    fn try_apply(&self, edit: &Edit) -> EditResult<FieldTree> {
        if let Edit::SetKey { path, key } = edit {
            self.check_key(path, key)?;
        }
        mutate::apply(&self.tree, edit)
    }

    fn check_key(&self, path: &Path, key: &str) -> EditResult<()> {
        match self.config.key_policy {
            KeyPolicy::AllowDuplicates => Ok(()),
            KeyPolicy::Unique if key.is_empty() => Ok(()),
            KeyPolicy::Unique => {
                if mutate::sibling_has_key(&self.tree, path, key)? {
                    return Err(EditError::DuplicateKey { path: path.clone(), key: key.to_string() });
                }
                Ok(())
            }
        }
    }

    fn commit(&mut self, tree: FieldTree) {
        self.schema = compile::compile(&tree);
        self.tree = tree;
        self.revision += 1;
        trace!("recompiled schema over {} nodes (revision {})", self.tree.node_count(), self.revision);
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
