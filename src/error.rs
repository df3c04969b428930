use crate::path::Path;

/// A rejected edit. The tree it was aimed at is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Out-of-range index at some level, or a path that is stale after an
    /// earlier removal. Re-derive paths from the current tree and retry.
    #[error("no field at path {path}")]
    PathNotFound { path: Path },
    /// `add_field` aimed at a field that is not `nested`.
    #[error("field at path {path} is not nested and cannot hold child fields")]
    InvalidParent { path: Path },
    /// Only raised under [`KeyPolicy::Unique`](crate::session::KeyPolicy::Unique).
    #[error("a sibling of the field at path {path} is already named {key:?}")]
    DuplicateKey { path: Path, key: String },
}

pub type EditResult<T> = Result<T, EditError>;
