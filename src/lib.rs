//! Build a tree of typed fields through positional edits and keep a JSON
//! Schema compiled from it after every edit.
//!
//! ```
//! use schema_builder::{FieldKind, Path, Session};
//!
//! let mut session = Session::new();
//! session.add_field(&Path::root()).unwrap();
//! session.set_key(&Path::from([0]), "name").unwrap();
//! session.set_kind(&Path::from([0]), FieldKind::String).unwrap();
//! assert_eq!(
//!     session.schema().to_value().unwrap(),
//!     serde_json::json!({"type": "object", "properties": {"name": {"type": "string"}}}),
//! );
//! ```
pub mod field;
pub mod path;
pub mod error;
pub mod mutate;
pub mod compile;
pub mod session;
pub mod script;
pub mod cli;

pub use field::{FieldKind, FieldNode, FieldTree};
pub use path::Path;
pub use error::{EditError, EditResult};
pub use mutate::Edit;
pub use compile::{compile, Schema, SchemaObject};
pub use session::{create_session, KeyPolicy, Session, SessionConfig};
