//! Edit scripts: a JSON array of edit intents, or one intent per line (NDJSON).
use serde::de::DeserializeOwned;
use crate::mutate::Edit;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("at JSON path {path} → {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: at JSON path {path} → {source}")]
    DecodeLine {
        line: usize,
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, ScriptError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        ScriptError::Decode { path, source: err.into_inner() }
    })
}

/// Parse a whole script. Blank lines in NDJSON are skipped.
pub fn parse_edits(src: &str, ndjson: bool) -> Result<Vec<Edit>, ScriptError> {
    if !ndjson {
        return from_str_with_path::<Vec<Edit>>(src);
    }
    let mut out = Vec::new();
    for (idx, line) in src.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let edit = from_str_with_path::<Edit>(line).map_err(|error| match error {
            ScriptError::Decode { path, source } => ScriptError::DecodeLine { line: idx + 1, path, source },
            other => other,
        })?;
        out.push(edit);
    }
    Ok(out)
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
