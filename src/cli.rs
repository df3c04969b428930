//! Minimal CLI: replay edit scripts → (schema | tree | paths)
use std::path::PathBuf;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, Args};
use colored::Colorize;
use crate::session::{KeyPolicy, Session, SessionConfig};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// replay field-tree edit scripts against a fresh session and print the compiled JSON Schema
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// log every accepted edit (overridden by RUST_LOG)
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// replay edits and print the compiled schema (or the field tree)
    Replay(ReplayOut),
    /// replay edits and list every rendered field with its current path
    Paths(PathsOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat every input as newline-delimited JSON (one edit per line); .ndjson/.jsonl files always are
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// reject renames that collide with a sibling's key
    #[arg(long, default_value_t = false)]
    unique_keys: bool,

    /// report rejected edits and continue instead of failing
    #[arg(long, default_value_t = false)]
    keep_going: bool,

    /// One or more edit scripts. May be literal paths or quoted glob patterns; applied in order
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct ReplayOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// print the field tree instead of the schema
    #[arg(long)]
    tree: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct PathsOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

/// A replayed session plus one diagnostic per edit `--keep-going` skipped.
struct Replay {
    session: Session,
    skipped: Vec<String>,
}

impl InputSettings {
    fn session_config(&self) -> SessionConfig {
        let key_policy = if self.unique_keys { KeyPolicy::Unique } else { KeyPolicy::AllowDuplicates };
        SessionConfig { key_policy }
    }

    /// Build a session from every input script, in order.
    fn replay(&self) -> Result<Replay> {
        let mut session = Session::with_config(self.session_config());
        let mut skipped = Vec::new();
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read edit script ({source_path_str})"))?;
            let ndjson = self.ndjson || matches!(
                source_path.extension().and_then(|x| x.to_str()),
                Some("ndjson" | "jsonl"),
            );
            let edits = crate::script::parse_edits(&source, ndjson)
                .with_context(|| format!("failed to parse edit script ({source_path_str})"))?;
            for (idx, edit) in edits.iter().enumerate() {
                let Err(error) = session.apply(edit) else { continue };
                // 1-based, like NDJSON line numbers
                let number = idx + 1;
                if !self.keep_going {
                    bail!("{source_path_str}: edit #{number} ({edit}) rejected: {error}");
                }
                skipped.push(format!("{source_path_str}: edit #{number} ({edit}): {error}"));
            }
        }
        Ok(Replay { session, skipped })
    }
}

impl Replay {
    fn report_skipped(&self) {
        for line in &self.skipped {
            eprintln!("{} {line}", "skipped".yellow().bold());
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn verbose(&self) -> bool {
        self.verbose
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Replay(target) => {
                let replay = target.input_settings.replay()?;
                replay.report_skipped();
                let session = &replay.session;
                let src = if target.tree {
                    serde_json::to_string_pretty(session.tree())?
                } else {
                    session.schema().to_string_pretty()?
                };
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, &src)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{src}");
                }
            }
            Command::Paths(target) => {
                let replay = target.input_settings.replay()?;
                replay.report_skipped();
                replay.session.tree().walk(|path, node| {
                    let indent = "  ".repeat(path.depth().saturating_sub(1));
                    println!(
                        "{indent}{} {} {:?}: {}",
                        path.to_string().cyan(),
                        path.field_name().dimmed(),
                        node.key,
                        node.kind,
                    );
                });
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            // glob matches come back sorted, so replay order is stable
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths_pass_through() {
        let out = resolve_file_path_patterns(["a.json", "dir/b.ndjson"]).unwrap();
        assert_eq!(out, vec![PathBuf::from("a.json"), PathBuf::from("dir/b.ndjson")]);
    }

    #[test]
    fn unmatched_glob_is_an_error() {
        assert!(resolve_file_path_patterns(["/definitely/not/here/*.json"]).is_err());
    }

    #[test]
    fn parses_replay_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "schema-builder", "-v", "replay", "--unique-keys", "--keep-going", "-i", "a.json", "b.json",
        ]).unwrap();
        assert!(cli.verbose());
        match cli.cmd {
            Command::Replay(target) => {
                assert_eq!(target.input_settings.input, vec!["a.json", "b.json"]);
                assert_eq!(target.input_settings.session_config().key_policy, KeyPolicy::Unique);
                assert!(target.input_settings.keep_going);
                assert!(!target.tree);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    const REJECTED_THEN_ADD: &str = r#"[{"op": "remove_field", "path": [5]}, {"op": "add_field"}]"#;

    fn write_script(dir: &tempfile::TempDir, name: &str, src: &str) -> String {
        let path = dir.path().join(name);
        std::fs::write(&path, src).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn settings(input: Vec<String>, keep_going: bool) -> InputSettings {
        InputSettings { ndjson: false, unique_keys: false, keep_going, input }
    }

    #[test]
    fn rejected_edit_aborts_replay() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(&dir, "edits.json", REJECTED_THEN_ADD);
        let error = settings(vec![script], false).replay().err().unwrap();
        let message = error.to_string();
        assert!(message.contains("edit #1 (remove field [5]) rejected: no field at path [5]"), "{message}");
    }

    #[test]
    fn keep_going_skips_rejected_edit_once() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(&dir, "edits.json", REJECTED_THEN_ADD);
        let replay = settings(vec![script], true).replay().unwrap();
        assert_eq!(replay.skipped.len(), 1);
        assert!(replay.skipped[0].contains("edit #1 (remove field [5])"), "{}", replay.skipped[0]);
        assert_eq!(
            replay.session.schema().to_value().unwrap(),
            serde_json::json!({"type": "object", "properties": {"": {"type": "string"}}}),
        );
    }

    #[test]
    fn ndjson_extension_is_detected_without_flag() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            &dir,
            "edits.ndjson",
            "{\"op\":\"add_field\"}\n{\"op\":\"set_key\",\"path\":[0],\"key\":\"id\"}\n",
        );
        let replay = settings(vec![script], false).replay().unwrap();
        assert_eq!(replay.session.tree().fields[0].key, "id");
        assert!(replay.skipped.is_empty());
    }

    #[test]
    fn inputs_apply_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_script(&dir, "1.json", r#"[{"op": "add_field"}, {"op": "set_key", "path": [0], "key": "first"}]"#);
        write_script(&dir, "2.json", r#"[{"op": "set_key", "path": [0], "key": "second"}]"#);
        let pattern = dir.path().join("*.json").to_string_lossy().into_owned();
        let replay = settings(vec![pattern], false).replay().unwrap();
        assert_eq!(replay.session.tree().fields.len(), 1);
        assert_eq!(replay.session.tree().fields[0].key, "second");
    }

    #[test]
    fn run_writes_schema_or_tree_to_out() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            &dir,
            "edits.json",
            r#"[{"op": "add_field"}, {"op": "set_key", "path": [0], "key": "addr"}, {"op": "set_kind", "path": [0], "kind": "nested"}]"#,
        );
        let schema_out = dir.path().join("out/schema.json");
        let tree_out = dir.path().join("out/tree.json");

        let cli = CommandLineInterface::try_parse_from([
            "schema-builder", "replay", "-i", script.as_str(), "--out", schema_out.to_str().unwrap(),
        ]).unwrap();
        cli.run().unwrap();
        let schema: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&schema_out).unwrap()).unwrap();
        assert_eq!(schema, serde_json::json!({"type": "object", "properties": {
            "addr": {"type": "object", "properties": {}}
        }}));

        let cli = CommandLineInterface::try_parse_from([
            "schema-builder", "replay", "--tree", "-i", script.as_str(), "--out", tree_out.to_str().unwrap(),
        ]).unwrap();
        cli.run().unwrap();
        let tree: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&tree_out).unwrap()).unwrap();
        assert_eq!(tree, serde_json::json!({"fields": [{"key": "addr", "type": "nested", "fields": []}]}));
    }
}
