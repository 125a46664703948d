//! Rendering a parsed command line for shell scripts.
//!
//! Each option becomes an `export` statement named after its long name (or
//! its short name when it has none). Scripts source the generated file.

use crate::command_line::CommandLine;
use crate::option::Opt;
use anyhow::Result;
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Variable suffix holding the positional arguments.
const ARGS_NAME: &str = "ARGS";

/// Escape a string for safe use in a shell double-quoted context.
///
/// Escapes: $, `, \, ", and !
fn escape_shell_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '$' => escaped.push_str("\\$"),
            '`' => escaped.push_str("\\`"),
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '!' => escaped.push_str("\\!"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Convert an option name to a valid shell variable name.
fn to_shell_var_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn export_name(opt: &Opt) -> &str {
    opt.long().unwrap_or_else(|| opt.key())
}

/// Values per option with every occurrence merged, in command-line order.
///
/// Flags map to an empty list.
fn collect_values(cmd: &CommandLine) -> IndexMap<&str, Vec<&str>> {
    let mut merged: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for opt in cmd.options() {
        merged
            .entry(export_name(opt))
            .or_default()
            .extend(opt.values().iter().map(String::as_str));
    }
    merged
}

/// Generate the export statements as a string.
///
/// Flags are exported as `true`; multiple values are joined with spaces.
pub fn generate_output_string(cmd: &CommandLine, prefix: &str) -> String {
    let mut output = String::new();

    // Sort for deterministic output
    let mut merged = collect_values(cmd);
    merged.sort_keys();

    for (name, values) in &merged {
        let value = if values.is_empty() {
            "true".to_string()
        } else {
            values.join(" ")
        };
        let var_name = format!("{}{}", prefix, to_shell_var_name(name));
        output.push_str(&format!("export {}=\"{}\"\n", var_name, escape_shell_value(&value)));
    }

    if !cmd.args().is_empty() {
        output.push_str(&format!(
            "export {}{}=\"{}\"\n",
            prefix,
            ARGS_NAME,
            escape_shell_value(&cmd.args().join(" "))
        ));
    }

    output
}

/// Generate a temporary file with shell export statements.
///
/// Returns the path to the temporary file. The file will persist
/// until it's manually deleted.
pub fn generate_output(cmd: &CommandLine, prefix: &str) -> Result<PathBuf> {
    write_temp_file(&generate_output_string(cmd, prefix))
}

/// Generate an error output as a string.
///
/// When sourced, it prints the message to stderr and exits 1.
pub fn generate_error_string(message: &str) -> String {
    format!("echo \"optparse: {}\" >&2\nexit 1\n", escape_shell_value(message))
}

pub fn generate_error_output(message: &str) -> Result<PathBuf> {
    write_temp_file(&generate_error_string(message))
}

/// A JSON report of the parse: `{"options": {...}, "args": [...]}`.
///
/// Flags map to `true`, options with values to a list of strings.
pub fn generate_json(cmd: &CommandLine) -> Value {
    let mut options = Map::new();
    for (name, values) in collect_values(cmd) {
        let value = if values.is_empty() {
            Value::Bool(true)
        } else {
            json!(values)
        };
        options.insert(name.to_string(), value);
    }
    json!({ "options": options, "args": cmd.args() })
}

/// Write content to a temporary file and return its path.
fn write_temp_file(content: &str) -> Result<PathBuf> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    let path = file.into_temp_path().keep()?;
    Ok(path)
}
