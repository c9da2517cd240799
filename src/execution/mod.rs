//! Execution results produced by the sandboxed interpreter.

use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use anyhow::{Context, Result};

pub mod png;

/// Runtime error raised by the executed code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeError {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traceback: Option<String>,
}

impl RuntimeError {
    /// `name: value`, exactly as raised.
    pub fn headline(&self) -> String {
        format!("{}: {}", self.name, self.value)
    }

    /// The traceback, unless it is absent or empty.
    pub fn traceback(&self) -> Option<&str> {
        self.traceback.as_deref().filter(|tb| !tb.is_empty())
    }
}

/// One output artifact of an executed cell.
///
/// Only `png` is rendered; every other format (text, html, latex, json, ...)
/// is kept in `other` and never displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Template the fragment ran in, e.g. `code-interpreter-v1`.
    pub template: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stdout: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stderr: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_error: Option<RuntimeError>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cell_results: Vec<CellResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sbx_id: Option<String>,
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ExecutionResult {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read execution result '{}'", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("invalid execution result '{}'", path.display()))
    }

    /// Whether this result came from the code interpreter template.
    pub fn is_interpreter(&self, interpreter_template: &str) -> bool {
        self.template == interpreter_template
    }

    /// True when stdout, stderr and the runtime error are all absent.
    pub fn has_no_console_output(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty() && self.runtime_error.is_none()
    }

    /// Base64 payload of the first cell result, if it carries a PNG.
    pub fn first_png(&self) -> Option<&str> {
        self.cell_results.first().and_then(|c| c.png.as_deref())
    }
}
