//! Generated fragment as streamed from the generation step.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A fragment in any state of completion. While generation is still
/// streaming, any of these fields may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(default)]
    pub commentary: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub additional_dependencies: Option<Vec<String>>,
    #[serde(default)]
    pub has_additional_dependencies: Option<bool>,
    #[serde(default)]
    pub install_dependencies_command: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl Fragment {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fragment '{}'", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("invalid fragment '{}'", path.display()))
    }

    /// `(file_path, code)` once both are present and non-empty.
    pub fn code_file(&self) -> Option<(&str, &str)> {
        match (self.file_path.as_deref(), self.code.as_deref()) {
            (Some(name), Some(code)) if !name.is_empty() && !code.is_empty() => Some((name, code)),
            _ => None,
        }
    }
}
