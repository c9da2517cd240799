//! Template registry: the execution environments a fragment can target.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const BUILTIN: &str = include_str!("templates.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub lib: Vec<String>,
    #[serde(default)]
    pub file: Option<String>,
    pub instructions: String,
    #[serde(default)]
    pub port: Option<u16>,
}

/// Templates keyed by identifier, in the order they were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRegistry {
    entries: Vec<(String, Template)>,
}

impl TemplateRegistry {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN).context("built-in template registry is invalid")
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
        let mut entries = Vec::with_capacity(map.len());
        for (id, value) in map {
            let template: Template = serde_json::from_value(value)
                .with_context(|| format!("invalid template '{id}'"))?;
            entries.push((id, template));
        }
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read templates '{}'", path.display()))?;
        let registry = Self::from_json(&text)
            .with_context(|| format!("invalid templates '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), count = registry.len(), "loaded template registry");
        Ok(registry)
    }

    pub fn insert(&mut self, id: impl Into<String>, template: Template) {
        let id = id.into();
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some((_, t)) => *t = template,
            None => self.entries.push((id, template)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.entries.iter().find(|(k, _)| k == id).map(|(_, t)| t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Template)> {
        self.entries.iter().map(|(k, t)| (k.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serialize the registry as the numbered catalog embedded in the prompt.
pub fn templates_to_prompt(registry: &TemplateRegistry) -> String {
    registry
        .iter()
        .enumerate()
        .map(|(i, (id, t))| {
            format!(
                "{}. {}: \"{}\". File: {}. Dependencies installed: {}. Port: {}.",
                i + 1,
                id,
                t.instructions,
                t.file.as_deref().unwrap_or("none"),
                t.lib.join(", "),
                t.port.map(|p| p.to_string()).unwrap_or_else(|| "none".into()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
