//! Generation prompt: fixed instructions plus the template catalog.

use crate::templates::{templates_to_prompt, TemplateRegistry};

const PREAMBLE: &str = "You are a skilled software engineer.
You do not make mistakes.
Generate a fragment.
You can install additional dependencies.
Do not touch project dependencies files like package.json, package-lock.json, requirements.txt, etc.
Do not wrap code in backticks.
Always break the lines correctly.
CRITICAL: You must fill in the \"code\" field with working code.
You can use one of the following templates:
";

/// Build the system prompt for a generation request. The catalog is appended
/// verbatim, without validation or escaping.
pub fn to_prompt(registry: &TemplateRegistry) -> String {
    format!("{PREAMBLE}{}\n", templates_to_prompt(registry))
}
