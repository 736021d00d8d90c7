//! MiniJinja-based template implementation
//!
//! This module provides a [`JinjaTemplate`] implementation that uses the MiniJinja
//! template engine for variable interpolation and conditional rendering.

use crate::{PromptError, PromptTemplate, Result};
use minijinja::Environment;

/// A prompt template backed by MiniJinja
///
/// # Template Syntax
///
/// The template uses standard Jinja2 syntax:
/// - Variables: `{{ variable }}`
/// - Filters: `{{ name | upper }}`
/// - Conditionals: `{% if condition %}...{% endif %}`
/// - Loops: `{% for item in items %}...{% endfor %}`
///
/// Block tags swallow the newline that follows them, so a loop written one
/// item per line renders one item per line.
///
/// # Examples
///
/// ```
/// use dd_prompt::{JinjaTemplate, PromptTemplate};
/// use serde_json::json;
///
/// let template = JinjaTemplate::new("greeting", "Hello, {{ name }}!").unwrap();
/// let result = template.render(&json!({ "name": "World" })).unwrap();
/// assert_eq!(result, "Hello, World!");
/// ```
pub struct JinjaTemplate {
    name: String,
    template: String,
}

impl JinjaTemplate {
    /// Create a template, checking that it parses
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::TemplateParseFailed`] when the source is not valid Jinja.
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let template = template.into();

        environment()
            .template_from_str(&template)
            .map_err(|e| PromptError::TemplateParseFailed {
                name: name.clone(),
                detail: e.to_string(),
            })?;

        Ok(Self { name, template })
    }
}

/// Environment shared by validation and rendering so both agree on whitespace handling
fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env
}

impl PromptTemplate for JinjaTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, vars: &serde_json::Value) -> Result<String> {
        // Create a new environment for each render to avoid lifetime issues
        let env = environment();
        let value = minijinja::value::Value::from_serialize(vars);

        env.render_str(&self.template, value)
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }

    fn raw_template(&self) -> &str {
        &self.template
    }
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .field("len", &self.template.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_template() {
        let template = JinjaTemplate::new("test", "Hello, {{ name }}!").unwrap();

        let result = template.render(&json!({ "name": "World" })).unwrap();
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_filters() {
        let template =
            JinjaTemplate::new("test", "{{ name | upper }} {{ word | capitalize }}").unwrap();

        let result = template
            .render(&json!({ "name": "msft", "word": "overview" }))
            .unwrap();
        assert_eq!(result, "MSFT Overview");
    }

    #[test]
    fn test_invalid_template_error() {
        let result = JinjaTemplate::new("test", "{{ unclosed");
        assert!(matches!(
            result,
            Err(PromptError::TemplateParseFailed { .. })
        ));
    }

    #[test]
    fn test_raw_template() {
        let template = JinjaTemplate::new("test", "Hello {{ x }}").unwrap();
        assert_eq!(template.raw_template(), "Hello {{ x }}");
    }

    #[test]
    fn test_conditional() {
        let template = JinjaTemplate::new(
            "conditional",
            r"{% if detailed %}Detailed analysis{% else %}Brief analysis{% endif %}",
        )
        .unwrap();

        let detailed = template.render(&json!({ "detailed": true })).unwrap();
        assert_eq!(detailed, "Detailed analysis");

        let brief = template.render(&json!({ "detailed": false })).unwrap();
        assert_eq!(brief, "Brief analysis");
    }

    #[test]
    fn test_loop_one_item_per_line() {
        let template = JinjaTemplate::new(
            "loop",
            "{% for s in sections %}\n{{ s.heading }}: {{ s.guidance }}\n{% endfor %}\n",
        )
        .unwrap();

        let result = template
            .render(&json!({
                "sections": [
                    { "heading": "Overview", "guidance": "who they are" },
                    { "heading": "Risks", "guidance": "what can go wrong" }
                ]
            }))
            .unwrap();

        assert_eq!(result, "Overview: who they are\nRisks: what can go wrong\n");
    }

    #[test]
    fn test_values_are_not_escaped() {
        let template = JinjaTemplate::new("raw", "{{ data }}").unwrap();
        let result = template.render(&json!({ "data": "<p>A & B</p>" })).unwrap();
        assert_eq!(result, "<p>A & B</p>");
    }

    #[test]
    fn test_debug() {
        let template = JinjaTemplate::new("test", "Hello").unwrap();
        let debug = format!("{template:?}");
        assert!(debug.contains("JinjaTemplate"));
        assert!(debug.contains("test"));
    }
}
