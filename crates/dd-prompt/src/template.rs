//! Core prompt template trait
//!
//! This module defines the [`PromptTemplate`] trait that all template implementations must follow.

use crate::Result;

/// Core trait for prompt templates
///
/// This trait is dyn-compatible, using `serde_json::Value` for variables instead of generics,
/// so the registry can hold any implementation behind an `Arc<dyn PromptTemplate>`.
///
/// # Examples
///
/// ```
/// use dd_prompt::{JinjaTemplate, PromptTemplate};
/// use serde_json::json;
///
/// let template = JinjaTemplate::new("greeting", "Analyze {{ ticker }}").unwrap();
/// let result = template.render(&json!({ "ticker": "MSFT" })).unwrap();
/// assert_eq!(result, "Analyze MSFT");
/// ```
pub trait PromptTemplate: Send + Sync {
    /// Get the template name/identifier
    fn name(&self) -> &str;

    /// Render the template with variables
    fn render(&self, vars: &serde_json::Value) -> Result<String>;

    /// Get raw template string (for debugging/inspection)
    fn raw_template(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Template that ignores its variables
    struct StaticTemplate {
        name: String,
        text: String,
    }

    impl PromptTemplate for StaticTemplate {
        fn name(&self) -> &str {
            &self.name
        }

        fn render(&self, _vars: &serde_json::Value) -> Result<String> {
            Ok(self.text.clone())
        }

        fn raw_template(&self) -> &str {
            &self.text
        }
    }

    #[test]
    fn test_trait_object() {
        let template: Box<dyn PromptTemplate> = Box::new(StaticTemplate {
            name: "static".to_string(),
            text: "You are a seasoned financial expert.".to_string(),
        });

        assert_eq!(template.name(), "static");
        assert_eq!(
            template.render(&json!({ "ignored": true })).unwrap(),
            template.raw_template()
        );
    }
}
