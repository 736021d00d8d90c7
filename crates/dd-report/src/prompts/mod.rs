//! Report prompt templates and prompt building
//!
//! Templates are organized into:
//! - `system`: the persona for each report stage
//! - `user`: stage instructions and the text, HTML and JSON output formats
//! - `builder`: assembly of collected data into a ready-to-send prompt

mod builder;
mod system;
mod user;

pub use builder::{DataBlock, PreparedPrompt, PromptOutcome, ReportRequest, build_prompt};
pub use system::*;
pub use user::*;

use dd_prompt::{PromptRegistry, Result};

/// Register every report template with the given registry
pub fn register_prompts(registry: &PromptRegistry) -> Result<()> {
    // Personas
    registry.register(business_analyst()?);
    registry.register(technical_analyst()?);
    registry.register(merge_analyst()?);

    // Instructions
    registry.register(business_instruction()?);
    registry.register(technical_instruction()?);
    registry.register(merge_instruction()?);

    // Output formats
    registry.register(text_format()?);
    registry.register(html_format()?);
    registry.register(json_format()?);

    Ok(())
}

/// A registry holding every report template
pub fn default_registry() -> Result<PromptRegistry> {
    let registry = PromptRegistry::new();
    register_prompts(&registry)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportKind, ReportTemplate};

    #[test]
    fn test_register_all_prompts() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.len(), 9);

        for kind in [ReportKind::business(), ReportKind::technical(), ReportKind::merged()] {
            assert!(registry.contains(&kind.persona_name()));
            assert!(registry.contains(&kind.instruction_name()));
        }
        for template in [ReportTemplate::Text, ReportTemplate::Html, ReportTemplate::Json] {
            assert!(registry.contains(template.template_name()));
        }
    }

    #[test]
    fn test_render_instruction() {
        let registry = default_registry().unwrap();
        let prompt = registry
            .render("report.instruction.business", &serde_json::json!({ "ticker": "GOOG" }))
            .unwrap();
        assert!(prompt.contains("on the following stock: GOOG."));
    }
}
