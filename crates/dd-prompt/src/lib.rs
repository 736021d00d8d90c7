//! Prompt template management for due-diligence reports
//!
//! Templates are written in Jinja2 syntax and rendered with MiniJinja. A
//! [`PromptRegistry`] holds every template an application needs, keyed by name,
//! and can be shared across threads.
//!
//! # Quick Start
//!
//! ```
//! use dd_prompt::{JinjaTemplate, PromptRegistry};
//! use serde_json::json;
//!
//! let registry = PromptRegistry::new();
//! registry.register(
//!     JinjaTemplate::new("analyzer", "Write a report on {{ ticker }}.").unwrap(),
//! );
//!
//! let prompt = registry.render("analyzer", &json!({ "ticker": "AAPL" })).unwrap();
//! assert_eq!(prompt, "Write a report on AAPL.");
//! ```

mod error;
mod jinja;
mod registry;
mod template;

// Re-export core types
pub use error::{PromptError, Result};
pub use jinja::JinjaTemplate;
pub use registry::PromptRegistry;
pub use template::PromptTemplate;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PromptError, Result};
    pub use crate::jinja::JinjaTemplate;
    pub use crate::registry::PromptRegistry;
    pub use crate::template::PromptTemplate;
}
