//! Generated reports and the stages that produce them

mod generator;
mod kind;
mod merger;
mod normalizer;
mod output;

pub use generator::{GENERATION_ERROR_PREFIX, ReportGenerator};
pub use kind::{MERGED_SECTION_KEYS, ReportKind, ReportRole, ReportTemplate, Section};
pub use merger::ReportMerger;
pub use normalizer::{extract_json, normalize, strip_fences};
pub use output::{DEFAULT_REPORT_FILE, save_html_to_file, save_report};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a report came to have the body it has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// The model answered and the answer matched the requested structure
    Complete,
    /// Nothing was collected, the model was not called
    NoData,
    /// The language model call failed
    GenerationFailed,
    /// The model answered but the structured output could not be extracted
    FormatFailed,
}

/// Report content: prose (text or HTML) or JSON sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportBody {
    Text(String),
    Sections(Map<String, Value>),
}

/// A report plus its status
///
/// Failures still carry a readable body, so a caller that only wants text can
/// ignore the status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedReport {
    pub status: ReportStatus,
    pub body: ReportBody,
}

impl GeneratedReport {
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            status: ReportStatus::Complete,
            body: ReportBody::Text(body.into()),
        }
    }

    pub fn sections(sections: Map<String, Value>) -> Self {
        Self {
            status: ReportStatus::Complete,
            body: ReportBody::Sections(sections),
        }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::failure(ReportStatus::NoData, message)
    }

    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::failure(ReportStatus::GenerationFailed, message)
    }

    pub fn format_failed(message: impl Into<String>) -> Self {
        Self::failure(ReportStatus::FormatFailed, message)
    }

    fn failure(status: ReportStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ReportBody::Text(message.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == ReportStatus::Complete
    }

    /// Parsed sections, when the body is structured
    pub fn as_sections(&self) -> Option<&Map<String, Value>> {
        match &self.body {
            ReportBody::Sections(sections) => Some(sections),
            ReportBody::Text(_) => None,
        }
    }

    /// The body as text; structured bodies are pretty-printed JSON
    pub fn to_text(&self) -> String {
        match &self.body {
            ReportBody::Text(text) => text.clone(),
            ReportBody::Sections(sections) => format!("{:#}", Value::Object(sections.clone())),
        }
    }

    /// Expected keys absent from a structured body
    ///
    /// A text body is missing nothing: its structure is not checked.
    pub fn missing_sections<'a>(&self, expected: &[&'a str]) -> Vec<&'a str> {
        self.as_sections().map_or_else(Vec::new, |sections| {
            expected
                .iter()
                .copied()
                .filter(|key| !sections.contains_key(*key))
                .collect()
        })
    }
}

impl std::fmt::Display for GeneratedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}
