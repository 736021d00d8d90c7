use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a successful due-diligence request
#[derive(Debug, Serialize, Deserialize)]
pub struct DueDiligenceResponse {
    /// Merged report sections keyed by heading
    #[serde(rename = "DD")]
    pub dd: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
