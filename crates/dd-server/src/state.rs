use dd_report::DueDiligencePipeline;

/// Shared state for all handlers
pub struct AppState {
    // Immutable after construction, safe to share across requests
    pub pipeline: DueDiligencePipeline,
}

impl AppState {
    pub fn new(pipeline: DueDiligencePipeline) -> Self {
        Self { pipeline }
    }
}
