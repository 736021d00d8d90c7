use axum::{
    Json,
    extract::{Path, State},
};
use dd_report::{ReportBody, ReportStatus};
use std::sync::Arc;

use crate::dto::{DueDiligenceResponse, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET|POST /due_diligence/:ticker - Run the full pipeline and return the merged report
pub async fn due_diligence(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Json<DueDiligenceResponse>, ApiError> {
    let ticker = ticker.trim();
    tracing::info!(ticker, "due diligence requested");

    let dd = state.pipeline.run(ticker).await?;

    // Only a parsed JSON report is a success; anything else surfaces its text
    match (dd.merged.status, dd.merged.body) {
        (ReportStatus::Complete, ReportBody::Sections(sections)) => {
            Ok(Json(DueDiligenceResponse { dd: sections }))
        },
        (status, ReportBody::Text(text)) => {
            tracing::warn!(?status, "merged report is not structured");
            Err(ApiError::Internal(text))
        },
        (status, ReportBody::Sections(_)) => Err(ApiError::Internal(format!(
            "merged report finished with status {status:?}"
        ))),
    }
}

/// GET /health - Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
